//! Free-text row search

use shared::date::format_date;

use super::rows::DayRow;

/// Case-insensitive substring match over everything a row displays.
///
/// Blank text matches every row.
pub fn matches_search(row: &DayRow, text: &str) -> bool {
    let needle = text.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    row_matches(row, &needle)
}

fn row_matches(row: &DayRow, needle: &str) -> bool {
    let contains = |haystack: &str| haystack.to_lowercase().contains(needle);

    contains(format_date(row.date).as_str())
        || contains(row.day_of_week.as_str())
        || row.meal_cells().any(|cell| contains(cell.text.as_str()))
        || contains(row.drinks.as_str())
        || row.events.iter().any(|event| contains(event.text.as_str()))
}

/// Rows matching `text`, in order
pub fn apply_search(rows: &[DayRow], text: &str) -> Vec<DayRow> {
    let needle = text.trim().to_lowercase();
    if needle.is_empty() {
        return rows.to_vec();
    }
    rows.iter()
        .filter(|row| row_matches(row, &needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::build_rows;
    use chrono::NaiveDate;
    use shared::models::{DailySummary, EventEntry, MealEntry};

    fn rows() -> Vec<DayRow> {
        let mut monday = DailySummary::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        monday.dinner = vec![MealEntry {
            ids: vec![1],
            name: "Ramen".into(),
            people: vec!["Alice".into()],
            notes: Some("extra egg".into()),
            meal_type: Some("dine-in".into()),
        }];
        let mut tuesday = DailySummary::new(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        tuesday.drinks = vec!["Oolong".into()];
        tuesday.events = vec![EventEntry { text: "Climbing @gym".into(), activity_type: None }];
        build_rows(&[monday, tuesday])
    }

    #[test]
    fn test_search_fields() {
        let rows = rows();
        assert_eq!(apply_search(&rows, "alice").len(), 1);
        assert_eq!(apply_search(&rows, "EXTRA EGG").len(), 1);
        assert_eq!(apply_search(&rows, "oolong")[0].day_of_week, "Tuesday");
        assert_eq!(apply_search(&rows, "gym").len(), 1);
        assert_eq!(apply_search(&rows, "2024-01-0").len(), 2);
        assert_eq!(apply_search(&rows, "monday").len(), 1);
        assert!(apply_search(&rows, "sushi").is_empty());
    }

    #[test]
    fn test_blank_search_restores_everything() {
        let rows = rows();
        let narrowed = apply_search(&rows, "ramen");
        assert_eq!(narrowed.len(), 1);
        assert_eq!(apply_search(&rows, ""), rows);
        assert_eq!(apply_search(&rows, "   "), rows);
        assert!(matches_search(&rows[1], ""));
    }
}
