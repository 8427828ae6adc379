//! Rendering adapters
//!
//! The aggregator hands out `DayRow`s; a renderer turns them into
//! whatever the UI layer consumes.

use chrono::NaiveDate;

use shared::date::{DayKind, format_date};
use shared::models::MealTime;

use crate::aggregator::{DayRow, EVENT_SLOTS, MEAL_SLOTS, MealCell};

/// Turns built rows into a UI-specific output
pub trait GridRenderer {
    type Output;

    fn render(&self, rows: &[DayRow]) -> Self::Output;
}

/// Column headers of the daily grid, in display order
pub fn column_headers() -> Vec<String> {
    let mut headers = vec!["Date".to_string(), "Day".to_string()];
    for time in MealTime::ALL {
        let label = capitalize(time.as_str());
        headers.extend((1..=MEAL_SLOTS).map(|slot| format!("{} {}", label, slot)));
    }
    headers.push("Drinks".to_string());
    headers.extend((1..=EVENT_SLOTS).map(|slot| format!("Event {}", slot)));
    headers
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Highlight class of the date and day cells, e.g. `day-saturday`
pub fn day_class(row: &DayRow, today: NaiveDate) -> Option<String> {
    DayKind::classify(row.date, today)
        .class_suffix()
        .map(|suffix| format!("day-{}", suffix))
}

/// Tab-separated table with a header line, one line per day
#[derive(Debug, Clone, Copy, Default)]
pub struct TextGridRenderer;

impl TextGridRenderer {
    fn cells(row: &DayRow) -> Vec<String> {
        let mut cells = vec![format_date(row.date), row.day_of_week.clone()];
        for time in MealTime::ALL {
            cells.extend(row.slots(time).iter().map(|slot| {
                slot.as_ref().map(|cell: &MealCell| cell.text.clone()).unwrap_or_default()
            }));
        }
        cells.push(row.drinks.clone());
        cells.extend((0..EVENT_SLOTS).map(|i| row.event(i).map(|e| e.text.clone()).unwrap_or_default()));
        cells.into_iter().map(|cell| sanitize(&cell)).collect()
    }
}

/// Tabs and newlines would break the table
fn sanitize(cell: &str) -> String {
    cell.replace(['\t', '\n', '\r'], " ")
}

impl GridRenderer for TextGridRenderer {
    type Output = String;

    fn render(&self, rows: &[DayRow]) -> String {
        let mut lines = vec![column_headers().join("\t")];
        lines.extend(rows.iter().map(|row| Self::cells(row).join("\t")));
        lines.join("\n")
    }
}
