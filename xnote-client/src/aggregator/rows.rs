//! Display rows
//!
//! One `DayRow` per summary day, shaped to the fixed columns of the
//! calendar grid.

use chrono::NaiveDate;
use serde::Serialize;

use shared::models::{DailySummary, EventEntry, MealEntry, MealTime};
use shared::people_display;

use super::merge::{display_text, merge_meals};

/// Display slots per meal time
pub const MEAL_SLOTS: usize = 2;

/// Event columns of the grid
pub const EVENT_SLOTS: usize = 10;

/// One merged meal in a display slot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealCell {
    /// Every meal id behind this cell, for batch delete
    pub ids: Vec<i32>,
    pub name: String,
    /// Rendered attendee list ("" for the household pair)
    pub people: String,
    pub notes: Option<String>,
    pub meal_type: Option<String>,
    /// Full cell text, `people name (notes)`
    pub text: String,
}

impl MealCell {
    fn from_entry(entry: MealEntry) -> Self {
        let text = display_text(&entry);
        Self {
            people: people_display(&entry.people),
            ids: entry.ids,
            name: entry.name,
            notes: entry.notes,
            meal_type: entry.meal_type,
            text,
        }
    }

    /// Style class, e.g. `meal-type-dine-in`
    pub fn style_class(&self) -> Option<String> {
        self.meal_type
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(|t| format!("meal-type-{}", t))
    }
}

/// One event column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventCell {
    pub text: String,
    pub activity_type: Option<String>,
}

impl EventCell {
    fn from_entry(entry: EventEntry) -> Self {
        Self { text: entry.text, activity_type: entry.activity_type }
    }

    /// Activity type with whitespace runs replaced by `-`
    pub fn style_type(&self) -> Option<String> {
        let activity_type = self.activity_type.as_deref()?;
        let normalized = activity_type.split_whitespace().collect::<Vec<_>>().join("-");
        (!normalized.is_empty()).then_some(normalized)
    }
}

pub type MealSlots = [Option<MealCell>; MEAL_SLOTS];

/// A rendered day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayRow {
    pub date: NaiveDate,
    pub day_of_week: String,
    pub breakfast: MealSlots,
    pub lunch: MealSlots,
    pub dinner: MealSlots,
    /// Merged meals beyond the two slots of their meal time
    pub overflow: Vec<MealCell>,
    /// Drink names joined with ", "
    pub drinks: String,
    pub events: Vec<EventCell>,
}

impl DayRow {
    pub fn slots(&self, time: MealTime) -> &MealSlots {
        match time {
            MealTime::Breakfast => &self.breakfast,
            MealTime::Lunch => &self.lunch,
            MealTime::Dinner => &self.dinner,
        }
    }

    fn slots_mut(&mut self, time: MealTime) -> &mut MealSlots {
        match time {
            MealTime::Breakfast => &mut self.breakfast,
            MealTime::Lunch => &mut self.lunch,
            MealTime::Dinner => &mut self.dinner,
        }
    }

    /// Number of merged meals that have no display slot
    pub fn meals_overflow(&self) -> usize {
        self.overflow.len()
    }

    /// Every merged meal cell, slotted first
    pub fn meal_cells(&self) -> impl Iterator<Item = &MealCell> {
        MealTime::ALL
            .into_iter()
            .flat_map(move |time| self.slots(time).iter().flatten())
            .chain(self.overflow.iter())
    }

    /// Event in column `index`, if any
    pub fn event(&self, index: usize) -> Option<&EventCell> {
        self.events.get(index)
    }
}

/// Build one row per summary, in input order
pub fn build_rows(summaries: &[DailySummary]) -> Vec<DayRow> {
    summaries.iter().map(build_row).collect()
}

fn build_row(summary: &DailySummary) -> DayRow {
    let mut row = DayRow {
        date: summary.date,
        day_of_week: summary.day_of_week.clone(),
        breakfast: Default::default(),
        lunch: Default::default(),
        dinner: Default::default(),
        overflow: Vec::new(),
        drinks: summary.drinks.join(", "),
        events: summary
            .events
            .iter()
            .take(EVENT_SLOTS)
            .cloned()
            .map(EventCell::from_entry)
            .collect(),
    };

    for time in MealTime::ALL {
        let merged = merge_meals(summary.meals(time));
        let mut cells = merged.into_iter().map(MealCell::from_entry);
        for slot in row.slots_mut(time).iter_mut() {
            *slot = cells.next();
        }
        row.overflow.extend(cells);
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meal(id: i32, name: &str, meal_type: &str) -> MealEntry {
        MealEntry {
            ids: vec![id],
            name: name.into(),
            meal_type: Some(meal_type.into()),
            ..Default::default()
        }
    }

    fn day() -> DailySummary {
        DailySummary::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
    }

    #[test]
    fn test_third_meal_overflows() {
        let mut summary = day();
        summary.lunch = vec![
            meal(1, "Lasagne with salad", "cooked"),
            meal(2, "Apple", "manufactured"),
            meal(3, "Sandwich", "takeout"),
        ];
        let row = build_row(&summary);
        assert_eq!(row.lunch[0].as_ref().unwrap().name, "Lasagne with salad");
        assert_eq!(row.lunch[1].as_ref().unwrap().name, "Sandwich");
        assert_eq!(row.meals_overflow(), 1);
        assert_eq!(row.overflow[0].name, "Apple");
        assert!(row.breakfast.iter().all(Option::is_none));
        assert_eq!(row.meal_cells().count(), 3);
    }

    #[test]
    fn test_drinks_and_events() {
        let mut summary = day();
        summary.drinks = vec!["Coffee".into(), "Tea".into()];
        summary.events = (0..12)
            .map(|i| EventEntry { text: format!("e{}", i), activity_type: Some("board game".into()) })
            .collect();
        let row = build_row(&summary);
        assert_eq!(row.drinks, "Coffee, Tea");
        assert_eq!(row.events.len(), EVENT_SLOTS);
        assert_eq!(row.event(0).unwrap().style_type().as_deref(), Some("board-game"));
        assert!(row.event(10).is_none());
    }

    #[test]
    fn test_style_class() {
        let cell = MealCell::from_entry(meal(1, "Pho", "dine-in"));
        assert_eq!(cell.style_class().as_deref(), Some("meal-type-dine-in"));
        assert_eq!(cell.text, "Pho");
    }
}
