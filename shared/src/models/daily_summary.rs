//! Daily Summary Model
//!
//! Read-only per-day aggregate served by `daily-summary`. The server has
//! shipped several shapes for the nested entries over time, so the
//! deserializers accept each of them.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::MealTime;

/// One meal entry of a day (before client-side merging)
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MealEntry {
    pub ids: Vec<i32>,
    pub name: String,
    /// Attendee names, in server order
    pub people: Vec<String>,
    pub notes: Option<String>,
    /// Meal type, e.g. "cooked"
    #[serde(rename = "type")]
    pub meal_type: Option<String>,
}

/// Plain strings are pre-rendered meal texts from older servers
impl<'de> Deserialize<'de> for MealEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Object {
            #[serde(default)]
            ids: Vec<i32>,
            #[serde(default)]
            name: String,
            #[serde(default, deserialize_with = "deserialize_people")]
            people: Vec<String>,
            #[serde(default)]
            notes: Option<String>,
            #[serde(default, rename = "type")]
            meal_type: Option<String>,
        }

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Text(String),
            Object(Object),
        }

        Ok(match Wire::deserialize(deserializer)? {
            Wire::Text(name) => MealEntry { name, ..Default::default() },
            Wire::Object(o) => MealEntry {
                ids: o.ids,
                name: o.name,
                people: o.people,
                notes: o.notes,
                meal_type: o.meal_type,
            },
        })
    }
}

impl MealEntry {
    /// Notes with blank values treated as absent
    pub fn notes_text(&self) -> Option<&str> {
        self.notes.as_deref().filter(|n| !n.trim().is_empty())
    }
}

/// One event entry of a day
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct EventEntry {
    pub text: String,
    /// Activity type name
    #[serde(rename = "type")]
    pub activity_type: Option<String>,
}

impl<'de> Deserialize<'de> for EventEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Text(String),
            Object {
                #[serde(default)]
                text: String,
                #[serde(default, rename = "type")]
                activity_type: Option<String>,
            },
        }

        Ok(match Wire::deserialize(deserializer)? {
            Wire::Text(text) => EventEntry { text, activity_type: None },
            Wire::Object { text, activity_type } => EventEntry { text, activity_type },
        })
    }
}

/// Per-day summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    #[serde(default)]
    pub day_of_week: String,
    #[serde(default)]
    pub breakfast: Vec<MealEntry>,
    #[serde(default)]
    pub lunch: Vec<MealEntry>,
    #[serde(default)]
    pub dinner: Vec<MealEntry>,
    #[serde(default, deserialize_with = "deserialize_drinks")]
    pub drinks: Vec<String>,
    #[serde(default)]
    pub events: Vec<EventEntry>,
}

impl DailySummary {
    /// An empty day
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            day_of_week: date.format("%A").to_string(),
            breakfast: Vec::new(),
            lunch: Vec::new(),
            dinner: Vec::new(),
            drinks: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn meals(&self, time: MealTime) -> &[MealEntry] {
        match time {
            MealTime::Breakfast => &self.breakfast,
            MealTime::Lunch => &self.lunch,
            MealTime::Dinner => &self.dinner,
        }
    }

    pub fn meals_mut(&mut self, time: MealTime) -> &mut Vec<MealEntry> {
        match time {
            MealTime::Breakfast => &mut self.breakfast,
            MealTime::Lunch => &mut self.lunch,
            MealTime::Dinner => &mut self.dinner,
        }
    }
}

/// Query parameters of `daily-summary`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummaryQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PeopleWire {
    Joined(String),
    List(Vec<PersonWire>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PersonWire {
    Name(String),
    Object { name: String },
}

/// People as `"xx, ww"`, `["xx", "ww"]` or `[{"name": "xx"}]`
fn deserialize_people<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let wire = Option::<PeopleWire>::deserialize(deserializer)?;
    let names = match wire {
        None => Vec::new(),
        Some(PeopleWire::Joined(joined)) => joined
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect(),
        Some(PeopleWire::List(list)) => list
            .into_iter()
            .map(|p| match p {
                PersonWire::Name(name) | PersonWire::Object { name } => name,
            })
            .filter(|name| !name.trim().is_empty())
            .collect(),
    };
    Ok(names)
}

/// Drinks as plain names or `{"name": ..}` objects
fn deserialize_drinks<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let list = Option::<Vec<PersonWire>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(list
        .into_iter()
        .map(|d| match d {
            PersonWire::Name(name) | PersonWire::Object { name } => name,
        })
        .collect())
}
