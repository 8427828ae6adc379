//! Event Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Event entity (one logged activity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i32,
    pub date: NaiveDate,
    pub activity_id: i32,
    #[serde(default)]
    pub measure: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub people_ids: Vec<i32>,
}

/// Create event payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventCreate {
    pub date: NaiveDate,
    pub activity_id: i32,
    pub measure: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub people_ids: Vec<i32>,
}
