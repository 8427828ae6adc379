//! Drink Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Drink entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drink {
    pub id: i32,
    pub date: NaiveDate,
    /// Drink option name
    pub name: String,
    #[serde(default)]
    pub people_ids: Vec<i32>,
}

/// Create drink payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrinkCreate {
    pub date: NaiveDate,
    pub name: String,
    pub people_ids: Vec<i32>,
}
