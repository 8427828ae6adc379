//! Restaurant Model

use serde::{Deserialize, Serialize};

/// Restaurant entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    /// Food type name
    #[serde(rename = "type")]
    pub food_type: String,
    #[serde(default)]
    pub price: Option<f64>,
}

/// Create restaurant payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantCreate {
    pub name: String,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub food_type: String,
    pub price: Option<f64>,
}
