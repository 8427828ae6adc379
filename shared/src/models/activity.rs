//! Activity Model

use serde::{Deserialize, Serialize};

/// Activity entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: i32,
    pub name: String,
    /// Activity type name
    #[serde(rename = "type")]
    pub activity_type: String,
}

/// Create activity payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityCreate {
    pub name: String,
    #[serde(rename = "type")]
    pub activity_type: String,
}
