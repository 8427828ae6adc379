//! Person Model

use serde::{Deserialize, Serialize};

/// Person entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Create person payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonCreate {
    pub name: String,
    pub notes: Option<String>,
}
