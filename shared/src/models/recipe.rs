//! Recipe Model

use serde::{Deserialize, Serialize};

/// Recipe entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub ingredients: String,
    #[serde(default)]
    pub procedure: String,
    #[serde(default)]
    pub cautions: Option<String>,
}

/// Create recipe payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeCreate {
    pub name: String,
    pub ingredients: String,
    pub procedure: String,
    pub cautions: Option<String>,
}
