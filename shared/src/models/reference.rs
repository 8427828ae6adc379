//! Reference enums
//!
//! Name-keyed lookup lists (locations, food types, drink options,
//! activity types). The name is the primary key and the path segment;
//! there is no rename endpoint.

use serde::{Deserialize, Serialize};

/// A single reference-enum entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamedEntry {
    pub name: String,
}

impl NamedEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// The four reference-enum resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    Location,
    FoodType,
    DrinkOption,
    ActivityType,
}

impl ReferenceKind {
    /// REST resource segment under the API prefix
    pub fn resource(&self) -> &'static str {
        match self {
            Self::Location => "locations",
            Self::FoodType => "food-types",
            Self::DrinkOption => "drink-options",
            Self::ActivityType => "activity-types",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Location => "Location",
            Self::FoodType => "Food Type",
            Self::DrinkOption => "Drink Option",
            Self::ActivityType => "Activity Type",
        }
    }
}
