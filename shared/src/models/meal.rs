//! Meal Model

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Meal time slot of a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealTime {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealTime {
    pub const ALL: [MealTime; 3] = [MealTime::Breakfast, MealTime::Lunch, MealTime::Dinner];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
        }
    }
}

impl fmt::Display for MealTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealTime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(Self::Breakfast),
            "lunch" => Ok(Self::Lunch),
            "dinner" => Ok(Self::Dinner),
            other => Err(format!("Unknown meal time: {}", other)),
        }
    }
}

/// How the food of a meal was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MealType {
    #[default]
    Cooked,
    DineIn,
    Takeout,
    Manufactured,
    Leftover,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cooked => "cooked",
            Self::DineIn => "dine-in",
            Self::Takeout => "takeout",
            Self::Manufactured => "manufactured",
            Self::Leftover => "leftover",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cooked" => Ok(Self::Cooked),
            "dine-in" => Ok(Self::DineIn),
            "takeout" => Ok(Self::Takeout),
            "manufactured" => Ok(Self::Manufactured),
            "leftover" => Ok(Self::Leftover),
            other => Err(format!("Unknown meal type: {}", other)),
        }
    }
}

/// Discriminant of a food source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodSourceKind {
    Recipe,
    Product,
    Restaurant,
}

impl FoodSourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Recipe => "recipe",
            Self::Product => "product",
            Self::Restaurant => "restaurant",
        }
    }
}

/// Polymorphic origin of a meal.
///
/// Serialized as `{"type": "recipe", "recipe_id": 3, "meal_type": "cooked"}`;
/// the tag and the id field always agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FoodSource {
    Recipe { recipe_id: i32, meal_type: MealType },
    Product { product_id: i32, meal_type: MealType },
    Restaurant { restaurant_id: i32, meal_type: MealType },
}

impl FoodSource {
    pub fn new(kind: FoodSourceKind, id: i32, meal_type: MealType) -> Self {
        match kind {
            FoodSourceKind::Recipe => Self::Recipe { recipe_id: id, meal_type },
            FoodSourceKind::Product => Self::Product { product_id: id, meal_type },
            FoodSourceKind::Restaurant => Self::Restaurant { restaurant_id: id, meal_type },
        }
    }

    pub fn kind(&self) -> FoodSourceKind {
        match self {
            Self::Recipe { .. } => FoodSourceKind::Recipe,
            Self::Product { .. } => FoodSourceKind::Product,
            Self::Restaurant { .. } => FoodSourceKind::Restaurant,
        }
    }

    pub fn source_id(&self) -> i32 {
        match self {
            Self::Recipe { recipe_id, .. } => *recipe_id,
            Self::Product { product_id, .. } => *product_id,
            Self::Restaurant { restaurant_id, .. } => *restaurant_id,
        }
    }

    pub fn meal_type(&self) -> MealType {
        match self {
            Self::Recipe { meal_type, .. }
            | Self::Product { meal_type, .. }
            | Self::Restaurant { meal_type, .. } => *meal_type,
        }
    }
}

/// Meal entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub id: i32,
    pub date: NaiveDate,
    pub time: MealTime,
    pub food_source: FoodSource,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub people_ids: Vec<i32>,
}

/// Create meal payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealCreate {
    pub date: NaiveDate,
    pub time: MealTime,
    pub food_source: FoodSource,
    pub notes: Option<String>,
    pub people_ids: Vec<i32>,
}

/// Bulk delete payload for `meals/batch/delete`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealBatchDelete {
    pub meal_ids: Vec<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_food_source_wire_format() {
        let source = FoodSource::new(FoodSourceKind::Recipe, 7, MealType::Cooked);
        let json = serde_json::to_value(source).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "recipe", "recipe_id": 7, "meal_type": "cooked"})
        );

        let parsed: FoodSource = serde_json::from_value(serde_json::json!({
            "type": "restaurant", "restaurant_id": 2, "meal_type": "dine-in"
        }))
        .unwrap();
        assert_eq!(parsed.kind(), FoodSourceKind::Restaurant);
        assert_eq!(parsed.source_id(), 2);
        assert_eq!(parsed.meal_type(), MealType::DineIn);
    }

    #[test]
    fn test_food_source_rejects_mismatched_id() {
        let result: Result<FoodSource, _> = serde_json::from_value(serde_json::json!({
            "type": "product", "recipe_id": 2, "meal_type": "cooked"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_meal_type_parse() {
        assert_eq!("Dine-In".parse::<MealType>().unwrap(), MealType::DineIn);
        assert!("brunch".parse::<MealTime>().is_err());
    }
}
