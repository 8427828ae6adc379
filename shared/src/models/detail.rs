//! Detail views
//!
//! Resolved/nested records returned by `meals/:id/details`,
//! `events/:id/details` and `drinks/:id/details`, used to pre-fill the
//! edit forms.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{
    FoodSource, FoodSourceKind, MealTime, MealType, Person, Product, Recipe, Restaurant,
};

/// Meal with its food source and people resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealDetail {
    pub id: i32,
    pub date: NaiveDate,
    pub time: MealTime,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub food_source: Option<MealFoodSourceDetail>,
    #[serde(default)]
    pub people: Vec<Person>,
}

/// Resolved food source, `{"type": "recipe", "details": {"recipe": {..}, "meal_type": ".."}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details", rename_all = "lowercase")]
pub enum MealFoodSourceDetail {
    Recipe { recipe: Recipe, meal_type: MealType },
    Product { product: Product, meal_type: MealType },
    Restaurant { restaurant: Restaurant, meal_type: MealType },
}

impl MealFoodSourceDetail {
    pub fn kind(&self) -> FoodSourceKind {
        match self {
            Self::Recipe { .. } => FoodSourceKind::Recipe,
            Self::Product { .. } => FoodSourceKind::Product,
            Self::Restaurant { .. } => FoodSourceKind::Restaurant,
        }
    }

    /// Display name of the resolved source entity
    pub fn name(&self) -> &str {
        match self {
            Self::Recipe { recipe, .. } => &recipe.name,
            Self::Product { product, .. } => &product.name,
            Self::Restaurant { restaurant, .. } => &restaurant.name,
        }
    }

    /// Collapse back into the id-based wire form
    pub fn to_food_source(&self) -> FoodSource {
        match self {
            Self::Recipe { recipe, meal_type } => FoodSource::new(self.kind(), recipe.id, *meal_type),
            Self::Product { product, meal_type } => {
                FoodSource::new(self.kind(), product.id, *meal_type)
            }
            Self::Restaurant { restaurant, meal_type } => {
                FoodSource::new(self.kind(), restaurant.id, *meal_type)
            }
        }
    }
}

/// Activity as nested in an event detail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityDetail {
    pub id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub activity_type: String,
}

/// Event with activity and people resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDetail {
    pub id: i32,
    pub date: NaiveDate,
    pub activity: ActivityDetail,
    #[serde(default)]
    pub measure: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub people: Vec<Person>,
}

/// Drink with people resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrinkDetail {
    pub id: i32,
    pub name: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub people: Vec<Person>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meal_detail_parse() {
        let detail: MealDetail = serde_json::from_value(serde_json::json!({
            "id": 4,
            "date": "2024-01-01",
            "time": "lunch",
            "notes": null,
            "food_source": {
                "type": "recipe",
                "details": {
                    "recipe": {"id": 9, "name": "Eggs", "ingredients": "eggs", "procedure": "fry", "cautions": null},
                    "meal_type": "cooked"
                }
            },
            "people": [{"id": 1, "name": "xx", "notes": null}]
        }))
        .unwrap();

        let source = detail.food_source.as_ref().unwrap();
        assert_eq!(source.name(), "Eggs");
        assert_eq!(
            source.to_food_source(),
            FoodSource::Recipe { recipe_id: 9, meal_type: MealType::Cooked }
        );
        assert_eq!(detail.people.len(), 1);
    }
}
