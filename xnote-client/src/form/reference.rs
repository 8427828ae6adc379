//! Reference data for form dropdowns

use std::future::Future;

use shared::models::{Activity, NamedEntry, Person, Product, Recipe, ReferenceKind, Restaurant};
use shared::people::unique_ids;
use shared::resolve_default_people;

use crate::api::XnoteApi;
use crate::ClientResult;

/// Option lists shown by the entity forms
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceData {
    pub people: Vec<Person>,
    pub locations: Vec<NamedEntry>,
    pub restaurants: Vec<Restaurant>,
    pub recipes: Vec<Recipe>,
    pub products: Vec<Product>,
    pub activities: Vec<Activity>,
    pub drink_options: Vec<NamedEntry>,
    pub food_types: Vec<NamedEntry>,
    pub activity_types: Vec<NamedEntry>,
}

impl ReferenceData {
    /// Load every list. A list that fails to load is left empty so the
    /// modal still opens.
    pub async fn load(api: &XnoteApi) -> Self {
        Self {
            people: or_empty("people", api.people()).await,
            locations: or_empty("locations", api.reference_list(ReferenceKind::Location)).await,
            restaurants: or_empty("restaurants", api.restaurants()).await,
            recipes: or_empty("recipes", api.recipes()).await,
            products: or_empty("products", api.products()).await,
            activities: or_empty("activities", api.activities()).await,
            drink_options: or_empty("drink options", api.reference_list(ReferenceKind::DrinkOption))
                .await,
            food_types: or_empty("food types", api.reference_list(ReferenceKind::FoodType)).await,
            activity_types: or_empty(
                "activity types",
                api.reference_list(ReferenceKind::ActivityType),
            )
            .await,
        }
    }

    /// Attendee ids for a payload: the selection when there is one,
    /// otherwise the default names resolved against `people`
    pub fn attendees<S: AsRef<str>>(&self, selected: &[i32], defaults: &[S]) -> Vec<i32> {
        if selected.is_empty() {
            resolve_default_people(&self.people, defaults)
        } else {
            unique_ids(selected)
        }
    }

    pub fn person_name(&self, id: i32) -> Option<&str> {
        self.people.iter().find(|p| p.id == id).map(|p| p.name.as_str())
    }
}

async fn or_empty<T>(what: &str, fetch: impl Future<Output = ClientResult<Vec<T>>>) -> Vec<T> {
    match fetch.await {
        Ok(list) => list,
        Err(e) => {
            tracing::warn!(list = what, "Failed to load reference list, showing none: {}", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attendees_fall_back_to_defaults() {
        let refs = ReferenceData {
            people: vec![
                Person { id: 1, name: "xx".into(), notes: None },
                Person { id: 2, name: "ww".into(), notes: None },
                Person { id: 3, name: "alice".into(), notes: None },
            ],
            ..Default::default()
        };
        assert_eq!(refs.attendees(&[], &["xx", "ww"]), vec![1, 2]);
        assert_eq!(refs.attendees(&[3, 3, 1], &["xx", "ww"]), vec![3, 1]);
        assert_eq!(refs.attendees::<&str>(&[], &["nobody"]), Vec::<i32>::new());
        assert_eq!(refs.person_name(3), Some("alice"));
    }
}
