//! Meal modal
//!
//! One submission may select several recipes, products or restaurants;
//! each becomes its own meal sharing date, time, notes and people.

use async_trait::async_trait;
use chrono::NaiveDate;

use shared::ValidationErrors;
use shared::models::{FoodSource, FoodSourceKind, MealCreate, MealDetail, MealTime, MealType};
use shared::people::unique_ids;

use crate::api::XnoteApi;
use crate::form::descriptor::{EntityDescriptor, MEAL};
use crate::form::entity::{EntityForm, RecordKey, filled, missing, non_blank};
use crate::form::reference::ReferenceData;
use crate::ClientResult;

#[derive(Debug, Clone, PartialEq)]
pub struct MealForm {
    pub date: Option<NaiveDate>,
    pub time: MealTime,
    pub source_kind: Option<FoodSourceKind>,
    /// Selected recipe/product/restaurant ids, in selection order
    pub source_ids: Vec<i32>,
    pub meal_type: MealType,
    pub notes: String,
    pub people_ids: Vec<i32>,
}

impl MealForm {
    /// Select the food items of one source kind
    pub fn select_sources(&mut self, kind: FoodSourceKind, ids: impl IntoIterator<Item = i32>) {
        self.source_kind = Some(kind);
        self.source_ids = ids.into_iter().collect();
    }
}

#[async_trait]
impl EntityForm for MealForm {
    type Record = MealDetail;
    type Payload = MealCreate;

    fn descriptor() -> &'static EntityDescriptor {
        &MEAL
    }

    fn defaults(_refs: &ReferenceData, today: NaiveDate) -> Self {
        Self {
            date: Some(today),
            time: MealTime::Lunch,
            source_kind: None,
            source_ids: Vec::new(),
            meal_type: MealType::default(),
            notes: String::new(),
            people_ids: Vec::new(),
        }
    }

    async fn fetch_record(api: &XnoteApi, key: &RecordKey) -> ClientResult<MealDetail> {
        api.meal_details(key.require_id()?).await
    }

    fn from_record(meal: MealDetail) -> Self {
        let source = meal.food_source.as_ref().map(|s| s.to_food_source());
        Self {
            date: Some(meal.date),
            time: meal.time,
            source_kind: source.map(|s| s.kind()),
            source_ids: source.map(|s| s.source_id()).into_iter().collect(),
            meal_type: source.map(|s| s.meal_type()).unwrap_or_default(),
            notes: meal.notes.unwrap_or_default(),
            people_ids: meal.people.iter().map(|p| p.id).collect(),
        }
    }

    fn is_filled(&self, field: &str) -> bool {
        match field {
            "date" => self.date.is_some(),
            "time" | "meal_type" => true,
            "food_source" => self.source_kind.is_some() && !self.source_ids.is_empty(),
            "notes" => filled(&self.notes),
            "people" => !self.people_ids.is_empty(),
            _ => false,
        }
    }

    fn sub_item_count(&self) -> usize {
        unique_ids(&self.source_ids).len()
    }

    fn payloads(
        &self,
        refs: &ReferenceData,
        default_people: &[String],
    ) -> Result<Vec<MealCreate>, ValidationErrors> {
        let date = self.date.ok_or_else(|| missing("date", "Date"))?;
        let kind = self.source_kind.ok_or_else(|| missing("food_source", "Food item"))?;
        let sources = unique_ids(&self.source_ids);
        if sources.is_empty() {
            return Err(missing("food_source", "Food item"));
        }

        let people_ids = refs.attendees(&self.people_ids, default_people);
        let notes = non_blank(&self.notes);
        Ok(sources
            .into_iter()
            .map(|id| MealCreate {
                date,
                time: self.time,
                food_source: FoodSource::new(kind, id, self.meal_type),
                notes: notes.clone(),
                people_ids: people_ids.clone(),
            })
            .collect())
    }
}
