//! Drink modal
//!
//! Several drink options may be picked at once; each becomes one drink.

use async_trait::async_trait;
use chrono::NaiveDate;

use shared::ValidationErrors;
use shared::models::{DrinkCreate, DrinkDetail};

use crate::api::XnoteApi;
use crate::form::descriptor::{DRINK, EntityDescriptor};
use crate::form::entity::{EntityForm, RecordKey, missing};
use crate::form::reference::ReferenceData;
use crate::ClientResult;

#[derive(Debug, Clone, PartialEq)]
pub struct DrinkForm {
    pub date: Option<NaiveDate>,
    /// Selected drink option names
    pub names: Vec<String>,
    pub people_ids: Vec<i32>,
}

impl DrinkForm {
    /// Trimmed, non-blank, first occurrence kept
    fn selected_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for name in self.names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
        names
    }
}

#[async_trait]
impl EntityForm for DrinkForm {
    type Record = DrinkDetail;
    type Payload = DrinkCreate;

    fn descriptor() -> &'static EntityDescriptor {
        &DRINK
    }

    fn defaults(_refs: &ReferenceData, today: NaiveDate) -> Self {
        Self {
            date: Some(today),
            names: Vec::new(),
            people_ids: Vec::new(),
        }
    }

    async fn fetch_record(api: &XnoteApi, key: &RecordKey) -> ClientResult<DrinkDetail> {
        api.drink_details(key.require_id()?).await
    }

    fn from_record(drink: DrinkDetail) -> Self {
        Self {
            date: Some(drink.date),
            names: vec![drink.name],
            people_ids: drink.people.iter().map(|p| p.id).collect(),
        }
    }

    fn is_filled(&self, field: &str) -> bool {
        match field {
            "date" => self.date.is_some(),
            "name" => !self.selected_names().is_empty(),
            "people" => !self.people_ids.is_empty(),
            _ => false,
        }
    }

    fn sub_item_count(&self) -> usize {
        self.selected_names().len()
    }

    fn payloads(
        &self,
        refs: &ReferenceData,
        default_people: &[String],
    ) -> Result<Vec<DrinkCreate>, ValidationErrors> {
        let date = self.date.ok_or_else(|| missing("date", "Date"))?;
        let names = self.selected_names();
        if names.is_empty() {
            return Err(missing("name", "Drink"));
        }
        let people_ids = refs.attendees(&self.people_ids, default_people);
        Ok(names
            .into_iter()
            .map(|name| DrinkCreate { date, name, people_ids: people_ids.clone() })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_deduplicated() {
        let form = DrinkForm {
            date: NaiveDate::from_ymd_opt(2024, 1, 1),
            names: vec!["Tea".into(), " ".into(), "Coffee".into(), "Tea ".into()],
            people_ids: vec![5],
        };
        assert_eq!(form.sub_item_count(), 2);
        let payloads = form.payloads(&ReferenceData::default(), &[]).unwrap();
        let names: Vec<_> = payloads.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Tea", "Coffee"]);
        assert!(payloads.iter().all(|p| p.people_ids == vec![5]));
    }

    #[test]
    fn test_no_drink_selected() {
        let form = DrinkForm { date: None, names: vec![], people_ids: vec![] };
        assert_eq!(
            form.validate().unwrap_err().messages(),
            vec!["Date is required", "Drink is required"]
        );
    }
}
