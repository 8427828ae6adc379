use async_trait::async_trait;
use chrono::NaiveDate;

use shared::ValidationErrors;
use shared::models::{EventCreate, EventDetail};

use crate::api::XnoteApi;
use crate::form::descriptor::{EVENT, EntityDescriptor};
use crate::form::entity::{EntityForm, RecordKey, filled, missing, non_blank};
use crate::form::reference::ReferenceData;
use crate::ClientResult;

/// Event modal
#[derive(Debug, Clone, PartialEq)]
pub struct EventForm {
    pub date: Option<NaiveDate>,
    pub activity_id: Option<i32>,
    pub measure: String,
    /// Location name
    pub location: String,
    pub notes: String,
    pub people_ids: Vec<i32>,
}

#[async_trait]
impl EntityForm for EventForm {
    type Record = EventDetail;
    type Payload = EventCreate;

    fn descriptor() -> &'static EntityDescriptor {
        &EVENT
    }

    fn defaults(_refs: &ReferenceData, today: NaiveDate) -> Self {
        Self {
            date: Some(today),
            activity_id: None,
            measure: String::new(),
            location: String::new(),
            notes: String::new(),
            people_ids: Vec::new(),
        }
    }

    async fn fetch_record(api: &XnoteApi, key: &RecordKey) -> ClientResult<EventDetail> {
        api.event_details(key.require_id()?).await
    }

    fn from_record(event: EventDetail) -> Self {
        Self {
            date: Some(event.date),
            activity_id: Some(event.activity.id),
            measure: event.measure.unwrap_or_default(),
            location: event.location.unwrap_or_default(),
            notes: event.notes.unwrap_or_default(),
            people_ids: event.people.iter().map(|p| p.id).collect(),
        }
    }

    fn is_filled(&self, field: &str) -> bool {
        match field {
            "date" => self.date.is_some(),
            "activity" => self.activity_id.is_some(),
            "measure" => filled(&self.measure),
            "location" => filled(&self.location),
            "notes" => filled(&self.notes),
            "people" => !self.people_ids.is_empty(),
            _ => false,
        }
    }

    fn payloads(
        &self,
        refs: &ReferenceData,
        default_people: &[String],
    ) -> Result<Vec<EventCreate>, ValidationErrors> {
        Ok(vec![EventCreate {
            date: self.date.ok_or_else(|| missing("date", "Date"))?,
            activity_id: self.activity_id.ok_or_else(|| missing("activity", "Activity"))?,
            measure: non_blank(&self.measure),
            location: non_blank(&self.location),
            notes: non_blank(&self.notes),
            people_ids: refs.attendees(&self.people_ids, default_people),
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_required() {
        let form = EventForm::defaults(&ReferenceData::default(), NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(form.validate().unwrap_err().messages(), vec!["Activity is required"]);
    }

    #[test]
    fn test_unresolved_household_is_omitted() {
        let mut form = EventForm::defaults(&ReferenceData::default(), NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        form.activity_id = Some(3);
        form.measure = "5 km".into();
        let payload = &form.payloads(&ReferenceData::default(), &["xx".into(), "ww".into()]).unwrap()[0];
        assert!(payload.people_ids.is_empty());
        assert_eq!(payload.measure.as_deref(), Some("5 km"));
        assert_eq!(payload.location, None);
    }
}
