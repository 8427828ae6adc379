use async_trait::async_trait;
use chrono::NaiveDate;

use shared::ValidationErrors;
use shared::models::{Person, PersonCreate};

use crate::api::{Resource, XnoteApi};
use crate::form::descriptor::{EntityDescriptor, PERSON};
use crate::form::entity::{EntityForm, RecordKey, filled, non_blank};
use crate::form::reference::ReferenceData;
use crate::ClientResult;

/// Person modal
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonForm {
    pub name: String,
    pub notes: String,
}

impl PersonForm {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }
}

#[async_trait]
impl EntityForm for PersonForm {
    type Record = Person;
    type Payload = PersonCreate;

    fn descriptor() -> &'static EntityDescriptor {
        &PERSON
    }

    fn defaults(_refs: &ReferenceData, _today: NaiveDate) -> Self {
        Self::default()
    }

    async fn fetch_record(api: &XnoteApi, key: &RecordKey) -> ClientResult<Person> {
        api.fetch(Resource::People, key.require_id()?).await
    }

    fn from_record(person: Person) -> Self {
        Self {
            name: person.name,
            notes: person.notes.unwrap_or_default(),
        }
    }

    fn is_filled(&self, field: &str) -> bool {
        match field {
            "name" => filled(&self.name),
            "notes" => filled(&self.notes),
            _ => false,
        }
    }

    fn candidate_name(&self) -> Option<String> {
        non_blank(&self.name)
    }

    fn payloads(
        &self,
        _refs: &ReferenceData,
        _default_people: &[String],
    ) -> Result<Vec<PersonCreate>, ValidationErrors> {
        Ok(vec![PersonCreate {
            name: self.name.trim().to_string(),
            notes: non_blank(&self.notes),
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_name_rejected() {
        let errors = PersonForm::new("   ").validate().unwrap_err();
        assert_eq!(errors.messages(), vec!["Person name is required"]);
    }

    #[test]
    fn test_payload_trims() {
        let form = PersonForm { name: " alice ".into(), notes: "  ".into() };
        let payloads = form.payloads(&ReferenceData::default(), &[]).unwrap();
        assert_eq!(payloads, vec![PersonCreate { name: "alice".into(), notes: None }]);
    }
}
