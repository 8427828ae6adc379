//! Form state contract
//!
//! Each entity kind has one plain struct holding the modal's field values.
//! The struct knows how to start from defaults or from a fetched record,
//! which fields are filled, and how to become request payloads.

use std::fmt;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;

use shared::ValidationErrors;

use super::descriptor::EntityDescriptor;
use super::reference::ReferenceData;
use crate::api::XnoteApi;
use crate::{ClientError, ClientResult};

/// Identity of the record an edit modal addresses
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordKey {
    Id(i32),
    Name(String),
}

impl RecordKey {
    pub fn id(&self) -> Option<i32> {
        match self {
            Self::Id(id) => Some(*id),
            Self::Name(_) => None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Id(_) => None,
            Self::Name(name) => Some(name),
        }
    }

    /// The numeric id, or `NotFound` for a name key
    pub fn require_id(&self) -> ClientResult<i32> {
        self.id()
            .ok_or_else(|| ClientError::NotFound(format!("no record with id {}", self)))
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{}", id),
            Self::Name(name) => f.write_str(name),
        }
    }
}

impl From<i32> for RecordKey {
    fn from(id: i32) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for RecordKey {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for RecordKey {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

/// Field values of one entity modal
#[async_trait]
pub trait EntityForm: Clone + Send + Sync + 'static {
    /// What an edit fetches to pre-fill the form
    type Record: Send;
    /// Create/update request body
    type Payload: Serialize + Send + Sync;

    fn descriptor() -> &'static EntityDescriptor;

    /// Values of a fresh create modal
    fn defaults(refs: &ReferenceData, today: NaiveDate) -> Self;

    async fn fetch_record(api: &XnoteApi, key: &RecordKey) -> ClientResult<Self::Record>;

    fn from_record(record: Self::Record) -> Self;

    /// Whether a field counts as filled for the required check
    fn is_filled(&self, field: &str) -> bool;

    /// Checks beyond required fields
    fn extra_errors(&self) -> ValidationErrors {
        ValidationErrors::new()
    }

    /// Name compared against existing records for duplicates
    fn candidate_name(&self) -> Option<String> {
        None
    }

    /// Selected values of the multi-item field
    fn sub_item_count(&self) -> usize {
        1
    }

    /// One payload per selected sub-item
    fn payloads(
        &self,
        refs: &ReferenceData,
        default_people: &[String],
    ) -> Result<Vec<Self::Payload>, ValidationErrors>;

    /// Drop whatever ties the values to the record being edited
    fn detach(&mut self) {}

    /// Required fields, then entity-specific checks, all messages collected
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for field in Self::descriptor().required_fields() {
            if !self.is_filled(field.name) {
                errors.push(field.name, format!("{} is required", field.label));
            }
        }
        errors.extend(self.extra_errors());
        errors.into_result()
    }
}

/// Trimmed text, `None` when blank
pub(crate) fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

pub(crate) fn filled(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Error for a field that validation should already have rejected
pub(crate) fn missing(field: &str, label: &str) -> ValidationErrors {
    ValidationErrors::single(field, format!("{} is required", label))
}
