//! Reference-enum modals
//!
//! Locations, food types, drink options and activity types are a bare
//! name. The name is also the key, so editing one means creating the new
//! name and deleting the old.

use std::marker::PhantomData;

use async_trait::async_trait;
use chrono::NaiveDate;

use shared::ValidationErrors;
use shared::models::{NamedEntry, ReferenceKind};

use crate::api::XnoteApi;
use crate::form::descriptor::{
    ACTIVITY_TYPE, DRINK_OPTION, EntityDescriptor, FOOD_TYPE, LOCATION,
};
use crate::form::entity::{EntityForm, RecordKey, filled, non_blank};
use crate::form::reference::ReferenceData;
use crate::{ClientError, ClientResult};

/// Type-level tag of one reference enum
pub trait ReferenceEnum: std::fmt::Debug + Clone + Send + Sync + 'static {
    const KIND: ReferenceKind;

    fn descriptor() -> &'static EntityDescriptor;
}

macro_rules! reference_enum {
    ($tag:ident, $kind:expr, $descriptor:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $tag;

        impl ReferenceEnum for $tag {
            const KIND: ReferenceKind = $kind;

            fn descriptor() -> &'static EntityDescriptor {
                &$descriptor
            }
        }
    };
}

reference_enum!(LocationEnum, ReferenceKind::Location, LOCATION);
reference_enum!(FoodTypeEnum, ReferenceKind::FoodType, FOOD_TYPE);
reference_enum!(DrinkOptionEnum, ReferenceKind::DrinkOption, DRINK_OPTION);
reference_enum!(ActivityTypeEnum, ReferenceKind::ActivityType, ACTIVITY_TYPE);

/// Modal of a name-keyed enum
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceForm<K> {
    pub name: String,
    kind: PhantomData<K>,
}

impl<K: ReferenceEnum> ReferenceForm<K> {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), kind: PhantomData }
    }

    pub fn kind(&self) -> ReferenceKind {
        K::KIND
    }
}

pub type LocationForm = ReferenceForm<LocationEnum>;
pub type FoodTypeForm = ReferenceForm<FoodTypeEnum>;
pub type DrinkOptionForm = ReferenceForm<DrinkOptionEnum>;
pub type ActivityTypeForm = ReferenceForm<ActivityTypeEnum>;

#[async_trait]
impl<K: ReferenceEnum> EntityForm for ReferenceForm<K> {
    type Record = NamedEntry;
    type Payload = NamedEntry;

    fn descriptor() -> &'static EntityDescriptor {
        K::descriptor()
    }

    fn defaults(_refs: &ReferenceData, _today: NaiveDate) -> Self {
        Self::new("")
    }

    /// The key already is the whole record
    async fn fetch_record(_api: &XnoteApi, key: &RecordKey) -> ClientResult<NamedEntry> {
        key.name()
            .map(NamedEntry::new)
            .ok_or_else(|| ClientError::NotFound(format!("no {} named {}", K::KIND.label(), key)))
    }

    fn from_record(entry: NamedEntry) -> Self {
        Self::new(entry.name)
    }

    fn is_filled(&self, field: &str) -> bool {
        field == "name" && filled(&self.name)
    }

    fn candidate_name(&self) -> Option<String> {
        non_blank(&self.name)
    }

    fn payloads(&self, _: &ReferenceData, _: &[String]) -> Result<Vec<NamedEntry>, ValidationErrors> {
        Ok(vec![NamedEntry::new(self.name.trim())])
    }
}
