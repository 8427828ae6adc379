//! Entity Form Controller
//!
//! One generic create/edit modal lifecycle for every entity kind:
//!
//! - **descriptor**: static per-entity table (fields, target, flags)
//! - **forms**: plain field-value structs, one per entity kind
//! - **controller**: `FormController<F>` state machine and save flow
//! - **duplicate**: similar-name detection before creates
//! - **reference**: dropdown lists loaded when a modal opens
//! - **widgets**: sub-widget handles released on close

pub mod descriptor;
mod controller;
mod duplicate;
mod entity;
mod error;
pub mod forms;
mod reference;
mod widgets;

pub use controller::{CloseReason, FormController, FormState, SaveMode, SaveOutcome};
pub use descriptor::{EntityDescriptor, EntityTarget, FieldSpec, KeyKind};
pub use duplicate::find_potential_duplicates;
pub use entity::{EntityForm, RecordKey};
pub use error::{FormError, FormResult};
pub use forms::*;
pub use reference::ReferenceData;
pub use widgets::SubWidgetRegistry;
