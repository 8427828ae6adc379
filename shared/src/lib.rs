//! Shared types for XNote
//!
//! Wire models of the REST API, validation errors, the people-display
//! rule and local-date helpers. Used by every XNote client.

pub mod date;
pub mod error;
pub mod models;
pub mod people;

// Re-exports
pub use error::{FieldError, ValidationErrors};
pub use people::{people_display, resolve_default_people, DEFAULT_HOUSEHOLD};
pub use serde::{Deserialize, Serialize};
