//! Mutation response bodies
//!
//! Create/update/delete endpoints answer with loosely shaped JSON
//! (`{"id": 3, "message": "..."}`, the created enum entry, or nothing).

use serde::{Deserialize, Serialize};

/// Body of a create/update/delete response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MutationResponse {
    pub id: Option<i32>,
    pub name: Option<String>,
    pub message: Option<String>,
}
