//! Entity list grids
//!
//! Spreadsheet-style views over one resource. `EntityGrid` covers the
//! id-keyed resources: cells edit with a single-field PUT. `ReferenceGrid`
//! covers the name-keyed enums, where renaming is a create plus a delete.
//! Rows delete one request at a time. After any change the grid
//! re-fetches; it never patches its own rows.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::RwLock;

use shared::ValidationErrors;
use shared::models::{Activity, NamedEntry, Person, Product, Recipe, ReferenceKind, Restaurant};

use crate::api::{Resource, XnoteApi};
use crate::form::{FormError, FormResult};
use crate::presenter::{Confirmation, LoadingGuard, Presenter, ToastKind};
use crate::refresh::RefreshTarget;
use crate::ClientResult;

/// A record type shown in an `EntityGrid`
pub trait GridRecord: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const RESOURCE: Resource;

    /// Columns that may not be emptied
    const REQUIRED: &'static [&'static str];

    fn id(&self) -> i32;

    fn name(&self) -> &str;

    /// What else the server deletes along with `count` records
    fn cascade_notice(_count: usize) -> Option<String> {
        None
    }
}

fn this_or_these(count: usize, one: &str, many: &str) -> String {
    if count == 1 { format!("this {}", one) } else { format!("these {}", many) }
}

impl GridRecord for Person {
    const RESOURCE: Resource = Resource::People;
    const REQUIRED: &'static [&'static str] = &["name"];

    fn id(&self) -> i32 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn cascade_notice(count: usize) -> Option<String> {
        Some(format!(
            "This will also delete all related meals, events, and drinks associated with {}.",
            this_or_these(count, "person", "people")
        ))
    }
}

impl GridRecord for Recipe {
    const RESOURCE: Resource = Resource::Recipes;
    const REQUIRED: &'static [&'static str] = &["name", "ingredients", "procedure"];

    fn id(&self) -> i32 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn cascade_notice(count: usize) -> Option<String> {
        Some(format!(
            "This will also delete all related meals that use {}.",
            this_or_these(count, "recipe", "recipes")
        ))
    }
}

impl GridRecord for Product {
    const RESOURCE: Resource = Resource::Products;
    const REQUIRED: &'static [&'static str] = &["name"];

    fn id(&self) -> i32 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn cascade_notice(count: usize) -> Option<String> {
        Some(format!(
            "This will also delete all related meals that use {}.",
            this_or_these(count, "product", "products")
        ))
    }
}

impl GridRecord for Restaurant {
    const RESOURCE: Resource = Resource::Restaurants;
    const REQUIRED: &'static [&'static str] = &["name", "type"];

    fn id(&self) -> i32 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn cascade_notice(count: usize) -> Option<String> {
        Some(format!(
            "This will also delete all related meals that use {}.",
            this_or_these(count, "restaurant", "restaurants")
        ))
    }
}

impl GridRecord for Activity {
    const RESOURCE: Resource = Resource::Activities;
    const REQUIRED: &'static [&'static str] = &["name", "type"];

    fn id(&self) -> i32 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn cascade_notice(count: usize) -> Option<String> {
        Some(format!(
            "This will also delete all related events that use {}.",
            this_or_these(count, "activity", "activities")
        ))
    }
}

/// Rejects empty values in required columns
pub fn validate_cell(required: &[&str], field: &str, value: &Value) -> Result<(), ValidationErrors> {
    let empty = match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    };
    if empty && required.contains(&field) {
        return Err(ValidationErrors::single(field, format!("{} cannot be empty", field)));
    }
    Ok(())
}

/// List view of one resource
pub struct EntityGrid<T: GridRecord> {
    api: XnoteApi,
    presenter: Arc<dyn Presenter>,
    rows: RwLock<Vec<T>>,
    generation: AtomicU64,
}

impl<T: GridRecord> EntityGrid<T> {
    pub fn new(api: XnoteApi, presenter: Arc<dyn Presenter>) -> Self {
        Self {
            api,
            presenter,
            rows: RwLock::new(Vec::new()),
            generation: AtomicU64::new(0),
        }
    }

    /// Fetch all records. On failure the previous rows stay.
    pub async fn load(&self) -> ClientResult<()> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let result = {
            let _loading = LoadingGuard::new(self.presenter.clone());
            self.api.list::<T>(T::RESOURCE).await
        };
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::warn!(resource = T::RESOURCE.path(), "Discarding superseded list response");
            return Ok(());
        }

        match result {
            Ok(rows) => {
                *self.rows.write().await = rows;
                Ok(())
            }
            Err(e) => {
                let operation = format!("load {}", T::RESOURCE.noun(2));
                tracing::error!("Failed to {}: {}", operation, e);
                self.presenter.error(&operation, &e.to_string());
                Err(e)
            }
        }
    }

    pub async fn rows(&self) -> Vec<T> {
        self.rows.read().await.clone()
    }

    pub async fn row(&self, id: i32) -> Option<T> {
        self.rows.read().await.iter().find(|r| r.id() == id).cloned()
    }

    /// Inline edit of one cell.
    ///
    /// Returns `false` when the value did not change. On failure the
    /// cached row keeps its old value.
    pub async fn edit_cell(&self, id: i32, field: &str, value: Value) -> FormResult<bool> {
        let noun = T::RESOURCE.noun(1);
        let operation = format!("update {}", noun);

        if let Err(errors) = validate_cell(T::REQUIRED, field, &value) {
            self.presenter.error(&operation, &errors.to_string());
            return Err(errors.into());
        }

        if let Some(row) = self.row(id).await {
            let current = serde_json::to_value(&row)
                .ok()
                .and_then(|v| v.get(field).cloned())
                .unwrap_or(Value::Null);
            if current == value {
                return Ok(false);
            }
        }

        let result = {
            let _loading = LoadingGuard::new(self.presenter.clone());
            self.api.update_field(T::RESOURCE, id, field, value).await
        };
        match result {
            Ok(_) => {
                self.reload_quietly().await;
                Ok(true)
            }
            Err(e) => {
                tracing::error!(id, field, "Failed to {}: {}", operation, e);
                self.presenter.error(&operation, &e.to_string());
                Err(FormError::network(operation, e))
            }
        }
    }

    /// Delete rows after confirmation, one request at a time.
    ///
    /// Stops at the first failure. Returns how many were deleted; `0` when
    /// the user declined.
    pub async fn remove_rows(&self, ids: &[i32]) -> FormResult<usize> {
        if ids.is_empty() {
            return Ok(0);
        }
        let targets: Vec<(i32, String)> = {
            let rows = self.rows.read().await;
            ids.iter()
                .map(|id| {
                    let name = rows
                        .iter()
                        .find(|r| r.id() == *id)
                        .map(|r| r.name().to_string())
                        .unwrap_or_else(|| format!("#{}", id));
                    (*id, name)
                })
                .collect()
        };

        let count = targets.len();
        let confirmation = Confirmation::CascadeDelete {
            entity: T::RESOURCE.noun(count).to_string(),
            count,
            names: targets.iter().map(|(_, name)| name.clone()).collect(),
            cascade: T::cascade_notice(count),
        };
        if !self.presenter.confirm(&confirmation) {
            return Ok(0);
        }

        let failure = {
            let _loading = LoadingGuard::new(self.presenter.clone());
            let mut failure = None;
            for (index, (id, name)) in targets.iter().enumerate() {
                if let Err(e) = self.api.delete(T::RESOURCE, *id).await {
                    failure = Some((index, name.clone(), e));
                    break;
                }
            }
            failure
        };

        let result = match failure {
            None => {
                self.presenter.toast(
                    &format!("{} {} deleted successfully", count, T::RESOURCE.noun(count)),
                    ToastKind::Success,
                );
                Ok(count)
            }
            Some((index, name, source)) => {
                let operation = format!("delete {} \"{}\"", T::RESOURCE.noun(1), name);
                tracing::error!("Failed to {}: {}", operation, source);
                self.presenter.error(&operation, &source.to_string());
                if index == 0 {
                    Err(FormError::network(operation, source))
                } else {
                    Err(FormError::PartialFailure { completed: index, failed_index: index, source })
                }
            }
        };

        self.reload_quietly().await;
        result
    }

    /// Re-fetch after a mutation; the load reports its own failure
    async fn reload_quietly(&self) {
        if let Err(e) = self.load().await {
            tracing::debug!("Reload after change failed: {}", e);
        }
    }
}

#[async_trait]
impl<T: GridRecord> RefreshTarget for EntityGrid<T> {
    fn name(&self) -> &str {
        T::RESOURCE.path()
    }

    async fn refresh(&self) -> ClientResult<()> {
        self.load().await
    }
}

/// List view of one name-keyed reference enum (locations, drink options, ...)
pub struct ReferenceGrid {
    api: XnoteApi,
    presenter: Arc<dyn Presenter>,
    kind: ReferenceKind,
    rows: RwLock<Vec<NamedEntry>>,
    generation: AtomicU64,
}

impl ReferenceGrid {
    pub fn new(api: XnoteApi, presenter: Arc<dyn Presenter>, kind: ReferenceKind) -> Self {
        Self {
            api,
            presenter,
            kind,
            rows: RwLock::new(Vec::new()),
            generation: AtomicU64::new(0),
        }
    }

    pub fn kind(&self) -> ReferenceKind {
        self.kind
    }

    /// Lower-case noun, e.g. "drink option" / "drink options"
    fn noun(&self, count: usize) -> String {
        let noun = self.kind.label().to_lowercase();
        if count == 1 { noun } else { format!("{}s", noun) }
    }

    /// Fetch all names. On failure the previous rows stay.
    pub async fn load(&self) -> ClientResult<()> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let result = {
            let _loading = LoadingGuard::new(self.presenter.clone());
            self.api.reference_list(self.kind).await
        };
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::warn!(resource = self.kind.resource(), "Discarding superseded list response");
            return Ok(());
        }

        match result {
            Ok(rows) => {
                *self.rows.write().await = rows;
                Ok(())
            }
            Err(e) => {
                let operation = format!("load {}", self.noun(2));
                tracing::error!("Failed to {}: {}", operation, e);
                self.presenter.error(&operation, &e.to_string());
                Err(e)
            }
        }
    }

    pub async fn rows(&self) -> Vec<NamedEntry> {
        self.rows.read().await.clone()
    }

    /// Inline rename of one entry.
    ///
    /// There is no rename endpoint: the new name is created, then the old
    /// one deleted. Returns `false` when the name did not change. The grid
    /// re-fetches afterwards on every path that reached the server, so a
    /// failed rename shows the server's names again.
    pub async fn rename(&self, old_name: &str, new_name: &str) -> FormResult<bool> {
        let operation = format!("update {}", self.noun(1));
        let new_name = new_name.trim();
        if new_name.is_empty() {
            let errors = ValidationErrors::single("name", "name cannot be empty");
            self.presenter.error(&operation, &errors.to_string());
            return Err(errors.into());
        }
        if new_name == old_name {
            return Ok(false);
        }

        let result = {
            let _loading = LoadingGuard::new(self.presenter.clone());
            match self.api.create_reference(self.kind, new_name).await {
                Err(e) => Err(FormError::network(&operation, e)),
                Ok(_) => self
                    .api
                    .delete_reference(self.kind, old_name)
                    .await
                    .map(|_| ())
                    .map_err(|source| FormError::PartialFailure { completed: 1, failed_index: 1, source }),
            }
        };

        if let Err(e) = &result {
            tracing::error!(from = old_name, to = new_name, "Failed to {}: {}", operation, e);
            self.presenter.error(&operation, &e.to_string());
        }
        self.reload_quietly().await;
        result.map(|_| true)
    }

    /// Delete entries by name after confirmation, one request at a time.
    ///
    /// Stops at the first failure. Returns how many were deleted; `0` when
    /// the user declined.
    pub async fn remove_names(&self, names: &[String]) -> FormResult<usize> {
        if names.is_empty() {
            return Ok(0);
        }
        let count = names.len();
        let confirmation = Confirmation::CascadeDelete {
            entity: self.noun(count),
            count,
            names: names.to_vec(),
            cascade: None,
        };
        if !self.presenter.confirm(&confirmation) {
            return Ok(0);
        }

        let failure = {
            let _loading = LoadingGuard::new(self.presenter.clone());
            let mut failure = None;
            for (index, name) in names.iter().enumerate() {
                if let Err(e) = self.api.delete_reference(self.kind, name).await {
                    failure = Some((index, name.as_str(), e));
                    break;
                }
            }
            failure
        };

        let result = match failure {
            None => {
                self.presenter.toast(
                    &format!("{} {} deleted successfully", count, self.noun(count)),
                    ToastKind::Success,
                );
                Ok(count)
            }
            Some((index, name, source)) => {
                let operation = format!("delete {} \"{}\"", self.noun(1), name);
                tracing::error!("Failed to {}: {}", operation, source);
                self.presenter.error(&operation, &source.to_string());
                if index == 0 {
                    Err(FormError::network(operation, source))
                } else {
                    Err(FormError::PartialFailure { completed: index, failed_index: index, source })
                }
            }
        };

        self.reload_quietly().await;
        result
    }

    async fn reload_quietly(&self) {
        if let Err(e) = self.load().await {
            tracing::debug!("Reload after change failed: {}", e);
        }
    }
}

#[async_trait]
impl RefreshTarget for ReferenceGrid {
    fn name(&self) -> &str {
        self.kind.resource()
    }

    async fn refresh(&self) -> ClientResult<()> {
        self.load().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_cell_validator() {
        assert!(validate_cell(Person::REQUIRED, "name", &Value::String("  ".into())).is_err());
        assert!(validate_cell(Person::REQUIRED, "name", &Value::Null).is_err());
        assert!(validate_cell(Person::REQUIRED, "notes", &Value::Null).is_ok());
        assert!(validate_cell(Person::REQUIRED, "name", &Value::String("bob".into())).is_ok());
    }

    #[test]
    fn test_cascade_notice() {
        assert_eq!(
            Person::cascade_notice(1).as_deref(),
            Some("This will also delete all related meals, events, and drinks associated with this person.")
        );
        assert!(Product::cascade_notice(2).unwrap().ends_with("these products."));
    }
}
