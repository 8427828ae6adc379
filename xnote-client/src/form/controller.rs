//! Generic modal controller
//!
//! ```text
//!            open_create              save(Save) / close(..)
//!   Closed ─────────────▶ OpenForCreate ─────────────────────▶ Closed
//!     │                     ▲      │ save(SaveAndAddAnother)
//!     │ open_edit(key)      │      └──────────▶ OpenForCreate (pre-filled)
//!     ▼                     │ save(SaveAsNew / SaveAndAddAnother)
//!   OpenForEdit(key) ───────┘
//! ```
//!
//! Every transition bumps a generation number. Work that awaited the
//! network compares the number it started with before touching the
//! modal, so a late response for a closed or retargeted modal is dropped.

use std::sync::Arc;

use tokio::sync::Mutex;

use shared::ValidationErrors;
use shared::date::today_local;
use shared::models::NamedEntry;

use super::descriptor::{EntityDescriptor, EntityTarget, KeyKind};
use super::duplicate::find_potential_duplicates;
use super::entity::{EntityForm, RecordKey};
use super::error::{FormError, FormResult};
use super::reference::ReferenceData;
use super::widgets::SubWidgetRegistry;
use crate::api::XnoteApi;
use crate::presenter::{Confirmation, LoadingGuard, Presenter};
use crate::refresh::{RefreshTarget, refresh_all};

/// Modal state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Closed,
    OpenForCreate,
    OpenForEdit(RecordKey),
}

impl FormState {
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }
}

/// User gesture that dismissed the modal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    Cancel,
    CloseGlyph,
    OutsideClick,
    Escape,
}

/// Which save button was pressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    /// Save and close
    Save,
    /// Save, then stay open for another create with the same values
    SaveAndAddAnother,
    /// Create a new record from an edit modal's values
    SaveAsNew,
}

/// Result of a save that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// `records` records were created or updated
    Saved { records: usize },
    /// Nothing to send (renamed to the same name)
    Unchanged,
    /// Declined at the duplicate prompt; nothing was sent
    Cancelled,
}

struct ModalState<F> {
    state: FormState,
    form: Option<F>,
    refs: ReferenceData,
    generation: u64,
}

/// Create/edit lifecycle of one entity kind
pub struct FormController<F: EntityForm> {
    api: XnoteApi,
    presenter: Arc<dyn Presenter>,
    refresh_targets: Vec<Arc<dyn RefreshTarget>>,
    default_people: Vec<String>,
    widgets: SubWidgetRegistry,
    modal: Mutex<ModalState<F>>,
}

impl<F: EntityForm> FormController<F> {
    pub fn new(api: XnoteApi, presenter: Arc<dyn Presenter>, default_people: Vec<String>) -> Self {
        Self {
            api,
            presenter,
            refresh_targets: Vec::new(),
            default_people,
            widgets: SubWidgetRegistry::new(),
            modal: Mutex::new(ModalState {
                state: FormState::Closed,
                form: None,
                refs: ReferenceData::default(),
                generation: 0,
            }),
        }
    }

    /// Re-fetch `target` after every successful save
    pub fn with_refresh_target(mut self, target: Arc<dyn RefreshTarget>) -> Self {
        self.refresh_targets.push(target);
        self
    }

    pub fn descriptor(&self) -> &'static EntityDescriptor {
        F::descriptor()
    }

    /// Sub-widgets owned by the open modal
    pub fn widgets(&self) -> &SubWidgetRegistry {
        &self.widgets
    }

    pub async fn state(&self) -> FormState {
        self.modal.lock().await.state.clone()
    }

    /// Current field values, if open
    pub async fn form(&self) -> Option<F> {
        self.modal.lock().await.form.clone()
    }

    pub async fn generation(&self) -> u64 {
        self.modal.lock().await.generation
    }

    /// Reference lists loaded when the modal opened
    pub async fn references(&self) -> ReferenceData {
        self.modal.lock().await.refs.clone()
    }

    // ========== Transitions ==========

    /// Open an empty create modal
    pub async fn open_create(&self) -> FormResult<()> {
        let generation = self.bump_generation().await;
        let refs = {
            let _loading = LoadingGuard::new(self.presenter.clone());
            ReferenceData::load(&self.api).await
        };

        let mut modal = self.modal.lock().await;
        if modal.generation != generation {
            tracing::warn!(entity = F::descriptor().label, "Discarding superseded create modal");
            return Err(FormError::Stale);
        }
        modal.form = Some(F::defaults(&refs, today_local()));
        modal.refs = refs;
        modal.state = FormState::OpenForCreate;
        Ok(())
    }

    /// Open an edit modal pre-filled from the record `key`
    pub async fn open_edit(&self, key: impl Into<RecordKey>) -> FormResult<()> {
        let key = key.into();
        let descriptor = F::descriptor();
        check_key_kind(descriptor, &key)?;

        let generation = self.bump_generation().await;
        let (refs, record) = {
            let _loading = LoadingGuard::new(self.presenter.clone());
            let refs = ReferenceData::load(&self.api).await;
            let record = F::fetch_record(&self.api, &key).await;
            (refs, record)
        };

        let mut modal = self.modal.lock().await;
        if modal.generation != generation {
            tracing::warn!(entity = descriptor.label, %key, "Discarding late record for edit modal");
            return Err(FormError::Stale);
        }
        match record {
            Ok(record) => {
                modal.form = Some(F::from_record(record));
                modal.refs = refs;
                modal.state = FormState::OpenForEdit(key);
                Ok(())
            }
            Err(e) => {
                drop(modal);
                let operation = format!("load {} for editing", descriptor.label.to_lowercase());
                tracing::error!(%key, "Failed to {}: {}", operation, e);
                self.presenter.error(&operation, &e.to_string());
                Err(FormError::network(operation, e))
            }
        }
    }

    /// Close the modal. Sub-widgets are released first. Returns whether a
    /// modal was open.
    pub async fn close(&self, reason: CloseReason) -> bool {
        let released = self.widgets.release_all().await;
        let mut modal = self.modal.lock().await;
        let was_open = modal.state.is_open();
        modal.generation += 1;
        modal.state = FormState::Closed;
        modal.form = None;
        tracing::debug!(entity = F::descriptor().label, ?reason, released, "Closed modal");
        was_open
    }

    /// Edit the field values of the open modal
    pub async fn update<R>(&self, edit: impl FnOnce(&mut F) -> R) -> FormResult<R> {
        let mut modal = self.modal.lock().await;
        let form = modal.form.as_mut().ok_or(FormError::NotOpen)?;
        Ok(edit(form))
    }

    // ========== Save ==========

    /// Validate, check duplicates, persist, refresh, then close or re-arm.
    ///
    /// Validation and network failures leave the modal and its values as
    /// they were.
    pub async fn save(&self, mode: SaveMode) -> FormResult<SaveOutcome> {
        let descriptor = F::descriptor();
        let operation = descriptor.operation("save");

        let (state, form, refs, generation) = {
            let modal = self.modal.lock().await;
            match (&modal.state, &modal.form) {
                (FormState::Closed, _) | (_, None) => return Err(FormError::NotOpen),
                (state, Some(form)) => (state.clone(), form.clone(), modal.refs.clone(), modal.generation),
            }
        };

        let editing = match (&state, mode) {
            (FormState::OpenForEdit(key), SaveMode::Save | SaveMode::SaveAndAddAnother) => {
                Some(key.clone())
            }
            _ => None,
        };

        let payloads = match self.prepare(&form, &refs, editing.is_some()) {
            Ok(payloads) => payloads,
            Err(errors) => {
                self.presenter.error(&operation, &errors.to_string());
                return Err(errors.into());
            }
        };

        let result = match &editing {
            Some(key) => self.persist_edit(key, &form, payloads).await,
            None => {
                if descriptor.duplicate_check {
                    match self.confirm_not_duplicate(&form, generation).await {
                        Ok(true) => {}
                        Ok(false) => return Ok(SaveOutcome::Cancelled),
                        Err(FormError::Stale) => return Err(FormError::Stale),
                        Err(e) => {
                            self.presenter.error(&operation, &e.to_string());
                            return Err(e);
                        }
                    }
                }
                self.persist_create(payloads).await.map(|records| SaveOutcome::Saved { records })
            }
        };

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => {
                if matches!(e, FormError::PartialFailure { .. }) {
                    refresh_all(&self.refresh_targets).await;
                }
                tracing::error!(entity = descriptor.label, "Failed to {}: {}", operation, e);
                self.presenter.error(&operation, &e.to_string());
                return Err(e);
            }
        };

        if matches!(outcome, SaveOutcome::Saved { .. }) {
            refresh_all(&self.refresh_targets).await;
        }
        self.finish(mode, form, generation).await;
        Ok(outcome)
    }

    fn prepare(
        &self,
        form: &F,
        refs: &ReferenceData,
        editing: bool,
    ) -> Result<Vec<F::Payload>, ValidationErrors> {
        let descriptor = F::descriptor();
        form.validate()?;

        if editing
            && let Some(field) = descriptor.multi_item
            && form.sub_item_count() != 1
        {
            let label = descriptor.field(field).map(|f| f.label).unwrap_or(field);
            return Err(ValidationErrors::single(
                field,
                format!("Select exactly one {} when editing", label.to_lowercase()),
            ));
        }

        let defaults: &[String] = if descriptor.default_people { &self.default_people } else { &[] };
        form.payloads(refs, defaults)
    }

    /// `Ok(false)` when the user declined the duplicate prompt
    async fn confirm_not_duplicate(&self, form: &F, generation: u64) -> FormResult<bool> {
        let descriptor = F::descriptor();
        let Some(candidate) = form.candidate_name() else {
            return Ok(true);
        };

        let existing = {
            let _loading = LoadingGuard::new(self.presenter.clone());
            self.list_names(descriptor.target).await
        }
        .map_err(|e| FormError::network(descriptor.operation("check existing"), e))?;

        if self.modal.lock().await.generation != generation {
            return Err(FormError::Stale);
        }

        let duplicates = find_potential_duplicates(&candidate, &existing);
        if duplicates.is_empty() {
            return Ok(true);
        }
        let confirmed = self.presenter.confirm(&Confirmation::Duplicate {
            entity: descriptor.label.to_string(),
            candidate,
            existing: duplicates,
        });
        if !confirmed {
            tracing::debug!(entity = descriptor.label, "Create cancelled at duplicate prompt");
        }
        Ok(confirmed)
    }

    async fn list_names(&self, target: EntityTarget) -> crate::ClientResult<Vec<String>> {
        let entries: Vec<NamedEntry> = match target {
            EntityTarget::Record { resource, .. } => self.api.list(resource).await?,
            EntityTarget::Reference(kind) => self.api.reference_list(kind).await?,
        };
        Ok(entries.into_iter().map(|e| e.name).collect())
    }

    /// One create per payload, strictly in order
    async fn persist_create(&self, payloads: Vec<F::Payload>) -> FormResult<usize> {
        let descriptor = F::descriptor();
        let _loading = LoadingGuard::new(self.presenter.clone());
        let total = payloads.len();

        for (index, payload) in payloads.iter().enumerate() {
            let result = match descriptor.target {
                EntityTarget::Record { resource, .. } => self.api.create(resource, payload).await,
                EntityTarget::Reference(kind) => self.api.create_reference_entry(kind, payload).await,
            };
            if let Err(source) = result {
                return Err(if index == 0 {
                    FormError::network(descriptor.operation("save"), source)
                } else {
                    tracing::warn!(entity = descriptor.label, completed = index, total, "Multi-item save stopped");
                    FormError::PartialFailure { completed: index, failed_index: index, source }
                });
            }
        }
        Ok(total)
    }

    async fn persist_edit(
        &self,
        key: &RecordKey,
        form: &F,
        payloads: Vec<F::Payload>,
    ) -> FormResult<SaveOutcome> {
        let descriptor = F::descriptor();
        let operation = descriptor.operation("save");
        let payload = payloads
            .into_iter()
            .next()
            .ok_or_else(|| ValidationErrors::single("id", "Nothing to save"))?;

        let _loading = LoadingGuard::new(self.presenter.clone());
        match descriptor.target {
            EntityTarget::Record { resource, .. } => {
                let id = key.require_id().map_err(|e| FormError::network(&operation, e))?;
                self.api
                    .update(resource, id, &payload)
                    .await
                    .map_err(|e| FormError::network(&operation, e))?;
                Ok(SaveOutcome::Saved { records: 1 })
            }
            EntityTarget::Reference(kind) => {
                let old_name = key.name().unwrap_or_default();
                if form.candidate_name().as_deref() == Some(old_name) {
                    return Ok(SaveOutcome::Unchanged);
                }
                // no rename endpoint: create the new name, then drop the old
                self.api
                    .create_reference_entry(kind, &payload)
                    .await
                    .map_err(|e| FormError::network(&operation, e))?;
                self.api
                    .delete_reference(kind, old_name)
                    .await
                    .map_err(|source| FormError::PartialFailure { completed: 1, failed_index: 1, source })?;
                Ok(SaveOutcome::Saved { records: 1 })
            }
        }
    }

    /// Close or re-arm after a successful save, unless the modal moved on
    async fn finish(&self, mode: SaveMode, mut submitted: F, generation: u64) {
        let mut modal = self.modal.lock().await;
        if modal.generation != generation {
            tracing::warn!(entity = F::descriptor().label, "Save finished after the modal moved on");
            return;
        }
        modal.generation += 1;
        match mode {
            SaveMode::Save => {
                let released = self.widgets.release_all().await;
                modal.state = FormState::Closed;
                modal.form = None;
                tracing::debug!(entity = F::descriptor().label, released, "Saved and closed");
            }
            SaveMode::SaveAndAddAnother | SaveMode::SaveAsNew => {
                if modal.state != FormState::OpenForCreate {
                    submitted.detach();
                }
                modal.state = FormState::OpenForCreate;
                modal.form = Some(submitted);
            }
        }
    }

    async fn bump_generation(&self) -> u64 {
        let mut modal = self.modal.lock().await;
        modal.generation += 1;
        modal.generation
    }
}

fn check_key_kind(descriptor: &EntityDescriptor, key: &RecordKey) -> FormResult<()> {
    let matches = match descriptor.key_kind() {
        KeyKind::Id => key.id().is_some(),
        KeyKind::Name => key.name().is_some_and(|n| !n.trim().is_empty()),
    };
    if matches {
        Ok(())
    } else {
        Err(ValidationErrors::single(
            "id",
            format!("{} cannot be opened by \"{}\"", descriptor.label, key),
        )
        .into())
    }
}
