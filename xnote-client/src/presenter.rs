//! Presentation seam
//!
//! Controllers never touch a UI directly. Loading indicators, blocking
//! errors, toasts and confirmation prompts all go through a `Presenter`.

use std::sync::Arc;

/// Style of a non-blocking notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Info,
    Warning,
}

/// A question the user must answer before a mutation fires
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    /// Creating a record whose name resembles existing ones
    Duplicate {
        entity: String,
        candidate: String,
        existing: Vec<String>,
    },
    /// Deleting records with known downstream effects
    CascadeDelete {
        /// Noun already pluralised for `count` (e.g. "people")
        entity: String,
        count: usize,
        names: Vec<String>,
        /// Downstream effect, e.g. "This will also delete all related meals."
        cascade: Option<String>,
    },
}

impl Confirmation {
    /// User-visible prompt text
    pub fn message(&self) -> String {
        match self {
            Self::Duplicate { entity, candidate, existing } => format!(
                "Found {} existing {} with a similar name: {}\n\nDo you still want to create \"{}\"?",
                existing.len(),
                entity.to_lowercase(),
                quoted(existing),
                candidate
            ),
            Self::CascadeDelete { entity, count, names, cascade } => {
                let mut message = if names.is_empty() {
                    format!("Are you sure you want to delete {} {}?", count, entity)
                } else {
                    format!("Are you sure you want to delete {} {}: {}?", count, entity, quoted(names))
                };
                if let Some(cascade) = cascade {
                    message.push_str("\n\n");
                    message.push_str(cascade);
                }
                message
            }
        }
    }
}

fn quoted(names: &[String]) -> String {
    names
        .iter()
        .map(|n| format!("\"{}\"", n))
        .collect::<Vec<_>>()
        .join(", ")
}

/// UI callbacks used by the aggregator, forms and grids
pub trait Presenter: Send + Sync {
    fn set_loading(&self, loading: bool);

    /// Blocking error for a failed operation (e.g. "save meal")
    fn error(&self, operation: &str, message: &str);

    /// Auto-dismissing notification
    fn toast(&self, message: &str, kind: ToastKind);

    /// Ask the user; `false` aborts the pending mutation
    fn confirm(&self, confirmation: &Confirmation) -> bool;
}

/// Shows the loading indicator until dropped
pub struct LoadingGuard {
    presenter: Arc<dyn Presenter>,
}

impl LoadingGuard {
    pub fn new(presenter: Arc<dyn Presenter>) -> Self {
        presenter.set_loading(true);
        Self { presenter }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.presenter.set_loading(false);
    }
}

/// Headless presenter writing everything to the log
#[derive(Debug, Clone, Copy)]
pub struct TracingPresenter {
    accept_confirmations: bool,
}

impl TracingPresenter {
    /// `accept_confirmations` answers every prompt
    pub fn new(accept_confirmations: bool) -> Self {
        Self { accept_confirmations }
    }
}

impl Default for TracingPresenter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Presenter for TracingPresenter {
    fn set_loading(&self, loading: bool) {
        tracing::trace!(loading, "Loading indicator");
    }

    fn error(&self, operation: &str, message: &str) {
        tracing::error!(operation, "Failed to {}: {}", operation, message);
    }

    fn toast(&self, message: &str, kind: ToastKind) {
        tracing::info!(?kind, "{}", message);
    }

    fn confirm(&self, confirmation: &Confirmation) -> bool {
        tracing::info!(accepted = self.accept_confirmations, "{}", confirmation.message());
        self.accept_confirmations
    }
}
