//! Sub-widget ownership
//!
//! Search-select widgets created inside an open modal register a destroy
//! hook here. Closing the modal runs every hook before the modal is
//! hidden, so no widget survives into the next open.

use tokio::sync::Mutex;

type DestroyHook = Box<dyn FnOnce() + Send>;

/// Registry of live sub-widgets owned by one modal
#[derive(Default)]
pub struct SubWidgetRegistry {
    widgets: Mutex<Vec<(String, DestroyHook)>>,
}

impl SubWidgetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a widget; `destroy` runs when the modal releases it
    pub async fn register(&self, name: impl Into<String>, destroy: impl FnOnce() + Send + 'static) {
        self.widgets.lock().await.push((name.into(), Box::new(destroy)));
    }

    pub async fn len(&self) -> usize {
        self.widgets.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.widgets.lock().await.is_empty()
    }

    /// Destroy every widget, newest first. Returns how many were released.
    pub async fn release_all(&self) -> usize {
        let widgets = std::mem::take(&mut *self.widgets.lock().await);
        let count = widgets.len();
        for (name, destroy) in widgets.into_iter().rev() {
            tracing::trace!(widget = %name, "Releasing sub-widget");
            destroy();
        }
        count
    }
}

impl std::fmt::Debug for SubWidgetRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubWidgetRegistry").finish_non_exhaustive()
    }
}
