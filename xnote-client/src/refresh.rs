//! Refresh notification
//!
//! After a successful mutation, views re-fetch from the server instead of
//! patching their rows in place.

use std::sync::Arc;

use async_trait::async_trait;

use crate::ClientResult;

/// A view that can reload itself from the server
#[async_trait]
pub trait RefreshTarget: Send + Sync {
    /// Name for logs
    fn name(&self) -> &str;

    async fn refresh(&self) -> ClientResult<()>;
}

/// Refresh every target in order; failures are logged, not propagated
pub async fn refresh_all(targets: &[Arc<dyn RefreshTarget>]) {
    for target in targets {
        if let Err(e) = target.refresh().await {
            tracing::error!(target = target.name(), "Refresh after save failed: {}", e);
        }
    }
}
