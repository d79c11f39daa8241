//! Deferred deletion of generated artifacts.

use crate::delivery::{
    domain::Artifact,
    ports::{ArtifactStore, CleanupObserver},
};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

/// Deletes artifacts a fixed grace period after they were created.
///
/// Deletion happens whether or not the owning message was delivered, and
/// failures go to the observer instead of the caller.
#[derive(Clone)]
pub struct ArtifactJanitor {
    store: Arc<dyn ArtifactStore>,
    observer: Arc<dyn CleanupObserver>,
    grace_period: Duration,
}

impl ArtifactJanitor {
    /// Creates a janitor for artifacts held in `store`.
    #[must_use]
    pub const fn new(
        store: Arc<dyn ArtifactStore>,
        observer: Arc<dyn CleanupObserver>,
        grace_period: Duration,
    ) -> Self {
        Self {
            store,
            observer,
            grace_period,
        }
    }

    /// Returns the store whose artifacts this janitor removes.
    #[must_use]
    pub fn store(&self) -> &dyn ArtifactStore {
        self.store.as_ref()
    }

    /// Schedules `artifact` for deletion and returns the cleanup task.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn schedule(&self, artifact: Artifact) -> JoinHandle<()> {
        let store = Arc::clone(&self.store);
        let observer = Arc::clone(&self.observer);
        let grace_period = self.grace_period;
        tokio::spawn(async move {
            tokio::time::sleep(grace_period).await;
            match store.remove(&artifact).await {
                Ok(()) => debug!(filename = artifact.filename(), "removed artifact"),
                Err(err) => observer.report(err),
            }
        })
    }
}
