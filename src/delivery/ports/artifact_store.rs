//! Artifact store port used for oversized code blocks.

use super::cleanup::CleanupError;
use crate::delivery::domain::Artifact;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for artifact store operations.
pub type ArtifactStoreResult<T> = Result<T, ArtifactStoreError>;

/// Creates and removes file artifacts holding code.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Writes `body` to a new artifact named after `language`.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactStoreError`] when the artifact cannot be created.
    async fn create(&self, body: &str, language: &str) -> ArtifactStoreResult<Artifact>;

    /// Deletes an artifact previously returned by [`ArtifactStore::create`].
    ///
    /// Removing an artifact that no longer exists succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`CleanupError`] when the artifact exists but cannot be
    /// removed.
    async fn remove(&self, artifact: &Artifact) -> Result<(), CleanupError>;
}

/// Errors returned while creating artifacts.
#[derive(Debug, Clone, Error)]
pub enum ArtifactStoreError {
    /// The store is not accepting new artifacts.
    #[error("artifact store unavailable: {0}")]
    Unavailable(String),

    /// Storage failure.
    #[error("artifact store I/O error: {0}")]
    Io(Arc<dyn std::error::Error + Send + Sync>),
}

impl ArtifactStoreError {
    /// Wraps a storage error.
    pub fn io(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Io(Arc::new(err))
    }
}
