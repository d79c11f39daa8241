//! Reporting channel for artifact cleanup failures.

use crate::delivery::domain::{Artifact, ArtifactId};
use thiserror::Error;

/// A generated artifact could not be deleted.
///
/// Cleanup runs after delivery, so this never fails a send. It is reported
/// through a [`CleanupObserver`] so leaked files stay visible.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("failed to clean up artifact {filename} ({artifact}): {reason}")]
pub struct CleanupError {
    /// Identifier of the artifact.
    pub artifact: ArtifactId,
    /// Display filename of the artifact.
    pub filename: String,
    /// Underlying failure.
    pub reason: String,
}

impl CleanupError {
    /// Creates a cleanup error for `artifact`.
    pub fn new(artifact: &Artifact, reason: impl ToString) -> Self {
        Self {
            artifact: artifact.id(),
            filename: artifact.filename().to_owned(),
            reason: reason.to_string(),
        }
    }
}

/// Receives non-fatal cleanup failures.
pub trait CleanupObserver: Send + Sync {
    /// Records one failure.
    fn report(&self, error: CleanupError);
}
