//! Cleanup observer that keeps reports for inspection.

use std::sync::{Arc, Mutex};

use crate::delivery::ports::{CleanupError, CleanupObserver};

/// Collects every reported cleanup failure.
#[derive(Debug, Clone, Default)]
pub struct RecordingCleanupObserver {
    reports: Arc<Mutex<Vec<CleanupError>>>,
}

impl RecordingCleanupObserver {
    /// Creates an observer with no reports.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the reports received so far.
    ///
    /// A poisoned lock yields the reports recorded before the panic.
    #[must_use]
    pub fn reports(&self) -> Vec<CleanupError> {
        match self.reports.lock() {
            Ok(reports) => reports.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl CleanupObserver for RecordingCleanupObserver {
    fn report(&self, error: CleanupError) {
        match self.reports.lock() {
            Ok(mut reports) => reports.push(error),
            Err(poisoned) => poisoned.into_inner().push(error),
        }
    }
}
