//! Cleanup observer that logs through `tracing`.

use tracing::warn;

use crate::delivery::ports::{CleanupError, CleanupObserver};

/// Logs cleanup failures at `warn` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingCleanupObserver;

impl CleanupObserver for TracingCleanupObserver {
    fn report(&self, error: CleanupError) {
        warn!(
            artifact = %error.artifact,
            filename = %error.filename,
            reason = %error.reason,
            "artifact cleanup failed"
        );
    }
}
