//! Shared world state for response delivery BDD scenarios.

use std::sync::Arc;

use chatrelay::delivery::{
    adapters::memory::{InMemoryArtifactStore, RecordingCleanupObserver, RecordingTransport},
    domain::{ConfigError, DeliveryConfig},
    services::{DeliveryReport, DeliveryResult, ResponseDeliveryService},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Artifact store type used by the BDD world.
pub type TestArtifactStore = InMemoryArtifactStore<DefaultClock>;

/// Scenario world for response delivery behaviour tests.
pub struct DeliveryWorld {
    pub config: DeliveryConfig,
    pub transport: Arc<RecordingTransport>,
    pub store: Option<Arc<TestArtifactStore>>,
    pub observer: Arc<RecordingCleanupObserver>,
    pub original_code: Option<String>,
    pub last_result: Option<DeliveryResult<DeliveryReport>>,
}

impl DeliveryWorld {
    /// Creates a world with a Discord configuration and no artifact store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: DeliveryConfig::discord(),
            transport: Arc::new(RecordingTransport::new()),
            store: None,
            observer: Arc::new(RecordingCleanupObserver::new()),
            original_code: None,
            last_result: None,
        }
    }

    /// Builds the service described by the scenario so far.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the scenario configured invalid limits.
    pub fn service(&self) -> Result<ResponseDeliveryService<RecordingTransport>, ConfigError> {
        let service =
            ResponseDeliveryService::new(Arc::clone(&self.transport), self.config.clone())?;
        let Some(store) = self.store.as_ref() else {
            return Ok(service);
        };
        Ok(service.with_artifact_store(store.clone(), self.observer.clone()))
    }
}

impl Default for DeliveryWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> DeliveryWorld {
    DeliveryWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
