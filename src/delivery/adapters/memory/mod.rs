//! In-memory adapters for tests and local runs.

mod artifact_store;
mod cleanup;
mod transport;

pub use artifact_store::InMemoryArtifactStore;
pub use cleanup::RecordingCleanupObserver;
pub use transport::{RecordingTransport, SentMessage, TransportEvent};
