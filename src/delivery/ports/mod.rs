//! Port contracts for response delivery.
//!
//! The pipeline talks to the chat platform, the artifact storage, and the
//! cleanup observability sink only through these traits.

pub mod artifact_store;
pub mod cleanup;
pub mod transport;

pub use artifact_store::{ArtifactStore, ArtifactStoreError, ArtifactStoreResult};
pub use cleanup::{CleanupError, CleanupObserver};
pub use transport::{MessageTransport, TransportError, TransportResult};
