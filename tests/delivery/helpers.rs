//! Shared test helpers for delivery integration tests.

use std::sync::Arc;

use camino::Utf8PathBuf;
use chatrelay::delivery::{
    adapters::{filesystem::FsArtifactStore, memory::RecordingTransport},
    domain::DeliveryConfig,
};
use mockable::DefaultClock;
use rstest::fixture;
use tempfile::TempDir;

/// Temporary directory holding an artifact store.
pub struct FsStoreFixture {
    /// Keeps the directory alive for the duration of the test.
    pub dir: TempDir,
    /// Store rooted inside `dir`.
    pub store: Arc<FsArtifactStore<DefaultClock>>,
}

/// Provides an artifact store in a fresh temporary directory.
///
/// # Panics
///
/// Panics when the temporary directory cannot be created or is not UTF-8.
#[fixture]
pub fn fs_store() -> FsStoreFixture {
    let dir = TempDir::new().expect("create temporary directory");
    let root = Utf8PathBuf::from_path_buf(dir.path().join("artifacts"))
        .expect("temporary directory is UTF-8");
    let store = FsArtifactStore::open(root, Arc::new(DefaultClock)).expect("open artifact store");
    FsStoreFixture {
        dir,
        store: Arc::new(store),
    }
}

/// Provides a transport that records every call.
#[fixture]
pub fn transport() -> Arc<RecordingTransport> {
    Arc::new(RecordingTransport::new())
}

/// Discord limits with pacing disabled.
#[must_use]
pub fn unpaced_config() -> DeliveryConfig {
    DeliveryConfig::discord().with_inter_message_delay_ms(0)
}

/// Builds a response with prose around a code block of roughly `lines` lines.
#[must_use]
pub fn response_with_code(language: &str, lines: usize) -> (String, String) {
    let body = (0..lines)
        .map(|i| format!("    step_{i:05}(context, {i});"))
        .collect::<Vec<_>>()
        .join("\n");
    let raw = format!(
        "Here is the implementation you asked for.\n\n```{language}\n{body}\n```\n\nLet me know if it helps."
    );
    (raw, body)
}
