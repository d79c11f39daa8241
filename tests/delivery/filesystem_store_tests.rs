//! Tests for [`FsArtifactStore`] and file-backed attachments.

use std::sync::Arc;

use crate::delivery::helpers::{FsStoreFixture, fs_store, response_with_code, transport};
use camino::Utf8PathBuf;
use chatrelay::delivery::{
    adapters::{
        filesystem::FsArtifactStore, memory::RecordingTransport,
        tracing_observer::TracingCleanupObserver,
    },
    domain::{ArtifactSource, DeliveryConfig},
    ports::ArtifactStore,
    services::ResponseDeliveryService,
};
use mockable::DefaultClock;
use rstest::rstest;
use tempfile::TempDir;

fn file_path(source: &ArtifactSource) -> Utf8PathBuf {
    match source {
        ArtifactSource::File(path) => path.clone(),
        ArtifactSource::Memory(_) => panic!("expected a file-backed artifact"),
    }
}

#[rstest]
#[tokio::test]
async fn create_writes_code_file(fs_store: FsStoreFixture) {
    let artifact = fs_store
        .store
        .create("fn main() {}\n", "rust")
        .await
        .expect("artifact created");

    assert!(artifact.filename().starts_with("code_"));
    assert!(artifact.filename().ends_with(".rs"));
    assert_eq!(artifact.description(), Some("Code snippet (rust)"));
    let path = file_path(artifact.source());
    assert_eq!(path.parent(), Some(fs_store.store.root()));
    assert_eq!(
        std::fs::read_to_string(&path).expect("artifact readable"),
        "fn main() {}\n"
    );
}

#[rstest]
#[tokio::test]
async fn remove_deletes_file_and_tolerates_repeats(fs_store: FsStoreFixture) {
    let artifact = fs_store
        .store
        .create("SELECT 1;", "sql")
        .await
        .expect("artifact created");
    let path = file_path(artifact.source());

    fs_store.store.remove(&artifact).await.expect("first removal");
    assert!(!path.exists());

    fs_store
        .store
        .remove(&artifact)
        .await
        .expect("second removal is a no-op");
}

#[test]
fn open_creates_missing_directories() {
    let dir = TempDir::new().expect("create temporary directory");
    let root = Utf8PathBuf::from_path_buf(dir.path().join("a").join("b"))
        .expect("temporary directory is UTF-8");

    let store = FsArtifactStore::open(root.clone(), Arc::new(DefaultClock)).expect("open store");

    assert!(root.is_dir());
    assert_eq!(store.root(), root.as_path());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delivered_attachment_is_a_file_removed_after_grace(
    fs_store: FsStoreFixture,
    transport: Arc<RecordingTransport>,
) {
    let config = DeliveryConfig::discord()
        .with_inter_message_delay_ms(0)
        .with_artifact_grace_period_ms(300);
    let service = ResponseDeliveryService::new(Arc::clone(&transport), config)
        .expect("valid config")
        .with_artifact_store(fs_store.store.clone(), Arc::new(TracingCleanupObserver));
    let (raw, body) = response_with_code("python", 400);

    let report = service
        .deliver_response(&raw, &[])
        .await
        .expect("delivery succeeds");

    let sent = transport.sent().expect("sent");
    assert_eq!(sent.len(), 3);
    let attachment = sent[1].attachments.first().expect("placeholder carries file");
    let path = file_path(attachment.source());
    assert!(attachment.filename().ends_with(".py"));
    assert_eq!(std::fs::read_to_string(&path).expect("artifact readable"), body);

    report.wait_for_cleanup().await;

    assert!(!path.exists());
}
