//! In-memory artifact store for delivery tests.

use async_trait::async_trait;
use mockable::Clock;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::delivery::{
    domain::{
        Artifact, ArtifactId, ArtifactSource, code_artifact_description, code_artifact_filename,
    },
    ports::{ArtifactStore, ArtifactStoreError, ArtifactStoreResult, CleanupError},
};

/// Thread-safe artifact store keeping payloads in memory.
#[derive(Debug, Clone)]
pub struct InMemoryArtifactStore<C>
where
    C: Clock + Send + Sync,
{
    state: Arc<RwLock<InMemoryArtifactState>>,
    clock: Arc<C>,
}

#[derive(Debug, Default)]
struct InMemoryArtifactState {
    artifacts: HashMap<ArtifactId, String>,
    created: usize,
    unavailable: Option<String>,
    removal_failure: Option<String>,
}

impl<C> InMemoryArtifactStore<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty store.
    #[must_use]
    pub fn new(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryArtifactState::default())),
            clock,
        }
    }

    /// Makes every later `create` call fail with `reason`.
    ///
    /// # Errors
    ///
    /// Returns store errors when lock acquisition fails.
    pub fn set_unavailable(&self, reason: impl Into<String>) -> ArtifactStoreResult<()> {
        self.write()?.unavailable = Some(reason.into());
        Ok(())
    }

    /// Makes every later `remove` call fail with `reason`.
    ///
    /// # Errors
    ///
    /// Returns store errors when lock acquisition fails.
    pub fn fail_removals(&self, reason: impl Into<String>) -> ArtifactStoreResult<()> {
        self.write()?.removal_failure = Some(reason.into());
        Ok(())
    }

    /// Returns the stored body of an artifact that has not been removed.
    ///
    /// # Errors
    ///
    /// Returns store errors when lock acquisition fails.
    pub fn body(&self, id: ArtifactId) -> ArtifactStoreResult<Option<String>> {
        Ok(self.read()?.artifacts.get(&id).cloned())
    }

    /// Returns how many artifacts are currently stored.
    ///
    /// # Errors
    ///
    /// Returns store errors when lock acquisition fails.
    pub fn stored_count(&self) -> ArtifactStoreResult<usize> {
        Ok(self.read()?.artifacts.len())
    }

    /// Returns how many artifacts were ever created.
    ///
    /// # Errors
    ///
    /// Returns store errors when lock acquisition fails.
    pub fn created_count(&self) -> ArtifactStoreResult<usize> {
        Ok(self.read()?.created)
    }

    fn read(&self) -> ArtifactStoreResult<std::sync::RwLockReadGuard<'_, InMemoryArtifactState>> {
        self.state
            .read()
            .map_err(|err| ArtifactStoreError::io(std::io::Error::other(err.to_string())))
    }

    fn write(
        &self,
    ) -> ArtifactStoreResult<std::sync::RwLockWriteGuard<'_, InMemoryArtifactState>> {
        self.state
            .write()
            .map_err(|err| ArtifactStoreError::io(std::io::Error::other(err.to_string())))
    }
}

#[async_trait]
impl<C> ArtifactStore for InMemoryArtifactStore<C>
where
    C: Clock + Send + Sync,
{
    async fn create(&self, body: &str, language: &str) -> ArtifactStoreResult<Artifact> {
        let mut state = self.write()?;
        if let Some(reason) = state.unavailable.as_ref() {
            return Err(ArtifactStoreError::Unavailable(reason.clone()));
        }

        let id = ArtifactId::new();
        let filename = code_artifact_filename(id, self.clock.utc().timestamp_millis(), language);
        let bytes: Arc<[u8]> = Arc::from(body.as_bytes());
        let artifact = Artifact::with_id(id, filename, ArtifactSource::Memory(bytes))
            .with_description(code_artifact_description(language));

        state.artifacts.insert(id, body.to_owned());
        state.created += 1;
        Ok(artifact)
    }

    async fn remove(&self, artifact: &Artifact) -> Result<(), CleanupError> {
        let mut state = self
            .state
            .write()
            .map_err(|err| CleanupError::new(artifact, err))?;
        if let Some(reason) = state.removal_failure.as_ref() {
            return Err(CleanupError::new(artifact, reason));
        }
        state.artifacts.remove(&artifact.id());
        Ok(())
    }
}
