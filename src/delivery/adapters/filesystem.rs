//! Artifact store writing code files into a capability directory.

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use mockable::Clock;
use std::io;
use std::sync::Arc;

use crate::delivery::{
    domain::{
        Artifact, ArtifactId, ArtifactSource, code_artifact_description, code_artifact_filename,
    },
    ports::{ArtifactStore, ArtifactStoreError, ArtifactStoreResult, CleanupError},
};

/// Stores artifacts as files directly under one directory.
///
/// All file operations go through a `cap_std` directory handle, so artifact
/// names can never reach outside the root.
#[derive(Debug)]
pub struct FsArtifactStore<C>
where
    C: Clock + Send + Sync,
{
    dir: Arc<Dir>,
    root: Utf8PathBuf,
    clock: Arc<C>,
}

impl<C> FsArtifactStore<C>
where
    C: Clock + Send + Sync,
{
    /// Opens the store at `root`, creating the directory when missing.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactStoreError::Io`] when the directory cannot be
    /// created or opened.
    pub fn open(root: impl Into<Utf8PathBuf>, clock: Arc<C>) -> ArtifactStoreResult<Self> {
        let root_path = root.into();
        Dir::create_ambient_dir_all(&root_path, ambient_authority())
            .map_err(ArtifactStoreError::io)?;
        let dir =
            Dir::open_ambient_dir(&root_path, ambient_authority()).map_err(ArtifactStoreError::io)?;
        Ok(Self {
            dir: Arc::new(dir),
            root: root_path,
            clock,
        })
    }

    /// Returns the directory artifacts are written to.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }
}

#[async_trait]
impl<C> ArtifactStore for FsArtifactStore<C>
where
    C: Clock + Send + Sync,
{
    async fn create(&self, body: &str, language: &str) -> ArtifactStoreResult<Artifact> {
        let id = ArtifactId::new();
        let filename = code_artifact_filename(id, self.clock.utc().timestamp_millis(), language);

        let dir = Arc::clone(&self.dir);
        let name = filename.clone();
        let contents = body.to_owned();
        tokio::task::spawn_blocking(move || dir.write(name, contents))
            .await
            .map_err(|err| ArtifactStoreError::io(io::Error::other(err)))?
            .map_err(ArtifactStoreError::io)?;

        let path = self.root.join(&filename);
        Ok(
            Artifact::with_id(id, filename, ArtifactSource::File(path))
                .with_description(code_artifact_description(language)),
        )
    }

    async fn remove(&self, artifact: &Artifact) -> Result<(), CleanupError> {
        let dir = Arc::clone(&self.dir);
        let name = artifact.filename().to_owned();
        let outcome = tokio::task::spawn_blocking(move || dir.remove_file(name))
            .await
            .map_err(|err| CleanupError::new(artifact, err))?;
        match outcome {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(CleanupError::new(artifact, err)),
        }
    }
}
