//! File payloads delivered alongside messages.

use camino::Utf8PathBuf;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Unique identifier for an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArtifactId(Uuid);

impl ArtifactId {
    /// Creates a new random artifact identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an artifact identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the first eight hex digits, used in generated filenames.
    #[must_use]
    pub fn short(&self) -> String {
        self.0.simple().to_string().chars().take(8).collect()
    }
}

impl Default for ArtifactId {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<Uuid> for ArtifactId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where the bytes of an artifact live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactSource {
    /// A file on disk.
    File(Utf8PathBuf),
    /// Bytes held in memory.
    Memory(Arc<[u8]>),
}

/// A file the transport can attach to a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    id: ArtifactId,
    filename: String,
    description: Option<String>,
    source: ArtifactSource,
}

impl Artifact {
    /// Creates an artifact with a fresh identifier.
    #[must_use]
    pub fn new(filename: impl Into<String>, source: ArtifactSource) -> Self {
        Self::with_id(ArtifactId::new(), filename, source)
    }

    /// Creates an artifact with a known identifier.
    #[must_use]
    pub fn with_id(id: ArtifactId, filename: impl Into<String>, source: ArtifactSource) -> Self {
        Self {
            id,
            filename: filename.into(),
            description: None,
            source,
        }
    }

    /// Creates an artifact for an existing file, such as a rendered diagram.
    #[must_use]
    pub fn from_file(path: impl Into<Utf8PathBuf>) -> Self {
        let file_path = path.into();
        let filename = file_path.file_name().unwrap_or("attachment").to_owned();
        Self::new(filename, ArtifactSource::File(file_path))
    }

    /// Sets a human-readable description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the identifier.
    #[must_use]
    pub const fn id(&self) -> ArtifactId {
        self.id
    }

    /// Returns the display filename.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Returns the description, if set.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns where the artifact bytes are stored.
    #[must_use]
    pub const fn source(&self) -> &ArtifactSource {
        &self.source
    }
}

/// Maps a code fence language tag to a file extension.
///
/// Matching is case-insensitive and uses the first word of the tag. Unknown
/// or empty tags map to `txt`.
#[must_use]
pub fn extension_for_language(language: &str) -> &'static str {
    let tag = language
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    match tag.as_str() {
        "javascript" | "js" => "js",
        "typescript" | "ts" => "ts",
        "python" | "py" => "py",
        "java" => "java",
        "cpp" | "c++" => "cpp",
        "c" => "c",
        "csharp" | "cs" => "cs",
        "php" => "php",
        "ruby" | "rb" => "rb",
        "go" => "go",
        "rust" | "rs" => "rs",
        "swift" => "swift",
        "kotlin" | "kt" => "kt",
        "sql" => "sql",
        "html" => "html",
        "css" => "css",
        "json" => "json",
        "xml" => "xml",
        "yaml" | "yml" => "yml",
        "markdown" | "md" => "md",
        "bash" | "shell" | "sh" => "sh",
        "powershell" | "ps1" => "ps1",
        _ => "txt",
    }
}

/// Builds the filename for a generated code artifact.
#[must_use]
pub fn code_artifact_filename(id: ArtifactId, timestamp_millis: i64, language: &str) -> String {
    format!(
        "code_{timestamp_millis}_{}.{}",
        id.short(),
        extension_for_language(language)
    )
}

/// Builds the description for a generated code artifact.
#[must_use]
pub fn code_artifact_description(language: &str) -> String {
    let label = if language.trim().is_empty() {
        "text"
    } else {
        language.trim()
    };
    format!("Code snippet ({label})")
}
