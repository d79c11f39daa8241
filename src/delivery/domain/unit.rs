//! Platform-ready messages produced by the pipeline.

use super::artifact::Artifact;
use std::fmt;

/// How a unit came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    /// Prose, possibly one piece of a split text segment.
    Text,
    /// A code block that fit inline.
    CodeBlock,
    /// A placeholder for a code block delivered as a file.
    CodeBlockAttachment,
    /// One fenced chunk of a code block that had to be split.
    CodeBlockSplit,
}

impl UnitKind {
    /// Returns the canonical string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::CodeBlock => "codeblock",
            Self::CodeBlockAttachment => "codeblock-attachment",
            Self::CodeBlockSplit => "codeblock-split",
        }
    }

    /// Returns `true` for any of the code block kinds.
    #[must_use]
    pub const fn is_code(self) -> bool {
        !matches!(self, Self::Text)
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position of a split chunk within its code block, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartInfo {
    /// Index of this chunk, starting at 1.
    pub index: usize,
    /// Total number of chunks for the block.
    pub count: usize,
}

/// One message ready to hand to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliverableUnit {
    content: String,
    kind: UnitKind,
    attachment: Option<Artifact>,
    part: Option<PartInfo>,
}

impl DeliverableUnit {
    /// Creates a text unit.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::new(content, UnitKind::Text)
    }

    /// Creates an inline code block unit.
    #[must_use]
    pub fn code_block(content: impl Into<String>) -> Self {
        Self::new(content, UnitKind::CodeBlock)
    }

    /// Creates a placeholder unit carrying the artifact that holds the code.
    #[must_use]
    pub fn code_block_attachment(content: impl Into<String>, attachment: Artifact) -> Self {
        Self {
            attachment: Some(attachment),
            ..Self::new(content, UnitKind::CodeBlockAttachment)
        }
    }

    /// Creates one chunk of a split code block.
    #[must_use]
    pub fn code_block_split(content: impl Into<String>, part: PartInfo) -> Self {
        Self {
            part: Some(part),
            ..Self::new(content, UnitKind::CodeBlockSplit)
        }
    }

    fn new(content: impl Into<String>, kind: UnitKind) -> Self {
        Self {
            content: content.into(),
            kind,
            attachment: None,
            part: None,
        }
    }

    /// Returns the message text.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the unit kind.
    #[must_use]
    pub const fn kind(&self) -> UnitKind {
        self.kind
    }

    /// Returns the unit's own attachment, if any.
    #[must_use]
    pub const fn attachment(&self) -> Option<&Artifact> {
        self.attachment.as_ref()
    }

    /// Returns chunk numbering for split code blocks.
    #[must_use]
    pub const fn part(&self) -> Option<PartInfo> {
        self.part
    }

    /// Returns the content length in characters.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }
}
