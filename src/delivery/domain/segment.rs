//! Typed spans of a raw AI response.

use std::ops::Range;

/// One contiguous span of the original response, in left-to-right order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Prose outside any recognised fence.
    Text(TextSegment),
    /// A well-formed fenced code block.
    Code(CodeSegment),
}

impl Segment {
    /// Returns the segment text as it should be emitted.
    ///
    /// Text segments are already trimmed; code segments include both fences.
    #[must_use]
    pub fn raw(&self) -> &str {
        match self {
            Self::Text(text) => text.content(),
            Self::Code(code) => code.raw(),
        }
    }

    /// Returns the byte range of the input this segment was taken from.
    #[must_use]
    pub fn span(&self) -> Range<usize> {
        match self {
            Self::Text(text) => text.span.clone(),
            Self::Code(code) => code.span.clone(),
        }
    }

    /// Returns `true` for code segments.
    #[must_use]
    pub const fn is_code(&self) -> bool {
        matches!(self, Self::Code(_))
    }
}

/// Plain text between fences, trimmed of surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSegment {
    content: String,
    span: Range<usize>,
}

impl TextSegment {
    /// Creates a text segment covering `span` of the original input.
    #[must_use]
    pub fn new(content: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            content: content.into(),
            span,
        }
    }

    /// Returns the trimmed text.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the length in characters.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }
}

/// A fenced code block.
///
/// `raw` keeps the fences verbatim while `body` holds only the lines between
/// them, without the trailing line break before the closing fence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeSegment {
    raw: String,
    language: String,
    body: String,
    span: Range<usize>,
}

impl CodeSegment {
    /// Creates a code segment.
    #[must_use]
    pub fn new(
        raw: impl Into<String>,
        language: impl Into<String>,
        body: impl Into<String>,
        span: Range<usize>,
    ) -> Self {
        Self {
            raw: raw.into(),
            language: language.into(),
            body: body.into(),
            span,
        }
    }

    /// Returns the block including its opening and closing fences.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Returns the language tag, possibly empty.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Returns the code between the fences.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the length of the fenced block in characters.
    #[must_use]
    pub fn raw_char_len(&self) -> usize {
        self.raw.chars().count()
    }
}
