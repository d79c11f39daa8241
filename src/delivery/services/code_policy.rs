//! Placement of code blocks: inline, as an attachment, or split into chunks.

use crate::delivery::{
    domain::{CodeSegment, DeliverableUnit, FENCE, PartInfo, byte_offset_of_char},
    ports::ArtifactStore,
};
use tracing::{debug, warn};

/// Visible text of a code block moved into an attachment.
pub const ATTACHMENT_PLACEHOLDER: &str = "[Code too large - see attachment]";

const CLOSING_FENCE: &str = "\n```";

/// Size-based placement rules for fenced code blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeBlockPolicy {
    max_length: usize,
    attachment_threshold: usize,
}

impl CodeBlockPolicy {
    /// Creates a policy for the given limits, both in characters.
    #[must_use]
    pub const fn new(max_length: usize, attachment_threshold: usize) -> Self {
        Self {
            max_length,
            attachment_threshold,
        }
    }

    /// Decides how `segment` is delivered.
    ///
    /// Blocks up to the attachment threshold stay inline. Larger blocks are
    /// written to `store` and replaced by a placeholder; without a store, or
    /// when the store fails, they are split into self-contained fenced
    /// chunks.
    pub async fn place<S>(&self, segment: &CodeSegment, store: Option<&S>) -> Vec<DeliverableUnit>
    where
        S: ArtifactStore + ?Sized,
    {
        let length = segment.raw_char_len();
        if length <= self.attachment_threshold {
            return vec![DeliverableUnit::code_block(segment.raw())];
        }

        let Some(artifact_store) = store else {
            debug!(length, "no artifact store, splitting code block inline");
            return self.split_inline(segment);
        };

        match artifact_store.create(segment.body(), segment.language()).await {
            Ok(artifact) => {
                debug!(
                    length,
                    filename = artifact.filename(),
                    "code block moved to attachment"
                );
                vec![DeliverableUnit::code_block_attachment(
                    self.placeholder(segment.language()),
                    artifact,
                )]
            }
            Err(err) => {
                warn!(
                    error = %err,
                    language = segment.language(),
                    "artifact creation failed, splitting code block inline"
                );
                self.split_inline(segment)
            }
        }
    }

    /// Splits a code block by line into fenced chunks of at most
    /// `max_length` characters each.
    ///
    /// Chunk bodies joined with `\n` reproduce the original body. A single
    /// line too long for one chunk is wrapped across chunks.
    #[must_use]
    pub fn split_inline(&self, segment: &CodeSegment) -> Vec<DeliverableUnit> {
        let opening = self.opening_fence(segment.language());
        let overhead = opening.chars().count() + CLOSING_FENCE.len();
        let capacity = self.max_length.saturating_sub(overhead).max(1);

        let mut chunks = Vec::new();
        let mut current = String::new();
        let mut current_length = 0;
        let mut has_line = false;

        for line in segment.body().split('\n') {
            for piece in wrap_line(line, capacity) {
                let piece_length = piece.chars().count();
                if has_line && current_length + 1 + piece_length > capacity {
                    chunks.push(std::mem::take(&mut current));
                    current_length = 0;
                    has_line = false;
                }
                if has_line {
                    current.push('\n');
                    current_length += 1;
                }
                current.push_str(piece);
                current_length += piece_length;
                has_line = true;
            }
        }
        if has_line {
            chunks.push(current);
        }

        let count = chunks.len();
        debug!(chunks = count, "split code block inline");
        chunks
            .into_iter()
            .enumerate()
            .map(|(position, chunk)| {
                DeliverableUnit::code_block_split(
                    format!("{opening}{chunk}{CLOSING_FENCE}"),
                    PartInfo {
                        index: position + 1,
                        count,
                    },
                )
            })
            .collect()
    }

    /// Returns the placeholder shown in place of an attached code block.
    #[must_use]
    pub fn placeholder(&self, language: &str) -> String {
        let tagged = format!("{FENCE}{language}\n{ATTACHMENT_PLACEHOLDER}{CLOSING_FENCE}");
        if tagged.chars().count() <= self.max_length {
            tagged
        } else {
            format!("{FENCE}\n{ATTACHMENT_PLACEHOLDER}{CLOSING_FENCE}")
        }
    }

    /// Opening fence line, dropping the language tag if it would leave no
    /// room for code.
    fn opening_fence(&self, language: &str) -> String {
        let tagged = format!("{FENCE}{language}\n");
        if tagged.chars().count() + CLOSING_FENCE.len() < self.max_length {
            tagged
        } else {
            format!("{FENCE}\n")
        }
    }
}

fn wrap_line(line: &str, capacity: usize) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut rest = line;
    while let Some(end) = byte_offset_of_char(rest, capacity) {
        let Some((head, tail)) = rest.split_at_checked(end) else {
            break;
        };
        pieces.push(head);
        rest = tail;
    }
    pieces.push(rest);
    pieces
}
