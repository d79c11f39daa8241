//! Linear fence scanner that partitions a response into typed segments.
//!
//! The scan walks the input line by line with two states. Outside a fence,
//! a line whose first non-blank characters are a triple backtick (followed by
//! an optional language tag and no further backticks) opens a block. Inside
//! a fence, a line holding nothing but a triple backtick closes it. Nothing
//! is emitted for a block until its closing line is seen, so an unterminated
//! fence rolls back to the text that preceded it and the whole tail is kept
//! as plain text.

use super::segment::{CodeSegment, Segment, TextSegment};
use std::ops::Range;
use tracing::{debug, info};

/// The code fence delimiter.
pub const FENCE: &str = "```";

/// Separator used by [`rejoin`] between segments.
const SEGMENT_SEPARATOR: &str = "\n\n";

#[derive(Debug)]
enum ScanState {
    OutsideFence,
    InFence {
        fence_start: usize,
        body_start: usize,
        language: String,
    },
}

/// Splits a raw response into ordered text and code segments.
///
/// Text outside fences is trimmed and dropped when empty. An input without
/// any well-formed block yields at most one text segment.
///
/// # Examples
///
/// ```
/// use chatrelay::delivery::domain::{Segment, segment};
///
/// let segments = segment("Intro\n```rust\nfn main() {}\n```\nOutro");
/// assert_eq!(segments.len(), 3);
/// assert!(matches!(&segments[1], Segment::Code(code) if code.language() == "rust"));
/// ```
#[must_use]
pub fn segment(response: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut state = ScanState::OutsideFence;
    let mut text_start = 0;
    let mut offset = 0;

    for line in response.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();
        let content = line.trim_end_matches(['\n', '\r']);

        match state {
            ScanState::OutsideFence => {
                if let Some(language) = opening_fence_language(content) {
                    state = ScanState::InFence {
                        fence_start: line_start,
                        body_start: offset,
                        language,
                    };
                }
            }
            ScanState::InFence {
                fence_start,
                body_start,
                ref language,
            } => {
                if is_closing_fence(content) {
                    let fence_end = line_start + content.len();
                    push_text(&mut segments, response, text_start..fence_start);
                    segments.push(Segment::Code(CodeSegment::new(
                        response.get(fence_start..fence_end).unwrap_or_default(),
                        language.as_str(),
                        block_body(response, body_start..line_start),
                        fence_start..fence_end,
                    )));
                    text_start = offset;
                    state = ScanState::OutsideFence;
                }
            }
        }
    }

    if let ScanState::InFence { fence_start, .. } = state {
        info!(
            fence_offset = fence_start,
            "unterminated code fence kept as plain text"
        );
    }
    push_text(&mut segments, response, text_start..response.len());

    debug!(
        segments = segments.len(),
        code_blocks = segments.iter().filter(|part| part.is_code()).count(),
        "segmented response"
    );
    segments
}

/// Joins segments back into a single response.
///
/// Segmenting the result yields the same segment contents again.
#[must_use]
pub fn rejoin(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(Segment::raw)
        .collect::<Vec<_>>()
        .join(SEGMENT_SEPARATOR)
}

fn push_text(segments: &mut Vec<Segment>, response: &str, span: Range<usize>) {
    let Some(text) = response.get(span.clone()) else {
        return;
    };
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        segments.push(Segment::Text(TextSegment::new(trimmed, span)));
    }
}

fn opening_fence_language(line: &str) -> Option<String> {
    let rest = line.trim_start().strip_prefix(FENCE)?;
    if rest.contains('`') {
        return None;
    }
    Some(rest.trim().to_owned())
}

fn is_closing_fence(line: &str) -> bool {
    line.trim() == FENCE
}

fn block_body(response: &str, span: Range<usize>) -> &str {
    let inner = response.get(span).unwrap_or_default();
    let without_newline = inner.strip_suffix('\n').unwrap_or(inner);
    without_newline
        .strip_suffix('\r')
        .unwrap_or(without_newline)
}
