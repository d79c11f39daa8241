//! Boundary-quality text splitting.
//!
//! Lengths are measured in characters. Each iteration looks only at the
//! first `max_length` characters of what remains and cuts at the best
//! boundary found there, in this order: paragraph break past 40% of the
//! window, sentence end past 50%, line break past 30%, space past 30%,
//! otherwise a hard cut at the window end.

use tracing::debug;

const SENTENCE_ENDINGS: [&str; 6] = [". ", "! ", "? ", ".\n", "!\n", "?\n"];

/// The kind of boundary a split was made at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakKind {
    /// Double newline.
    Paragraph,
    /// Sentence terminator followed by a space or newline.
    Sentence,
    /// Single newline.
    Line,
    /// Space between words.
    Word,
    /// No boundary found; the window is cut at its end.
    Hard,
}

/// A chosen cut inside a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakPoint {
    /// Byte offset in the window where the next piece starts.
    pub offset: usize,
    /// Boundary quality.
    pub kind: BreakKind,
}

/// Splits `text` into pieces of at most `max_length` characters.
///
/// Pieces are trimmed and never empty. A `max_length` of zero is treated as
/// one so the loop always makes progress.
///
/// # Examples
///
/// ```
/// use chatrelay::delivery::domain::split_text;
///
/// let pieces = split_text("First sentence here. Second one follows.", 25);
/// assert_eq!(pieces, vec!["First sentence here.", "Second one follows."]);
/// ```
#[must_use]
pub fn split_text(text: &str, max_length: usize) -> Vec<String> {
    let limit = max_length.max(1);
    let mut pieces = Vec::new();
    let mut remaining = text.trim();

    while let Some(window_end) = byte_offset_of_char(remaining, limit) {
        let Some(window) = remaining.get(..window_end) else {
            break;
        };
        let cut = find_break_point(window);
        debug!(kind = ?cut.kind, offset = cut.offset, "split text window");

        let (head, tail) = remaining.split_at_checked(cut.offset).unwrap_or((remaining, ""));
        let piece = head.trim();
        if !piece.is_empty() {
            pieces.push(piece.to_owned());
        }
        remaining = tail.trim();
    }

    if !remaining.is_empty() {
        pieces.push(remaining.to_owned());
    }
    pieces
}

/// Picks the best cut inside `window`.
///
/// The returned offset is always greater than zero for a non-empty window.
#[must_use]
pub fn find_break_point(window: &str) -> BreakPoint {
    let length = window.chars().count();

    if let Some(offset) = last_boundary_past(window, "\n\n", length, 4) {
        return BreakPoint {
            offset,
            kind: BreakKind::Paragraph,
        };
    }

    let sentence = SENTENCE_ENDINGS
        .iter()
        .filter_map(|ending| last_boundary_past(window, ending, length, 5))
        .max();
    if let Some(offset) = sentence {
        return BreakPoint {
            offset,
            kind: BreakKind::Sentence,
        };
    }

    if let Some(offset) = last_boundary_past(window, "\n", length, 3) {
        return BreakPoint {
            offset,
            kind: BreakKind::Line,
        };
    }

    if let Some(offset) = last_boundary_past(window, " ", length, 3) {
        return BreakPoint {
            offset,
            kind: BreakKind::Word,
        };
    }

    BreakPoint {
        offset: window.len(),
        kind: BreakKind::Hard,
    }
}

/// Finds the last `needle` whose character position lies strictly past
/// `tenths`/10 of `length`, returning the byte offset just after it.
fn last_boundary_past(window: &str, needle: &str, length: usize, tenths: usize) -> Option<usize> {
    let position = window.rfind(needle)?;
    let char_position = window.get(..position)?.chars().count();
    (char_position.saturating_mul(10) > length.saturating_mul(tenths))
        .then_some(position + needle.len())
}

/// Returns the byte offset of the character at index `count`, or `None` when
/// `text` has `count` characters or fewer.
pub(crate) fn byte_offset_of_char(text: &str, count: usize) -> Option<usize> {
    text.char_indices().nth(count).map(|(offset, _)| offset)
}
