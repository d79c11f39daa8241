//! Removal of characters that chat platforms mangle or reject.

/// Strips NUL and zero-width characters from a response.
///
/// # Examples
///
/// ```
/// use chatrelay::delivery::domain::sanitize_content;
///
/// assert_eq!(sanitize_content("a\u{200B}b\u{0}c\u{FEFF}"), "abc");
/// ```
#[must_use]
pub fn sanitize_content(content: &str) -> String {
    content
        .chars()
        .filter(|character| !is_stripped(*character))
        .collect()
}

const fn is_stripped(character: char) -> bool {
    matches!(character, '\u{0}' | '\u{200B}'..='\u{200D}' | '\u{FEFF}')
}
