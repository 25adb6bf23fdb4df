//! Character-level substitutions for text leaves.

/// U+2061 FUNCTION APPLICATION, inserted by canonicalizers between a
/// function and its argument. Invisible, and removed entirely.
pub const FUNCTION_APPLICATION: char = '\u{2061}';

/// Normalize look-alike codepoints in leaf text.
///
/// U+2212 MINUS SIGN becomes an ASCII hyphen-minus, U+2009 THIN SPACE
/// becomes a plain space, and the function-application marker is deleted
/// wherever it occurs. Pure function of the string; whitespace trimming is
/// the caller's concern.
pub fn normalize_characters(s: &str) -> String {
    s.chars()
        .filter_map(|c| match c {
            '\u{2212}' => Some('-'),
            '\u{2009}' => Some(' '),
            FUNCTION_APPLICATION => None,
            other => Some(other),
        })
        .collect()
}
