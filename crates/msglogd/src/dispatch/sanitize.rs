//! Line clean-up applied before parsing.

/// Returns `true` for characters a request line may carry.
fn is_printable(character: char) -> bool {
    !character.is_control()
}

/// Cleans a raw request line.
///
/// Trailing characters are removed while they are ASCII whitespace or
/// non-printable. Every non-printable character left in the line is then
/// dropped. The order matters: a tab in the middle of a line survives the
/// first pass and is removed by the second, whereas a trailing space is only
/// caught by the first.
#[must_use]
pub fn sanitize_line(raw: &str) -> String {
    raw.trim_end_matches(|character: char| {
        character.is_ascii_whitespace() || !is_printable(character)
    })
    .chars()
    .filter(|character| is_printable(*character))
    .collect()
}
