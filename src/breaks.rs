//! Paragraph break formatting.

/// Markup written in place of a blank-line separator.
pub const PARAGRAPH_BREAK: &str = "<br><br>";

/// Replace every pair of consecutive newlines with [`PARAGRAPH_BREAK`].
///
/// Pairs are taken left to right without overlap, so three newlines become a
/// break followed by a single newline. Lone newlines are kept as they are.
///
/// # Examples
///
/// ```
/// use twikiview::breaks::convert_paragraph_breaks;
/// assert_eq!(convert_paragraph_breaks("a\n\nb\nc"), "a<br><br>b\nc");
/// ```
#[must_use]
pub fn convert_paragraph_breaks(text: &str) -> String {
    text.replace("\n\n", PARAGRAPH_BREAK)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("one\ntwo", "one\ntwo")]
    #[case("one\n\ntwo", "one<br><br>two")]
    #[case("one\n\n\ntwo", "one<br><br>\ntwo")]
    #[case("\n\n\n\n", "<br><br><br><br>")]
    #[case("", "")]
    fn converts_blank_line_pairs(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(convert_paragraph_breaks(input), expected);
    }
}
