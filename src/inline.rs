//! Inline emphasis, code and link formatting.
//!
//! Rules run as whole-buffer substitutions in a fixed order. None of them
//! crosses a line break, and `\r\n` counts as one. Italic runs before bold
//! italic, so a `__text__` span is normally taken apart by the italic rule
//! first: `__x__` renders as `<em></em>x<em></em>`. That precedence is part
//! of the output format.

use std::sync::LazyLock;

use regex::Regex;

/// A single inline substitution.
struct InlineRule {
    name: &'static str,
    pattern: &'static LazyLock<Regex>,
    replacement: &'static str,
}

static BOLD_RE: LazyLock<Regex> = lazy_regex!(r"(?R)\*(.*?)\*", "valid bold regex");
static ITALIC_RE: LazyLock<Regex> = lazy_regex!(r"(?R)_(.*?)_", "valid italic regex");
static BOLD_ITALIC_RE: LazyLock<Regex> =
    lazy_regex!(r"(?R)__(.*?)__", "valid bold italic regex");
static CODE_RE: LazyLock<Regex> = lazy_regex!(r"(?R)=(.*?)=", "valid fixed font regex");
static LINK_RE: LazyLock<Regex> =
    lazy_regex!(r"(?R)\[\[(.*?)\]\[(.*?)\]\]", "valid bracketed link regex");

static RULES: [InlineRule; 5] = [
    InlineRule {
        name: "bold",
        pattern: &BOLD_RE,
        replacement: "<strong>${1}</strong>",
    },
    InlineRule {
        name: "italic",
        pattern: &ITALIC_RE,
        replacement: "<em>${1}</em>",
    },
    InlineRule {
        name: "bold italic",
        pattern: &BOLD_ITALIC_RE,
        replacement: "<strong><em>${1}</em></strong>",
    },
    InlineRule {
        name: "fixed font",
        pattern: &CODE_RE,
        replacement: "<code>${1}</code>",
    },
    InlineRule {
        name: "link",
        pattern: &LINK_RE,
        replacement: r#"<a href="${1}">${2}</a>"#,
    },
];

/// Apply bold, italic, bold italic, fixed font and link formatting.
///
/// # Examples
///
/// ```
/// use twikiview::inline::format_inline;
///
/// assert_eq!(
///     format_inline("*bold* and =code="),
///     "<strong>bold</strong> and <code>code</code>"
/// );
/// ```
#[must_use]
pub fn format_inline(text: &str) -> String {
    let mut out = text.to_string();
    for rule in &RULES {
        if rule.pattern.is_match(&out) {
            out = rule.pattern.replace_all(&out, rule.replacement).into_owned();
            tracing::trace!(rule = rule.name, "inline rule applied");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("*bold*", "<strong>bold</strong>")]
    #[case("_em_", "<em>em</em>")]
    #[case("=mono=", "<code>mono</code>")]
    #[case(
        "[[http://example.com][Example]]",
        r#"<a href="http://example.com">Example</a>"#
    )]
    #[case("*a* and *b*", "<strong>a</strong> and <strong>b</strong>")]
    fn formats_single_rules(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(format_inline(input), expected);
    }

    #[test]
    fn italic_takes_precedence_over_bold_italic() {
        assert_eq!(format_inline("__x__"), "<em></em>x<em></em>");
    }

    #[test]
    fn spans_do_not_cross_lines() {
        assert_eq!(format_inline("*open\nclose*"), "*open\nclose*");
    }

    #[test]
    fn spans_do_not_cross_crlf() {
        assert_eq!(format_inline("*open\r\nclose*"), "*open\r\nclose*");
        assert_eq!(format_inline("_a_\r\n"), "<em>a</em>\r\n");
    }

    #[test]
    fn unterminated_markers_stay_literal() {
        assert_eq!(format_inline("a * b _ c"), "a * b _ c");
    }

    #[test]
    fn bold_runs_before_italic() {
        assert_eq!(
            format_inline("*_both_*"),
            "<strong><em>both</em></strong>"
        );
    }
}
