//! Bullet and numbered list conversion.
//!
//! Both converters share one line automaton. A maximal run of item lines
//! becomes a single list; the first non-item line closes it and is emitted
//! unchanged. Items are written without a trailing newline so the closing
//! tag sits directly before the line that ended the list. Only one level is
//! supported: `** x` is ordinary text.

use std::sync::LazyLock;

use regex::Regex;

static NUMBERED_RE: LazyLock<Regex> = lazy_regex!(r"^[0-9]+\. ", "valid numbered item regex");

/// The two flavours of list the automaton recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// Lines starting with `* `, rendered as `<ul>`.
    Bullet,
    /// Lines starting with digits, `.` and a space, rendered as `<ol>`.
    Numbered,
}

impl ListKind {
    fn tags(self) -> (&'static str, &'static str) {
        match self {
            Self::Bullet => ("<ul>", "</ul>"),
            Self::Numbered => ("<ol>", "</ol>"),
        }
    }

    /// Return the item text if the trimmed line is an item of this kind.
    ///
    /// Numbers are not validated, so `9.` followed by `1.` continues the run.
    #[must_use]
    pub fn item_text(self, trimmed: &str) -> Option<&str> {
        match self {
            Self::Bullet => trimmed.strip_prefix("* "),
            Self::Numbered => {
                if !NUMBERED_RE.is_match(trimmed) {
                    return None;
                }
                trimmed.split_once(". ").map(|(_, rest)| rest)
            }
        }
    }
}

/// Run the list automaton for `kind` over every line of `text`.
#[must_use]
pub fn convert_list_blocks(text: &str, kind: ListKind) -> String {
    let (open, close) = kind.tags();
    let mut out = String::with_capacity(text.len() + open.len() + close.len());
    let mut in_list = false;

    for line in text.split('\n') {
        if let Some(item) = kind.item_text(line.trim()) {
            if !in_list {
                out.push_str(open);
                in_list = true;
            }
            out.push_str("<li>");
            out.push_str(item);
            out.push_str("</li>");
            continue;
        }

        if in_list {
            out.push_str(close);
            in_list = false;
        }
        out.push_str(line);
        out.push('\n');
    }

    if in_list {
        out.push_str(close);
    }
    out
}

/// Convert runs of `* item` lines into `<ul>` lists.
///
/// # Examples
///
/// ```
/// use twikiview::lists::convert_bullet_lists;
/// assert_eq!(
///     convert_bullet_lists("* a\n* b"),
///     "<ul><li>a</li><li>b</li></ul>"
/// );
/// ```
#[must_use]
pub fn convert_bullet_lists(text: &str) -> String {
    convert_list_blocks(text, ListKind::Bullet)
}

/// Convert runs of `1. item` lines into `<ol>` lists.
#[must_use]
pub fn convert_numbered_lists(text: &str) -> String {
    convert_list_blocks(text, ListKind::Numbered)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn bullet_run_forms_one_list() {
        assert_eq!(
            convert_bullet_lists("* a\n* b\n* c"),
            "<ul><li>a</li><li>b</li><li>c</li></ul>"
        );
    }

    #[test]
    fn non_item_line_closes_list() {
        assert_eq!(
            convert_bullet_lists("intro\n* a\n  * b\noutro"),
            "intro\n<ul><li>a</li><li>b</li></ul>outro\n"
        );
    }

    #[rstest]
    #[case("** nested")]
    #[case("*no space")]
    #[case("- dash")]
    fn bullet_marker_must_be_exact(#[case] line: &str) {
        assert_eq!(convert_bullet_lists(line), format!("{line}\n"));
    }

    #[test]
    fn numbered_run_forms_one_list() {
        assert_eq!(
            convert_numbered_lists("1. a\n2. b"),
            "<ol><li>a</li><li>b</li></ol>"
        );
    }

    #[test]
    fn numbering_is_not_validated() {
        assert_eq!(
            convert_numbered_lists("9. nine\n1. one\n 10. ten"),
            "<ol><li>nine</li><li>one</li><li>ten</li></ol>"
        );
    }

    #[test]
    fn numbered_text_follows_first_separator() {
        assert_eq!(
            convert_numbered_lists("3. see 4. below"),
            "<ol><li>see 4. below</li></ol>"
        );
    }

    #[rstest]
    #[case("1.no space")]
    #[case("a. letter")]
    #[case(". dot")]
    fn numbered_predicate_rejects(#[case] line: &str) {
        assert_eq!(convert_numbered_lists(line), format!("{line}\n"));
    }

    #[test]
    fn item_text_per_kind() {
        assert_eq!(ListKind::Bullet.item_text("* x"), Some("x"));
        assert_eq!(ListKind::Bullet.item_text("1. x"), None);
        assert_eq!(ListKind::Numbered.item_text("12. x"), Some("x"));
        assert_eq!(ListKind::Numbered.item_text("* x"), None);
    }
}
