//! TWiki table conversion.
//!
//! Lines whose trimmed form starts with `|` are table rows. A row ending in
//! `\` continues on the next row line; the pieces are concatenated before the
//! row is split into cells. Consecutive rows share one `<table>` which the
//! first non-table line closes. A non-table line leaves a continued row
//! pending, so it joins the next row line; a row still pending at the end of
//! the input is dropped.
//!
//! Cell rules:
//! * `*text*` cells are bold.
//! * More leading than trailing whitespace aligns right; equal padding of at
//!   least two characters centres the cell.
//! * Blank tokens, such as those between `||`, produce no cell.
//! * The column span is the number of `|` runs left in the cell text.
//! * `%VBAR%` and `&#124;` become `|`; `%CARET%` and `&#94;` become `^`.

use std::sync::LazyLock;

use regex::Regex;

static PIPE_RUN_RE: LazyLock<Regex> = lazy_regex!(r"\|+", "valid pipe run regex");
static VBAR_RE: LazyLock<Regex> = lazy_regex!(r"%VBAR%|&#124;", "valid vbar regex");
static CARET_RE: LazyLock<Regex> = lazy_regex!(r"%CARET%|&#94;", "valid caret regex");

/// Horizontal alignment of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    /// No explicit alignment; no style attribute is written.
    #[default]
    Left,
    Right,
    Center,
}

impl Alignment {
    /// Classify a cell from the whitespace around its untrimmed token.
    #[must_use]
    pub fn from_padding(leading: usize, trailing: usize) -> Self {
        if leading > trailing {
            Self::Right
        } else if leading == trailing && leading >= 2 {
            Self::Center
        } else {
            Self::Left
        }
    }

    fn style_attr(self) -> Option<&'static str> {
        match self {
            Self::Left => None,
            Self::Right => Some(r#"style="text-align: right;""#),
            Self::Center => Some(r#"style="text-align: center;""#),
        }
    }
}

/// One rendered table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub alignment: Alignment,
    pub bold: bool,
    pub colspan: usize,
}

impl Cell {
    /// Build a cell from a token produced by splitting a row on `|`.
    ///
    /// Returns `None` for blank tokens.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return None;
        }

        let bold = trimmed.starts_with('*') && trimmed.ends_with('*');
        let text = if bold {
            let inner = trimmed.get(1..trimmed.len() - 1).unwrap_or_default();
            format!("<strong>{inner}</strong>")
        } else {
            trimmed.to_string()
        };

        let leading = token.chars().take_while(|c| c.is_whitespace()).count();
        let trailing = token.chars().rev().take_while(|c| c.is_whitespace()).count();
        let alignment = Alignment::from_padding(leading, trailing);

        // Counted before escapes are decoded, so decoded bars never span.
        let colspan = PIPE_RUN_RE.find_iter(&text).count();

        let text = VBAR_RE.replace_all(&text, "|");
        let text = CARET_RE.replace_all(&text, "^").into_owned();

        Some(Self {
            text,
            alignment,
            bold,
            colspan,
        })
    }

    fn render(&self, out: &mut String) {
        out.push_str("<td");
        if let Some(style) = self.alignment.style_attr() {
            out.push(' ');
            out.push_str(style);
        }
        if self.colspan > 1 {
            out.push_str(&format!(r#" colspan="{}""#, self.colspan));
        }
        out.push('>');
        out.push_str(&self.text);
        out.push_str("</td>");
    }
}

/// Split a logical row into its non-blank cells.
///
/// # Examples
///
/// ```
/// use twikiview::table::parse_row;
///
/// let cells = parse_row("| A |  B|");
/// assert_eq!(cells.len(), 2);
/// assert_eq!(cells[1].text, "B");
/// ```
#[must_use]
pub fn parse_row(row: &str) -> Vec<Cell> {
    row.split('|').filter_map(Cell::parse).collect()
}

/// Line automaton state for [`convert_tables`].
#[derive(Default)]
struct TableWriter {
    out: String,
    in_table: bool,
    pending: String,
    rows: usize,
}

impl TableWriter {
    fn emit_pending_row(&mut self) {
        if !self.in_table {
            self.out.push_str("<table>");
            self.in_table = true;
        }
        self.out.push_str("<tr>");
        for cell in parse_row(&self.pending) {
            cell.render(&mut self.out);
        }
        self.out.push_str("</tr>");
        self.pending.clear();
        self.rows += 1;
    }

    fn close(&mut self) {
        if self.in_table {
            self.out.push_str("</table>");
            self.in_table = false;
        }
    }

    fn push_line(&mut self, line: &str) {
        let trimmed = line.trim();
        if !trimmed.starts_with('|') {
            self.close();
            self.out.push_str(line);
            self.out.push('\n');
            return;
        }

        if let Some(head) = trimmed.strip_suffix('\\') {
            self.pending.push_str(head);
            return;
        }
        self.pending.push_str(trimmed);
        self.emit_pending_row();
    }

    fn finish(mut self) -> String {
        self.close();
        tracing::debug!(
            rows = self.rows,
            dropped = !self.pending.is_empty(),
            "converted table rows"
        );
        self.out
    }
}

/// Convert TWiki table rows into HTML tables.
///
/// # Examples
///
/// ```
/// use twikiview::table::convert_tables;
///
/// assert_eq!(
///     convert_tables("| A | B |"),
///     "<table><tr><td>A</td><td>B</td></tr></table>"
/// );
/// ```
#[must_use]
pub fn convert_tables(text: &str) -> String {
    let mut writer = TableWriter {
        out: String::with_capacity(text.len()),
        ..TableWriter::default()
    };
    for line in text.split('\n') {
        writer.push_line(line);
    }
    writer.finish()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(3, 1, Alignment::Right)]
    #[case(1, 0, Alignment::Right)]
    #[case(2, 2, Alignment::Center)]
    #[case(4, 4, Alignment::Center)]
    #[case(1, 1, Alignment::Left)]
    #[case(0, 0, Alignment::Left)]
    #[case(1, 3, Alignment::Left)]
    fn alignment_from_padding(
        #[case] leading: usize,
        #[case] trailing: usize,
        #[case] expected: Alignment,
    ) {
        assert_eq!(Alignment::from_padding(leading, trailing), expected);
    }

    #[test]
    fn plain_row_has_no_attributes() {
        assert_eq!(
            convert_tables("| A | B |"),
            "<table><tr><td>A</td><td>B</td></tr></table>"
        );
    }

    #[test]
    fn aligned_cells_carry_style() {
        assert_eq!(
            convert_tables("|   r |  c  | l  |"),
            concat!(
                r#"<table><tr><td style="text-align: right;">r</td>"#,
                r#"<td style="text-align: center;">c</td><td>l</td></tr></table>"#
            )
        );
    }

    #[rstest]
    #[case("*head*", "<strong>head</strong>", true)]
    #[case("*", "<strong></strong>", true)]
    #[case("*a", "*a", false)]
    fn bold_cells(#[case] token: &str, #[case] text: &str, #[case] bold: bool) {
        let cell = Cell::parse(token).expect("non-blank token");
        assert_eq!(cell.text, text);
        assert_eq!(cell.bold, bold);
    }

    #[test]
    fn blank_tokens_are_skipped_without_span() {
        assert_eq!(
            convert_tables("| a || b |"),
            "<table><tr><td>a</td><td>b</td></tr></table>"
        );
    }

    #[rstest]
    #[case("a|b", 1)]
    #[case("a||b", 1)]
    #[case("a|b|c", 2)]
    #[case("%VBAR%%VBAR%", 0)]
    fn colspan_counts_pipe_runs_in_text(#[case] token: &str, #[case] colspan: usize) {
        let cell = Cell::parse(token).expect("non-blank token");
        assert_eq!(cell.colspan, colspan);
    }

    #[test]
    fn colspan_attribute_written_above_one() {
        let cell = Cell::parse("a|b|c").expect("non-blank token");
        let mut out = String::new();
        cell.render(&mut out);
        assert_eq!(out, r#"<td colspan="2">a|b|c</td>"#);
    }

    #[test]
    fn escaped_bar_and_caret_are_decoded() {
        assert_eq!(
            convert_tables("| a %VBAR% b | &#124; | %CARET% &#94; |"),
            "<table><tr><td>a | b</td><td>|</td><td>^ ^</td></tr></table>"
        );
    }

    #[test]
    fn continued_row_is_merged() {
        assert_eq!(
            convert_tables("| a \\\n| b |"),
            "<table><tr><td>a</td><td>b</td></tr></table>"
        );
    }

    #[test]
    fn continuation_spans_many_lines() {
        let out = convert_tables("| a \\\n| b \\\n| c |\n| d |");
        assert_eq!(out.matches("<tr>").count(), 2);
        assert!(out.contains("<tr><td>a</td><td>b</td><td>c</td></tr>"));
    }

    #[test]
    fn non_table_line_closes_table() {
        assert_eq!(
            convert_tables("before\n| a |\nafter"),
            "before\n<table><tr><td>a</td></tr></table>after\n"
        );
    }

    #[test]
    fn continuation_survives_non_table_line() {
        assert_eq!(
            convert_tables("| a \\\nplain\n| b |"),
            "plain\n<table><tr><td>a</td><td>b</td></tr></table>"
        );
    }

    #[test]
    fn unfinished_row_at_end_is_dropped() {
        assert_eq!(convert_tables("before\n| a \\"), "before\n");
    }
}
