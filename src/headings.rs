//! TWiki heading conversion.
//!
//! A heading is written as three dashes followed by one plus sign per level,
//! a space and the title: `---++ Section` becomes `<h2>Section</h2>`. Levels
//! one to five are recognised. Each level is a separate whole-buffer pass,
//! applied from level one upwards; because a pass consumes the text it
//! matches, a line is rewritten by at most one of them. A title ends at the
//! first `\r` or `\n`.

use std::sync::LazyLock;

use regex::Regex;

/// Deepest heading level that is converted.
pub const MAX_HEADING_LEVEL: usize = 5;

static HEADING_RES: LazyLock<[Regex; MAX_HEADING_LEVEL]> = LazyLock::new(|| {
    std::array::from_fn(|idx| {
        Regex::new(&format!(r"(?R)---\+{{{}}} (.*)", idx + 1)).expect("valid heading regex")
    })
});

/// Convert `---+` style heading markers into `<h1>` to `<h5>` tags.
///
/// Markers with more than five plus signs are left alone.
///
/// # Examples
///
/// ```
/// use twikiview::headings::convert_headings;
/// assert_eq!(convert_headings("---+++ Usage"), "<h3>Usage</h3>");
/// ```
#[must_use]
pub fn convert_headings(text: &str) -> String {
    let mut out = text.to_string();
    for (idx, re) in HEADING_RES.iter().enumerate() {
        let level = idx + 1;
        let replacement = format!("<h{level}>${{1}}</h{level}>");
        out = re.replace_all(&out, replacement.as_str()).into_owned();
    }
    out
}
