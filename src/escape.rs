//! Angle bracket escaping.
//!
//! Only `<` and `>` are escaped. Ampersands pass through untouched, so
//! numeric references such as `&#124;` typed by the author survive until the
//! table stage decodes them.

/// Replace `<` with `&lt;` and `>` with `&gt;`.
///
/// # Examples
///
/// ```
/// use twikiview::escape::escape_angle_brackets;
/// assert_eq!(escape_angle_brackets("a <b> & c"), "a &lt;b&gt; & c");
/// ```
#[must_use]
pub fn escape_angle_brackets(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}
