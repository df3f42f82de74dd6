//! The rendering pipeline.
//!
//! Rendering is a fixed sequence of [`Stage`]s, each taking the previous
//! stage's text and returning new text. [`PIPELINE`] fixes their order.

use crate::{
    breaks::convert_paragraph_breaks,
    escape::escape_angle_brackets,
    headings::convert_headings,
    inline::format_inline,
    lists::{convert_bullet_lists, convert_numbered_lists},
    shield::{FragmentRegistry, extract, restore},
    table::convert_tables,
};

/// One step of the rendering pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Extract,
    Escape,
    Headings,
    Inline,
    BulletLists,
    NumberedLists,
    Tables,
    Restore,
    ParagraphBreaks,
}

/// Stage order used by [`render_html`].
///
/// * `Extract` precedes `Escape`, so verbatim content is escaped exactly once
///   and raw HTML is never escaped.
/// * `Escape` precedes every formatting stage, so tags the formatters emit
///   are not escaped.
/// * Within `Inline`, italic precedes bold italic.
/// * `Restore` follows every formatting stage, so shielded content is never
///   formatted.
/// * `ParagraphBreaks` runs last, after the line stages have consumed the
///   lines they own.
pub const PIPELINE: [Stage; 9] = [
    Stage::Extract,
    Stage::Escape,
    Stage::Headings,
    Stage::Inline,
    Stage::BulletLists,
    Stage::NumberedLists,
    Stage::Tables,
    Stage::Restore,
    Stage::ParagraphBreaks,
];

impl Stage {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Extract => "extract",
            Self::Escape => "escape",
            Self::Headings => "headings",
            Self::Inline => "inline",
            Self::BulletLists => "bullet lists",
            Self::NumberedLists => "numbered lists",
            Self::Tables => "tables",
            Self::Restore => "restore",
            Self::ParagraphBreaks => "paragraph breaks",
        }
    }

    /// Run this stage over `text`.
    ///
    /// `Extract` replaces the contents of `registry`; `Restore` reads it.
    #[must_use]
    pub fn apply(self, text: &str, registry: &mut FragmentRegistry) -> String {
        match self {
            Self::Extract => {
                let shielded = extract(text);
                *registry = shielded.registry;
                shielded.text
            }
            Self::Escape => escape_angle_brackets(text),
            Self::Headings => convert_headings(text),
            Self::Inline => format_inline(text),
            Self::BulletLists => convert_bullet_lists(text),
            Self::NumberedLists => convert_numbered_lists(text),
            Self::Tables => convert_tables(text),
            Self::Restore => restore(text, registry),
            Self::ParagraphBreaks => convert_paragraph_breaks(text),
        }
    }
}

/// Render TWiki markup as an HTML fragment.
///
/// Every input produces output; malformed markup is passed through as text.
///
/// # Examples
///
/// ```
/// use twikiview::render_html;
/// assert_eq!(render_html("---+ Title"), "<h1>Title</h1><br><br>\n");
/// ```
#[must_use]
#[tracing::instrument(level = "debug", skip_all, fields(len = text.len()))]
pub fn render_html(text: &str) -> String {
    let mut registry = FragmentRegistry::default();
    let mut buffer = text.to_string();
    for stage in PIPELINE {
        buffer = stage.apply(&buffer, &mut registry);
        tracing::trace!(stage = stage.name(), len = buffer.len(), "stage complete");
    }
    buffer
}

/// Wrap an HTML fragment in the minimal preview document.
#[must_use]
pub fn wrap_document(body: &str) -> String {
    format!("<html>\n<body>\n<div>{body}</div>\n</body>\n</html>\n")
}

/// Render TWiki markup as a complete preview document.
#[must_use]
pub fn render_document(text: &str) -> String {
    wrap_document(&render_html(text))
}

/// Whether rendered output carries the document wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    Document,
    Fragment,
}

impl OutputMode {
    #[must_use]
    pub fn render(self, text: &str) -> String {
        match self {
            Self::Document => render_document(text),
            Self::Fragment => render_html(text),
        }
    }
}
