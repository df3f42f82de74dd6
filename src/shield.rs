//! Shielding of verbatim blocks and raw HTML.
//!
//! [`extract`] lifts every `<verbatim>` block and every line-start HTML tag
//! out of the document before any other stage runs. Each region is stored in
//! a [`FragmentRegistry`] and replaced by an opaque marker carrying its
//! [`Handle`]. [`restore`] swaps the markers back once formatting is done.
//!
//! Markers are built from the private-use sentinels `U+E000` and `U+E001`.
//! Sentinels already present in the source are themselves registered as raw
//! fragments, so the only sentinels left in the working text belong to
//! markers issued by [`extract`].

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::escape::escape_angle_brackets;

const MARKER_OPEN: char = '\u{E000}';
const MARKER_CLOSE: char = '\u{E001}';

static VERBATIM_RE: LazyLock<Regex> = lazy_regex!(
    r"(?s)<verbatim>(.*?)</verbatim>",
    "valid verbatim block regex"
);

// A tag opening a line runs through its first `>`, which may sit on a later
// line. Text after that `>` stays in the document and is formatted.
static RAW_HTML_RE: LazyLock<Regex> =
    lazy_regex!(r"(?m)^[ \t]*<[^>]*>", "valid raw html regex");

static MARKER_RE: LazyLock<Regex> =
    lazy_regex!(r"\x{E000}([vh])([0-9]+)\x{E001}", "valid marker regex");

/// The two kinds of shielded region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentKind {
    /// Content of a `<verbatim>` block, stored already escaped.
    Verbatim,
    /// Raw HTML reinserted byte for byte.
    RawHtml,
}

impl FragmentKind {
    fn tag(self) -> char {
        match self {
            Self::Verbatim => 'v',
            Self::RawHtml => 'h',
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "v" => Some(Self::Verbatim),
            "h" => Some(Self::RawHtml),
            _ => None,
        }
    }
}

/// Opaque reference to a fragment held by a [`FragmentRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    kind: FragmentKind,
    index: usize,
}

impl Handle {
    #[must_use]
    pub fn kind(self) -> FragmentKind {
        self.kind
    }

    #[must_use]
    pub fn index(self) -> usize {
        self.index
    }

    /// The marker standing in for this fragment in the working text.
    #[must_use]
    pub fn marker(self) -> String {
        format!(
            "{MARKER_OPEN}{}{}{MARKER_CLOSE}",
            self.kind.tag(),
            self.index
        )
    }

    fn from_captures(caps: &Captures<'_>) -> Option<Self> {
        let kind = FragmentKind::from_tag(caps.get(1)?.as_str())?;
        let index = caps.get(2)?.as_str().parse().ok()?;
        Some(Self { kind, index })
    }
}

/// Side table of shielded regions, one ordered list per [`FragmentKind`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FragmentRegistry {
    verbatim: Vec<String>,
    raw_html: Vec<String>,
}

impl FragmentRegistry {
    fn register(&mut self, kind: FragmentKind, content: String) -> Handle {
        let list = match kind {
            FragmentKind::Verbatim => &mut self.verbatim,
            FragmentKind::RawHtml => &mut self.raw_html,
        };
        list.push(content);
        Handle {
            kind,
            index: list.len() - 1,
        }
    }

    /// Look up the stored content for `handle`.
    #[must_use]
    pub fn get(&self, handle: Handle) -> Option<&str> {
        let list = match handle.kind {
            FragmentKind::Verbatim => &self.verbatim,
            FragmentKind::RawHtml => &self.raw_html,
        };
        list.get(handle.index).map(String::as_str)
    }

    /// Escaped contents of the verbatim blocks, in document order.
    #[must_use]
    pub fn verbatim(&self) -> &[String] {
        &self.verbatim
    }

    /// Raw HTML regions, in document order.
    #[must_use]
    pub fn raw_html(&self) -> &[String] {
        &self.raw_html
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.verbatim.is_empty() && self.raw_html.is_empty()
    }
}

/// Output of [`extract`]: the working text and the regions lifted out of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shielded {
    pub text: String,
    pub registry: FragmentRegistry,
}

/// Copy plain text, registering any stray sentinel as a raw fragment.
fn push_plain(out: &mut String, text: &str, registry: &mut FragmentRegistry) {
    if !text.contains([MARKER_OPEN, MARKER_CLOSE]) {
        out.push_str(text);
        return;
    }
    for ch in text.chars() {
        if ch == MARKER_OPEN || ch == MARKER_CLOSE {
            let handle = registry.register(FragmentKind::RawHtml, ch.to_string());
            out.push_str(&handle.marker());
        } else {
            out.push(ch);
        }
    }
}

/// Lift verbatim blocks and line-start HTML out of `text`.
///
/// Verbatim blocks go first so their content is escaped exactly once and
/// never seen by the HTML pass. A `<` that does not open a line stays in the
/// text and is escaped later like any other character.
///
/// # Examples
///
/// ```
/// use twikiview::shield::extract;
///
/// let shielded = extract("<verbatim>*a*</verbatim>\n<b>raw</b>");
/// assert_eq!(shielded.registry.verbatim(), ["*a*"]);
/// assert_eq!(shielded.registry.raw_html(), ["<b>"]);
/// assert!(!shielded.text.contains('*'));
/// ```
#[must_use]
pub fn extract(text: &str) -> Shielded {
    let mut registry = FragmentRegistry::default();
    let mut working = String::with_capacity(text.len());
    let mut last = 0;

    for caps in VERBATIM_RE.captures_iter(text) {
        let (Some(whole), Some(body)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        push_plain(&mut working, &text[last..whole.start()], &mut registry);
        let handle = registry.register(
            FragmentKind::Verbatim,
            escape_angle_brackets(body.as_str()),
        );
        working.push_str(&handle.marker());
        last = whole.end();
    }
    push_plain(&mut working, &text[last..], &mut registry);

    let working = RAW_HTML_RE
        .replace_all(&working, |caps: &Captures<'_>| {
            registry
                .register(FragmentKind::RawHtml, caps[0].to_string())
                .marker()
        })
        .into_owned();

    tracing::debug!(
        verbatim = registry.verbatim.len(),
        raw_html = registry.raw_html.len(),
        "shielded regions"
    );
    Shielded {
        text: working,
        registry,
    }
}

/// Replace every marker in `text` with its fragment.
///
/// Verbatim content is wrapped in `<pre>`; raw HTML is reinserted as stored,
/// with any markers it encloses resolved in turn. Markers with no matching
/// fragment are left untouched.
#[must_use]
pub fn restore(text: &str, registry: &FragmentRegistry) -> String {
    MARKER_RE
        .replace_all(text, |caps: &Captures<'_>| expand(caps, registry))
        .into_owned()
}

fn expand(caps: &Captures<'_>, registry: &FragmentRegistry) -> String {
    let Some(handle) = Handle::from_captures(caps) else {
        return caps[0].to_string();
    };
    match (handle.kind, registry.get(handle)) {
        (FragmentKind::Verbatim, Some(body)) => format!("<pre>{body}</pre>"),
        (FragmentKind::RawHtml, Some(raw)) => restore(raw, registry),
        (_, None) => caps[0].to_string(),
    }
}
