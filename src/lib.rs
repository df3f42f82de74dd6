//! Library for rendering TWiki markup as HTML previews.
//!
//! [`render_html`] runs the rendering pipeline described in [`process`] and
//! returns an HTML fragment; [`render_document`] wraps that fragment in a
//! minimal document. Both accept any input and never fail. The [`session`]
//! module keeps a rendered preview in sync with a file on disk.

#[macro_use]
mod macros;

pub mod breaks;
pub mod error;
pub mod escape;
pub mod headings;
pub mod inline;
pub mod io;
pub mod lists;
pub mod process;
pub mod session;
pub mod shield;
pub mod table;

pub use breaks::{PARAGRAPH_BREAK, convert_paragraph_breaks};
pub use error::PreviewError;
pub use escape::escape_angle_brackets;
pub use headings::{MAX_HEADING_LEVEL, convert_headings};
pub use inline::format_inline;
pub use lists::{ListKind, convert_bullet_lists, convert_numbered_lists};
pub use process::{OutputMode, PIPELINE, Stage, render_document, render_html, wrap_document};
pub use session::{
    ChangeSubscription,
    FileSurface,
    MemorySurface,
    PreviewSession,
    RenderSurface,
};
pub use shield::{FragmentKind, FragmentRegistry, Handle, Shielded, extract, restore};
pub use table::{Alignment, Cell, convert_tables, parse_row};
