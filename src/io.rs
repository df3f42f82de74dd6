//! File helpers for rendering TWiki documents.

use std::{
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
};

use crate::{error::PreviewError, process::OutputMode};

/// Read a source document.
///
/// Invalid UTF-8 is replaced rather than rejected, since rendering accepts
/// any text.
///
/// # Errors
/// Returns [`PreviewError::Read`] if the file cannot be read.
pub fn read_source(path: &Path) -> Result<String, PreviewError> {
    let bytes = fs::read(path).map_err(|source| PreviewError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Path of the preview written next to `source`.
///
/// The extension is replaced with `html`; a source that already ends in
/// `.html` gets a second one so it is never overwritten.
///
/// # Examples
///
/// ```
/// use std::path::Path;
///
/// use twikiview::io::html_path;
/// assert_eq!(html_path(Path::new("docs/Main.txt")), Path::new("docs/Main.html"));
/// assert_eq!(html_path(Path::new("page.html")), Path::new("page.html.html"));
/// ```
#[must_use]
pub fn html_path(source: &Path) -> PathBuf {
    if source.extension().is_some_and(|ext| ext == "html") {
        let mut name = OsString::from(source.as_os_str());
        name.push(".html");
        return PathBuf::from(name);
    }
    source.with_extension("html")
}

/// Render a source file.
///
/// # Errors
/// Returns an error if the file cannot be read.
pub fn render_file(path: &Path, mode: OutputMode) -> Result<String, PreviewError> {
    let text = read_source(path)?;
    Ok(mode.render(&text))
}

/// Write an HTML file at `target`.
///
/// # Errors
/// Returns [`PreviewError::Write`] if the file cannot be written.
pub fn write_html(target: &Path, html: &str) -> Result<(), PreviewError> {
    fs::write(target, html).map_err(|source| PreviewError::Write {
        path: target.to_path_buf(),
        source,
    })
}

/// Render `source` and write the preview next to it.
///
/// Returns the path that was written.
///
/// # Errors
/// Returns an error if reading the source or writing the preview fails.
pub fn write_preview(source: &Path, mode: OutputMode) -> Result<PathBuf, PreviewError> {
    let html = render_file(source, mode)?;
    let target = html_path(source);
    write_html(&target, &html)?;
    tracing::info!(source = %source.display(), target = %target.display(), "wrote preview");
    Ok(target)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn write_preview_creates_sibling() {
        let dir = tempdir().expect("failed to create temporary directory");
        let file = dir.path().join("Page.txt");
        fs::write(&file, "---+ Hello").expect("failed to write source");
        let target = write_preview(&file, OutputMode::Fragment).expect("preview written");
        assert_eq!(target, dir.path().join("Page.html"));
        let out = fs::read_to_string(&target).expect("failed to read preview");
        assert_eq!(out, "<h1>Hello</h1><br><br>\n");
    }

    #[test]
    fn read_source_replaces_invalid_utf8() {
        let dir = tempdir().expect("failed to create temporary directory");
        let file = dir.path().join("bytes.txt");
        fs::write(&file, b"a\xffb").expect("failed to write source");
        assert_eq!(read_source(&file).expect("readable"), "a\u{FFFD}b");
    }

    #[test]
    fn missing_source_reports_path() {
        let dir = tempdir().expect("failed to create temporary directory");
        let file = dir.path().join("missing.txt");
        let err = render_file(&file, OutputMode::Document).expect_err("file is missing");
        assert!(matches!(err, PreviewError::Read { ref path, .. } if path == &file));
        assert!(err.to_string().contains("missing.txt"));
    }
}
