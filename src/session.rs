//! Live preview sessions.
//!
//! A [`PreviewSession`] ties one source file to one [`RenderSurface`]. It
//! renders when opened and again on every [`PreviewSession::refresh`]. Change
//! notifications come from an explicit [`ChangeSubscription`] handle; the
//! watcher stops when the handle is dropped.

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    sync::mpsc::{self, Receiver},
    time::Duration,
};

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::{
    error::PreviewError,
    io::{read_source, write_html},
    process::OutputMode,
};

/// Window in which further change events are folded into one refresh.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);

/// Somewhere a rendered preview is shown.
///
/// Every call replaces the whole content of the surface.
pub trait RenderSurface {
    /// Replace the surface content with `html`.
    ///
    /// # Errors
    /// Returns an error if the content cannot be delivered.
    fn present(&mut self, html: &str) -> Result<(), PreviewError>;
}

/// Surface backed by an HTML file on disk.
#[derive(Debug, Clone)]
pub struct FileSurface {
    path: PathBuf,
}

impl FileSurface {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RenderSurface for FileSurface {
    fn present(&mut self, html: &str) -> Result<(), PreviewError> {
        write_html(&self.path, html)
    }
}

/// Surface that keeps every presented frame in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySurface {
    frames: Vec<String>,
}

impl MemorySurface {
    /// All frames presented so far, oldest first.
    #[must_use]
    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    /// The frame currently shown.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.frames.last().map(String::as_str)
    }
}

impl RenderSurface for MemorySurface {
    fn present(&mut self, html: &str) -> Result<(), PreviewError> {
        self.frames.push(html.to_string());
        Ok(())
    }
}

/// A source document rendered onto a surface.
#[derive(Debug)]
pub struct PreviewSession<S> {
    source: PathBuf,
    mode: OutputMode,
    surface: S,
    renders: usize,
}

impl<S: RenderSurface> PreviewSession<S> {
    /// Open a session and render the source once.
    ///
    /// # Errors
    /// Returns an error if the first render cannot be read or presented.
    pub fn open(
        source: impl Into<PathBuf>,
        mode: OutputMode,
        surface: S,
    ) -> Result<Self, PreviewError> {
        let mut session = Self {
            source: source.into(),
            mode,
            surface,
            renders: 0,
        };
        session.refresh()?;
        Ok(session)
    }

    /// Re-read the source and replace the surface content.
    ///
    /// # Errors
    /// Returns an error if the source cannot be read or the surface rejects
    /// the output. The surface keeps its previous content in that case.
    pub fn refresh(&mut self) -> Result<(), PreviewError> {
        let text = read_source(&self.source)?;
        let html = self.mode.render(&text);
        self.surface.present(&html)?;
        self.renders += 1;
        tracing::info!(
            source = %self.source.display(),
            renders = self.renders,
            "preview refreshed"
        );
        Ok(())
    }

    /// Subscribe to changes of the source file.
    ///
    /// # Errors
    /// Returns an error if the source has no file name or the watcher cannot
    /// be started.
    pub fn subscribe(&self) -> Result<ChangeSubscription, PreviewError> {
        ChangeSubscription::new(&self.source)
    }

    /// Refresh after every burst of changes reported by `subscription`.
    ///
    /// Failed refreshes are logged and the session keeps watching. Returns
    /// once the subscription stops delivering events.
    pub fn watch(&mut self, subscription: &ChangeSubscription) {
        while subscription.next_change() {
            if let Err(err) = self.refresh() {
                tracing::warn!(error = %err, "preview refresh failed");
            }
        }
    }

    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Number of successful renders, including the initial one.
    #[must_use]
    pub fn renders(&self) -> usize {
        self.renders
    }

    /// End the session and hand back its surface.
    #[must_use]
    pub fn close(self) -> S {
        tracing::debug!(source = %self.source.display(), "preview session closed");
        self.surface
    }
}

/// Handle for change notifications on one file.
///
/// The directory containing the file is watched, so editors that save by
/// replacing the file keep triggering refreshes.
pub struct ChangeSubscription {
    _watcher: RecommendedWatcher,
    events: Receiver<()>,
    debounce: Duration,
}

impl ChangeSubscription {
    /// Start watching `source`.
    ///
    /// # Errors
    /// Returns an error if `source` has no file name or the watcher fails to
    /// start.
    pub fn new(source: &Path) -> Result<Self, PreviewError> {
        let Some(name) = source.file_name() else {
            return Err(PreviewError::NotAFile {
                path: source.to_path_buf(),
            });
        };
        let target: OsString = name.to_os_string();
        let dir = source
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let (tx, rx) = mpsc::channel();
        let mut watcher =
            notify::recommended_watcher(move |res: Result<Event, notify::Error>| match res {
                Ok(event) => {
                    let relevant =
                        matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
                            && event
                                .paths
                                .iter()
                                .any(|p| p.file_name() == Some(target.as_os_str()));
                    if relevant && tx.send(()).is_err() {
                        tracing::debug!("change subscription dropped; ignoring event");
                    }
                }
                Err(err) => tracing::warn!(error = %err, "file watcher error"),
            })?;
        watcher.watch(dir, RecursiveMode::NonRecursive)?;
        tracing::debug!(dir = %dir.display(), "watching for changes");

        Ok(Self {
            _watcher: watcher,
            events: rx,
            debounce: DEFAULT_DEBOUNCE,
        })
    }

    /// Use a different debounce window.
    #[must_use]
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Block until the next burst of changes.
    ///
    /// Returns `false` once the watcher has shut down.
    pub fn next_change(&self) -> bool {
        if self.events.recv().is_err() {
            return false;
        }
        self.drain();
        true
    }

    /// Like [`Self::next_change`], giving up after `timeout`.
    pub fn next_change_timeout(&self, timeout: Duration) -> bool {
        if self.events.recv_timeout(timeout).is_err() {
            return false;
        }
        self.drain();
        true
    }

    fn drain(&self) {
        while self.events.recv_timeout(self.debounce).is_ok() {}
    }
}
