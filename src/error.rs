//! Errors raised while reading sources, presenting previews and watching
//! for changes. Rendering itself cannot fail.

use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PreviewError {
    #[error("failed to read `{}`", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write `{}`", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("`{}` does not name a file", path.display())]
    NotAFile { path: PathBuf },

    #[error("failed to watch for changes")]
    Watch(#[from] notify::Error),
}
