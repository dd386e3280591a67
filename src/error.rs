//! Error taxonomy for site generation.

use std::path::{Path, PathBuf};

/// Boxed source error carried by lookup and diff failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while reading the repository or writing the site.
///
/// Every variant is fatal to a run except inside
/// [`PathHistoryResolver`](crate::PathHistoryResolver), which maps lookup and
/// diff failures to "no metadata".
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Repository could not be opened or `HEAD` could not be resolved.
    #[error("cannot access repository at {path}: {source}")]
    RepositoryAccess {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    /// A commit, tree or blob is missing or malformed.
    #[error("failed to look up {what}: {source}")]
    ObjectLookup {
        what: String,
        #[source]
        source: BoxError,
    },

    /// Tree or blob comparison failed.
    #[error("failed to diff {what}: {source}")]
    DiffComputation {
        what: String,
        #[source]
        source: BoxError,
    },

    /// Directory creation, read or write failure.
    #[error("filesystem error at {path}: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Destination holds files and `--force` was not given.
    #[error("destination directory {0:?} already exists and is not empty")]
    DestinationNotEmpty(PathBuf),

    /// Repository content the generator does not handle, such as submodules.
    #[error("unsupported content: {0}")]
    UnsupportedContent(String),

    /// Template, highlighter or markdown failure.
    #[error("failed to render {what}: {message}")]
    Render { what: String, message: String },
}

impl Error {
    pub(crate) fn repository(path: &Path, source: impl Into<BoxError>) -> Self {
        Self::RepositoryAccess {
            path: path.to_path_buf(),
            source: source.into(),
        }
    }

    pub(crate) fn lookup(what: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::ObjectLookup {
            what: what.into(),
            source: source.into(),
        }
    }

    pub(crate) fn diff(what: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::DiffComputation {
            what: what.into(),
            source: source.into(),
        }
    }

    pub(crate) fn filesystem(path: &Path, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn render(what: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Render {
            what: what.into(),
            message: message.to_string(),
        }
    }
}
