//! Error type.
//!
//! Only I/O can fail. Malformed SSF never produces an error; see
//! [`Anomalies`](crate::Anomalies) for how structural problems are reported.

use std::path::{Path, PathBuf};

/// Result alias with [`Error`] as the default error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reading or writing a named file failed.
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading or writing an unnamed stream (stdin, stdout, a caller's reader) failed.
    #[error(transparent)]
    Stream(#[from] std::io::Error),

    /// A batch root was expected to be a directory.
    #[error("the path '{}' is not a directory", .0.display())]
    NotADirectory(PathBuf),
}

impl Error {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Error::Io { path: path.to_path_buf(), source }
    }
}
