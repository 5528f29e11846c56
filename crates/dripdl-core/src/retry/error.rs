//! Download attempt error type.

use crate::transport::TransportError;
use std::fmt;

/// Error returned by a single archive download attempt.
#[derive(Debug)]
pub enum DownloadError {
    /// Transport reported an error (timeout, connection, sink write, etc.).
    Transport(TransportError),
    /// Server answered with status >= 400.
    Http(u32),
    /// Creating, renaming or removing the archive file failed.
    Storage(std::io::Error),
}

impl fmt::Display for DownloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadError::Transport(e) => write!(f, "{}", e),
            DownloadError::Http(code) => write!(f, "HTTP {}", code),
            DownloadError::Storage(e) => write!(f, "storage: {}", e),
        }
    }
}

impl std::error::Error for DownloadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DownloadError::Transport(e) => Some(e),
            DownloadError::Storage(e) => Some(e),
            DownloadError::Http(_) => None,
        }
    }
}

impl From<TransportError> for DownloadError {
    fn from(e: TransportError) -> Self {
        DownloadError::Transport(e)
    }
}
