//! Error types for typedesk.

use std::fmt;
use std::io;

/// Result type alias for typedesk operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for typedesk operations.
#[derive(Debug)]
pub enum Error {
    /// I/O error from terminal operations.
    Io(io::Error),
    /// A required mount point is absent from the document.
    MissingMountPoint(String),
    /// No surface with this id exists.
    UnknownSurface(String),
    /// Option values that cannot drive the desk (e.g. zero minimum size).
    InvalidConfig(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::MissingMountPoint(id) => write!(f, "required mount point #{id} is missing"),
            Self::UnknownSurface(id) => write!(f, "unknown surface #{id}"),
            Self::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
