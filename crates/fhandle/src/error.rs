//! Error types for fhandle

use std::path::PathBuf;

use crate::PathKind;

/// Result type for fhandle operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in fhandle operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed argument list, e.g. a handle fragment in the wrong place.
    #[error("{operation}: invalid argument: {message}")]
    InvalidArgument {
        operation: &'static str,
        message: String,
    },

    /// The operation needs the path to exist.
    #[error("{operation}: no such file or directory: {path}")]
    NotFound {
        operation: &'static str,
        path: PathBuf,
    },

    /// The path exists (or classifies) as the other kind.
    #[error("{operation}: expected a {expected} at {path}")]
    WrongType {
        operation: &'static str,
        path: PathBuf,
        expected: PathKind,
    },

    /// The operation needs the target to be absent.
    #[error("{operation}: already exists: {path}")]
    AlreadyExists {
        operation: &'static str,
        path: PathBuf,
    },

    #[error("Failed to parse {format} content at {path}: {message}")]
    Parse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Failed to serialize {format} content for {path}: {message}")]
    Serialize {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported text encoding: {encoding}")]
    UnsupportedEncoding { encoding: String },

    #[error("Invalid open mode: {mode:?}")]
    InvalidOpenMode { mode: String },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Coarse error family, for callers that branch on the kind of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    WrongType,
    AlreadyExists,
    Parse,
    Other,
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn not_found(operation: &'static str, path: impl Into<PathBuf>) -> Self {
        Self::NotFound {
            operation,
            path: path.into(),
        }
    }

    pub(crate) fn wrong_type(
        operation: &'static str,
        path: impl Into<PathBuf>,
        expected: PathKind,
    ) -> Self {
        Self::WrongType {
            operation,
            path: path.into(),
            expected,
        }
    }

    pub(crate) fn already_exists(operation: &'static str, path: impl Into<PathBuf>) -> Self {
        Self::AlreadyExists {
            operation,
            path: path.into(),
        }
    }

    /// The family this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument { .. }
            | Self::UnsupportedEncoding { .. }
            | Self::InvalidOpenMode { .. } => ErrorKind::InvalidArgument,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::WrongType { .. } => ErrorKind::WrongType,
            Self::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            Self::Parse { .. } => ErrorKind::Parse,
            Self::Serialize { .. } | Self::LockFailed { .. } | Self::Io { .. } => ErrorKind::Other,
        }
    }
}
