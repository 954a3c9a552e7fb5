//! File-versus-directory classification
//!
//! Classification is never stored on the handle. Every call looks at the
//! filesystem again, so a handle observes changes made after it was built.

use std::fmt;
use std::fs::{self, Metadata};
use std::io::ErrorKind as IoErrorKind;

use serde::{Deserialize, Serialize};

use crate::{Error, PathHandle, Result};

/// What a path is, or is assumed to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathKind {
    File,
    Directory,
}

impl PathKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Directory => "directory",
        }
    }

    /// Anything that is not a directory counts as a file.
    pub(crate) fn from_metadata(metadata: &Metadata) -> Self {
        if metadata.is_dir() {
            Self::Directory
        } else {
            Self::File
        }
    }

    /// Guess from the extension alone: a dotted name is a file.
    pub(crate) fn from_ext(ext: &str) -> Self {
        if ext.is_empty() {
            Self::Directory
        } else {
            Self::File
        }
    }
}

impl fmt::Display for PathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classification taken at one instant.
///
/// Unlike [`PathHandle::kind`], a snapshot does not follow later
/// filesystem changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindSnapshot {
    pub exists: bool,
    pub kind: PathKind,
}

impl PathHandle {
    /// Whether anything exists at this path right now.
    pub fn exists(&self) -> bool {
        self.path().exists()
    }

    /// Lenient classification.
    ///
    /// Existing paths are classified by their metadata. Missing paths fall
    /// back to the extension heuristic, which gets extension-less files and
    /// dotted directory names wrong.
    pub fn kind(&self) -> PathKind {
        match fs::metadata(self.path()) {
            Ok(metadata) => PathKind::from_metadata(&metadata),
            Err(_) => self.guess_kind(),
        }
    }

    /// Strict classification: like [`kind`](Self::kind) but a missing path
    /// is an [`Error::NotFound`] instead of a guess.
    pub fn strict_kind(&self) -> Result<PathKind> {
        match fs::metadata(self.path()) {
            Ok(metadata) => Ok(PathKind::from_metadata(&metadata)),
            Err(e) if e.kind() == IoErrorKind::NotFound => {
                Err(Error::not_found("strict_kind", self.path()))
            }
            Err(e) => Err(Error::io(self.path(), e)),
        }
    }

    pub fn is_file(&self) -> bool {
        self.kind() == PathKind::File
    }

    pub fn is_dir(&self) -> bool {
        self.kind() == PathKind::Directory
    }

    /// Existence and lenient kind, read once.
    pub fn snapshot(&self) -> KindSnapshot {
        match fs::metadata(self.path()) {
            Ok(metadata) => KindSnapshot {
                exists: true,
                kind: PathKind::from_metadata(&metadata),
            },
            Err(_) => KindSnapshot {
                exists: self.exists(),
                kind: self.guess_kind(),
            },
        }
    }

    pub(crate) fn guess_kind(&self) -> PathKind {
        let kind = PathKind::from_ext(self.ext());
        tracing::trace!(path = %self, %kind, "Path missing, classified by extension");
        kind
    }

    /// Fail unless the path exists and is of the `expected` kind.
    pub(crate) fn ensure_kind(&self, operation: &'static str, expected: PathKind) -> Result<()> {
        match fs::metadata(self.path()) {
            Ok(metadata) => check_kind(self, operation, expected, &metadata),
            Err(e) if e.kind() == IoErrorKind::NotFound => {
                Err(Error::not_found(operation, self.path()))
            }
            Err(e) => Err(Error::io(self.path(), e)),
        }
    }
}

pub(crate) fn check_kind(
    handle: &PathHandle,
    operation: &'static str,
    expected: PathKind,
    metadata: &Metadata,
) -> Result<()> {
    if PathKind::from_metadata(metadata) == expected {
        Ok(())
    } else {
        Err(Error::wrong_type(operation, handle.path(), expected))
    }
}
