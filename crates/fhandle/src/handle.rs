//! The `PathHandle` value and its construction rules

use std::fmt;
use std::path::{Path, PathBuf};

use crate::path::{self, split_name};
use crate::{Error, Result};

/// A resolved, absolute filesystem location plus its derived name parts.
///
/// Construction is pure path computation: a handle can name a location
/// that does not exist. The only environment read is the current working
/// directory, and only when the first segment is relative.
///
/// Fields never change after construction. Operations that "move" a
/// handle return a new one.
///
/// The name parts are UTF-8. A final segment that is not valid Unicode is
/// decoded lossily, so `fullname` no longer spells `path`. File and
/// directory operations use `path` and are unaffected, but the derived
/// paths from [`change_file_name`](Self::change_file_name) and friends
/// are built from the lossy text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathHandle {
    path: PathBuf,
    root: PathBuf,
    fullname: String,
    name: String,
    ext: String,
}

/// One element of a dynamic construction argument list.
///
/// At most one `Handle` is allowed and only in first position; see
/// [`PathHandle::from_fragments`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Raw(PathBuf),
    Handle(PathHandle),
}

impl PathHandle {
    /// Resolve a single segment.
    pub fn new(segment: impl AsRef<Path>) -> Result<Self> {
        Self::from_segments([segment])
    }

    /// Resolve any number of raw segments.
    pub fn from_segments<I, S>(segments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<Path>,
    {
        let path = path::resolve(segments)?;
        Ok(Self::from_resolved(path))
    }

    /// Resolve `segments` on top of an existing handle.
    pub fn from_handle<I, S>(handle: &PathHandle, segments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<Path>,
    {
        let mut all = vec![handle.path.clone()];
        all.extend(segments.into_iter().map(|s| s.as_ref().to_path_buf()));
        Self::from_segments(all)
    }

    /// Resolve a mixed list of raw segments and handles.
    ///
    /// A handle contributes its own path, but only as the first fragment.
    /// A handle anywhere else, or a second handle, is rejected with
    /// [`Error::InvalidArgument`].
    pub fn from_fragments<I, F>(fragments: I) -> Result<Self>
    where
        I: IntoIterator<Item = F>,
        F: Into<Fragment>,
    {
        let mut segments = Vec::new();
        let mut seen_handle = false;

        for (index, fragment) in fragments.into_iter().enumerate() {
            match fragment.into() {
                Fragment::Raw(raw) => segments.push(raw),
                Fragment::Handle(handle) if index == 0 => {
                    seen_handle = true;
                    segments.push(handle.path);
                }
                Fragment::Handle(handle) => {
                    let message = if seen_handle {
                        format!(
                            "only one handle fragment is allowed, got a second one ({}) at position {index}",
                            handle.path.display()
                        )
                    } else {
                        format!(
                            "a handle fragment must come first, got {} at position {index}",
                            handle.path.display()
                        )
                    };
                    return Err(Error::InvalidArgument {
                        operation: "PathHandle::from_fragments",
                        message,
                    });
                }
            }
        }

        Self::from_segments(segments)
    }

    /// Turn a raw path or a handle into a handle. Handles pass through.
    pub fn coerce(value: impl Into<Fragment>) -> Result<Self> {
        match value.into() {
            Fragment::Handle(handle) => Ok(handle),
            Fragment::Raw(raw) => Self::new(raw),
        }
    }

    /// Plain path-resolve passthrough.
    pub fn resolve<I, S>(segments: I) -> Result<PathBuf>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<Path>,
    {
        path::resolve(segments)
    }

    /// Whether anything exists at `path`.
    pub fn exists_at(path: impl AsRef<Path>) -> bool {
        path.as_ref().exists()
    }

    /// Build a handle from a path that is already absolute and normalized.
    pub(crate) fn from_resolved(path: PathBuf) -> Self {
        let fullname = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| path.clone());
        let (name, ext) = split_name(&fullname);
        let (name, ext) = (name.to_string(), ext.to_string());

        Self {
            path,
            root,
            fullname,
            name,
            ext,
        }
    }

    /// The absolute, normalized path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The parent directory of [`path`](Self::path).
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The final segment, extension included, decoded lossily.
    pub fn fullname(&self) -> &str {
        &self.fullname
    }

    /// The final segment without its extension.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The extension with its leading dot, or an empty string.
    pub fn ext(&self) -> &str {
        &self.ext
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.path
    }
}

impl AsRef<Path> for PathHandle {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for PathHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

impl TryFrom<&str> for PathHandle {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for PathHandle {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<PathBuf> for PathHandle {
    type Error = Error;

    fn try_from(p: PathBuf) -> Result<Self> {
        Self::new(p)
    }
}

impl From<&str> for Fragment {
    fn from(s: &str) -> Self {
        Self::Raw(PathBuf::from(s))
    }
}

impl From<String> for Fragment {
    fn from(s: String) -> Self {
        Self::Raw(PathBuf::from(s))
    }
}

impl From<&Path> for Fragment {
    fn from(p: &Path) -> Self {
        Self::Raw(p.to_path_buf())
    }
}

impl From<PathBuf> for Fragment {
    fn from(p: PathBuf) -> Self {
        Self::Raw(p)
    }
}

impl From<PathHandle> for Fragment {
    fn from(h: PathHandle) -> Self {
        Self::Handle(h)
    }
}

impl From<&PathHandle> for Fragment {
    fn from(h: &PathHandle) -> Self {
        Self::Handle(h.clone())
    }
}
