//! Paths computed from an existing handle
//!
//! None of these touch the filesystem beyond one lenient classification,
//! and none change the receiver.

use std::path::{Path, PathBuf};

use crate::path::{self, file_name_with_ext, normalize_ext};
use crate::{Error, PathHandle, PathKind, Result};

impl PathHandle {
    /// Resolve `segments` relative to this handle.
    ///
    /// An absolute first segment resolves on its own. Otherwise a
    /// directory resolves from itself and a file from its parent, so a
    /// relative sibling of a file lands next to it.
    pub fn resolve_from<I, S>(&self, segments: I) -> Result<PathHandle>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<Path>,
    {
        let segments: Vec<PathBuf> = segments
            .into_iter()
            .map(|s| s.as_ref().to_path_buf())
            .collect();

        let first_is_absolute = segments.first().is_some_and(|s| s.is_absolute());
        if first_is_absolute {
            return PathHandle::from_segments(segments);
        }

        let base = match self.kind() {
            PathKind::Directory => self.path(),
            PathKind::File => self.root(),
        };
        let mut all = Vec::with_capacity(segments.len() + 1);
        all.push(base.to_path_buf());
        all.extend(segments);
        PathHandle::from_segments(all)
    }

    /// Path of a sibling file with a new name and/or extension.
    ///
    /// `None` keeps the current part exactly, including a bare trailing
    /// dot. `new_ext` may be given with or without its leading dot.
    pub fn change_file_name(
        &self,
        new_name: Option<&str>,
        new_ext: Option<&str>,
    ) -> Result<PathHandle> {
        if self.is_dir() {
            return Err(Error::wrong_type(
                "change_file_name",
                self.path(),
                PathKind::File,
            ));
        }

        let name = new_name.unwrap_or(self.name());
        let fullname = match new_ext {
            Some(ext) => file_name_with_ext(name, normalize_ext(ext)),
            // kept verbatim so a bare trailing dot survives
            None => format!("{name}{}", self.ext()),
        };
        Ok(self.sibling(&fullname))
    }

    /// Path of this file with its extension replaced.
    pub fn change_file_ext(&self, new_ext: &str) -> Result<PathHandle> {
        if self.is_dir() {
            return Err(Error::wrong_type(
                "change_file_ext",
                self.path(),
                PathKind::File,
            ));
        }

        Ok(self.sibling(&file_name_with_ext(self.name(), normalize_ext(new_ext))))
    }

    /// Path of a sibling directory called `new_name`.
    pub fn change_dir_name(&self, new_name: &str) -> Result<PathHandle> {
        if self.is_file() {
            return Err(Error::wrong_type(
                "change_dir_name",
                self.path(),
                PathKind::Directory,
            ));
        }

        Ok(self.sibling(new_name))
    }

    fn sibling(&self, fullname: &str) -> PathHandle {
        PathHandle::from_resolved(path::normalize(&self.root().join(fullname)))
    }
}
