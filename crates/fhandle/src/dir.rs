//! Guarded directory operations

use std::fs;
use std::path::PathBuf;

use crate::path;
use crate::{Error, PathHandle, PathKind, Result};

impl PathHandle {
    /// Create `name` inside this directory and return its handle.
    ///
    /// Refuses to overwrite an existing entry.
    pub fn create_file(&self, name: &str, contents: impl AsRef<[u8]>) -> Result<PathHandle> {
        self.ensure_kind("create_file", PathKind::Directory)?;
        let target = self.child(name);
        if target.exists() {
            return Err(Error::already_exists("create_file", target.path()));
        }
        tracing::debug!(path = %target, "Creating file");
        fs::write(target.path(), contents).map_err(|e| Error::io(target.path(), e))?;
        Ok(target)
    }

    /// Entry names in this directory, sorted.
    ///
    /// With `absolute`, each name is joined onto this directory's path.
    pub fn list_dir(&self, absolute: bool) -> Result<Vec<PathBuf>> {
        self.ensure_kind("list_dir", PathKind::Directory)?;
        let entries = fs::read_dir(self.path()).map_err(|e| Error::io(self.path(), e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::io(self.path(), e))?;
            names.push(PathBuf::from(entry.file_name()));
        }
        Ok(self.finish_listing(names, absolute))
    }

    /// Create this directory, and its parents with `recursive`.
    pub fn make_dir(&self, recursive: bool) -> Result<()> {
        if self.exists() {
            return Err(Error::already_exists("make_dir", self.path()));
        }
        tracing::debug!(path = %self, recursive, "Creating directory");
        let created = if recursive {
            fs::create_dir_all(self.path())
        } else {
            fs::create_dir(self.path())
        };
        created.map_err(|e| Error::io(self.path(), e))
    }

    /// Remove this directory; `recursive` also removes its contents.
    ///
    /// Callers without a reason to do otherwise pass `true`.
    pub fn delete_dir(&self, recursive: bool) -> Result<()> {
        self.ensure_kind("delete_dir", PathKind::Directory)?;
        tracing::debug!(path = %self, recursive, "Removing directory");
        let removed = if recursive {
            fs::remove_dir_all(self.path())
        } else {
            fs::remove_dir(self.path())
        };
        removed.map_err(|e| Error::io(self.path(), e))
    }

    pub(crate) fn child(&self, name: &str) -> PathHandle {
        PathHandle::from_resolved(path::normalize(&self.path().join(name)))
    }

    pub(crate) fn finish_listing(&self, mut names: Vec<PathBuf>, absolute: bool) -> Vec<PathBuf> {
        names.sort();
        if absolute {
            names
                .into_iter()
                .map(|name| self.path().join(name))
                .collect()
        } else {
            names
        }
    }
}
