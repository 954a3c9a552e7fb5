//! Guarded file operations
//!
//! Every guard runs before any I/O, so a failed precondition leaves the
//! filesystem untouched.

use std::fs::{self, File};
use std::io::{ErrorKind as IoErrorKind, Read, Seek, SeekFrom};
use std::path::Path;

use serde::{Serialize, de::DeserializeOwned};

use crate::path;
use crate::stream::WriteStream;
use crate::structured::Format;
use crate::{Encoding, Error, OpenMode, PathHandle, PathKind, Result};

impl PathHandle {
    /// Open the file with the given mode.
    ///
    /// The file must already exist; the caller owns the returned handle.
    pub fn open(&self, mode: OpenMode) -> Result<File> {
        self.ensure_kind("open", PathKind::File)?;
        mode.options()
            .open(self.path())
            .map_err(|e| Error::io(self.path(), e))
    }

    pub fn read_bytes(&self) -> Result<Vec<u8>> {
        self.ensure_kind("read_bytes", PathKind::File)?;
        fs::read(self.path()).map_err(|e| Error::io(self.path(), e))
    }

    pub fn read_text(&self, encoding: Encoding) -> Result<String> {
        self.ensure_kind("read_text", PathKind::File)?;
        let bytes = fs::read(self.path()).map_err(|e| Error::io(self.path(), e))?;
        encoding.decode(bytes, self.path())
    }

    /// Parse the file as JSON, TOML or YAML, chosen by extension.
    ///
    /// Extensions other than `toml`, `yaml` and `yml` are read as JSON.
    pub fn read_structured<T: DeserializeOwned>(&self) -> Result<T> {
        let content = fs::read_to_string(self.path()).map_err(|e| Error::io(self.path(), e))?;
        Format::from_ext(self.ext()).parse(&content, self.path())
    }

    /// Replace the file's content.
    ///
    /// An existing file is deleted first and then written again. This is
    /// not atomic: a crash in between loses the file. Use
    /// [`write_atomic`](Self::write_atomic) when that matters.
    pub fn write(&self, contents: impl AsRef<[u8]>) -> Result<()> {
        let contents = contents.as_ref();
        tracing::debug!(path = %self, bytes = contents.len(), "Writing file");
        self.remove_existing_file()?;
        fs::write(self.path(), contents).map_err(|e| Error::io(self.path(), e))
    }

    /// Serialize `value` by extension and [`write`](Self::write) it.
    pub fn write_structured<T: Serialize>(&self, value: &T) -> Result<()> {
        let content = Format::from_ext(self.ext()).render(value, self.path())?;
        self.write(content)
    }

    pub fn delete_file(&self) -> Result<()> {
        self.ensure_kind("delete_file", PathKind::File)?;
        tracing::debug!(path = %self, "Deleting file");
        fs::remove_file(self.path()).map_err(|e| Error::io(self.path(), e))
    }

    /// Delete the file if it is there; a missing file is not an error.
    ///
    /// Fails when the handle classifies as a directory (leniently, so a
    /// missing extension-less path counts as one).
    pub fn delete_file_if_exists(&self) -> Result<()> {
        if self.is_dir() {
            return Err(Error::wrong_type(
                "delete_file_if_exists",
                self.path(),
                PathKind::File,
            ));
        }
        self.remove_existing_file()
    }

    /// Move the file to `dest` and return the new location.
    ///
    /// A relative `dest` is resolved from the file's directory. An
    /// existing destination is never overwritten.
    pub fn rename_file(&self, dest: impl AsRef<Path>) -> Result<PathHandle> {
        self.ensure_kind("rename_file", PathKind::File)?;
        let target = self.destination("rename_file", dest.as_ref())?;
        tracing::debug!(from = %self, to = %target, "Renaming file");
        fs::rename(self.path(), target.path()).map_err(|e| Error::io(self.path(), e))?;
        Ok(target)
    }

    /// Copy the file to `dest` and return the copy's location.
    ///
    /// Same destination rules as [`rename_file`](Self::rename_file).
    pub fn copy_file(&self, dest: impl AsRef<Path>) -> Result<PathHandle> {
        self.ensure_kind("copy_file", PathKind::File)?;
        let target = self.destination("copy_file", dest.as_ref())?;
        tracing::debug!(from = %self, to = %target, "Copying file");
        fs::copy(self.path(), target.path()).map_err(|e| Error::io(target.path(), e))?;
        Ok(target)
    }

    /// Start writing the file as a stream.
    ///
    /// An existing file is deleted first. Call
    /// [`WriteStream::finish`] to flush and learn whether the write
    /// completed.
    pub fn create_write_stream(&self) -> Result<WriteStream> {
        tracing::debug!(path = %self, "Opening write stream");
        self.remove_existing_file()?;
        let file = File::create(self.path()).map_err(|e| Error::io(self.path(), e))?;
        Ok(WriteStream::new(file, self.path().to_path_buf()))
    }

    /// Read from byte `offset`.
    ///
    /// With `len`, at most `len` bytes are read through a short-lived file
    /// handle; fewer come back only when the file ends first. Without
    /// `len`, the whole file is read and everything from `offset` on is
    /// returned.
    pub fn read_file_offset(&self, offset: u64, len: Option<usize>) -> Result<Vec<u8>> {
        self.ensure_kind("read_file_offset", PathKind::File)?;

        match len {
            Some(len) => {
                let mut file = File::open(self.path()).map_err(|e| Error::io(self.path(), e))?;
                file.seek(SeekFrom::Start(offset))
                    .map_err(|e| Error::io(self.path(), e))?;
                let mut buf = Vec::new();
                file.take(len as u64)
                    .read_to_end(&mut buf)
                    .map_err(|e| Error::io(self.path(), e))?;
                Ok(buf)
            }
            None => {
                let mut bytes = fs::read(self.path()).map_err(|e| Error::io(self.path(), e))?;
                Ok(suffix_from(&mut bytes, offset))
            }
        }
    }

    /// Resolve a rename/copy destination and make sure it is free.
    pub(crate) fn destination(&self, operation: &'static str, dest: &Path) -> Result<PathHandle> {
        let target = PathHandle::from_resolved(path::resolve([self.root(), dest])?);
        if target.exists() {
            return Err(Error::already_exists(operation, target.path()));
        }
        Ok(target)
    }

    fn remove_existing_file(&self) -> Result<()> {
        match fs::remove_file(self.path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == IoErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::io(self.path(), e)),
        }
    }
}

pub(crate) fn suffix_from(bytes: &mut Vec<u8>, offset: u64) -> Vec<u8> {
    let start = usize::try_from(offset).unwrap_or(usize::MAX).min(bytes.len());
    bytes.split_off(start)
}
