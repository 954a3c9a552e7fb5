//! Async twins of the handle operations, built on `tokio::fs`
//!
//! Each method has the same guards, errors and effects as its blocking
//! namesake. Calls are independent: nothing orders two in-flight
//! operations on the same path, so callers await one before issuing the
//! next when order matters.

use std::io::{ErrorKind as IoErrorKind, SeekFrom};
use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

use crate::file::suffix_from;
use crate::kind::check_kind;
use crate::path;
use crate::stream::AsyncWriteStream;
use crate::structured::Format;
use crate::{Encoding, Error, KindSnapshot, OpenMode, PathHandle, PathKind, Result};

impl PathHandle {
    pub async fn exists_async(&self) -> bool {
        fs::try_exists(self.path()).await.unwrap_or(false)
    }

    /// See [`kind`](Self::kind).
    pub async fn kind_async(&self) -> PathKind {
        match fs::metadata(self.path()).await {
            Ok(metadata) => PathKind::from_metadata(&metadata),
            Err(_) => self.guess_kind(),
        }
    }

    /// See [`strict_kind`](Self::strict_kind).
    pub async fn strict_kind_async(&self) -> Result<PathKind> {
        match fs::metadata(self.path()).await {
            Ok(metadata) => Ok(PathKind::from_metadata(&metadata)),
            Err(e) if e.kind() == IoErrorKind::NotFound => {
                Err(Error::not_found("strict_kind", self.path()))
            }
            Err(e) => Err(Error::io(self.path(), e)),
        }
    }

    pub async fn is_file_async(&self) -> bool {
        self.kind_async().await == PathKind::File
    }

    pub async fn is_dir_async(&self) -> bool {
        self.kind_async().await == PathKind::Directory
    }

    pub async fn snapshot_async(&self) -> KindSnapshot {
        match fs::metadata(self.path()).await {
            Ok(metadata) => KindSnapshot {
                exists: true,
                kind: PathKind::from_metadata(&metadata),
            },
            Err(_) => KindSnapshot {
                exists: self.exists_async().await,
                kind: self.guess_kind(),
            },
        }
    }

    pub async fn open_async(&self, mode: OpenMode) -> Result<fs::File> {
        self.ensure_kind_async("open", PathKind::File).await?;
        fs::OpenOptions::from(mode.options())
            .open(self.path())
            .await
            .map_err(|e| Error::io(self.path(), e))
    }

    pub async fn read_bytes_async(&self) -> Result<Vec<u8>> {
        self.ensure_kind_async("read_bytes", PathKind::File).await?;
        fs::read(self.path())
            .await
            .map_err(|e| Error::io(self.path(), e))
    }

    pub async fn read_text_async(&self, encoding: Encoding) -> Result<String> {
        self.ensure_kind_async("read_text", PathKind::File).await?;
        let bytes = fs::read(self.path())
            .await
            .map_err(|e| Error::io(self.path(), e))?;
        encoding.decode(bytes, self.path())
    }

    pub async fn read_structured_async<T: DeserializeOwned>(&self) -> Result<T> {
        let content = fs::read_to_string(self.path())
            .await
            .map_err(|e| Error::io(self.path(), e))?;
        Format::from_ext(self.ext()).parse(&content, self.path())
    }

    /// See [`write`](Self::write); equally non-atomic.
    pub async fn write_async(&self, contents: impl AsRef<[u8]>) -> Result<()> {
        let contents = contents.as_ref();
        tracing::debug!(path = %self, bytes = contents.len(), "Writing file");
        self.remove_existing_file_async().await?;
        fs::write(self.path(), contents)
            .await
            .map_err(|e| Error::io(self.path(), e))
    }

    pub async fn write_structured_async<T: Serialize>(&self, value: &T) -> Result<()> {
        let content = Format::from_ext(self.ext()).render(value, self.path())?;
        self.write_async(content).await
    }

    pub async fn delete_file_async(&self) -> Result<()> {
        self.ensure_kind_async("delete_file", PathKind::File).await?;
        tracing::debug!(path = %self, "Deleting file");
        fs::remove_file(self.path())
            .await
            .map_err(|e| Error::io(self.path(), e))
    }

    pub async fn delete_file_if_exists_async(&self) -> Result<()> {
        if self.is_dir_async().await {
            return Err(Error::wrong_type(
                "delete_file_if_exists",
                self.path(),
                PathKind::File,
            ));
        }
        self.remove_existing_file_async().await
    }

    pub async fn rename_file_async(&self, dest: impl AsRef<Path>) -> Result<PathHandle> {
        self.ensure_kind_async("rename_file", PathKind::File).await?;
        let target = self.destination_async("rename_file", dest.as_ref()).await?;
        tracing::debug!(from = %self, to = %target, "Renaming file");
        fs::rename(self.path(), target.path())
            .await
            .map_err(|e| Error::io(self.path(), e))?;
        Ok(target)
    }

    pub async fn copy_file_async(&self, dest: impl AsRef<Path>) -> Result<PathHandle> {
        self.ensure_kind_async("copy_file", PathKind::File).await?;
        let target = self.destination_async("copy_file", dest.as_ref()).await?;
        tracing::debug!(from = %self, to = %target, "Copying file");
        fs::copy(self.path(), target.path())
            .await
            .map_err(|e| Error::io(target.path(), e))?;
        Ok(target)
    }

    pub async fn create_write_stream_async(&self) -> Result<AsyncWriteStream> {
        tracing::debug!(path = %self, "Opening write stream");
        self.remove_existing_file_async().await?;
        let file = fs::File::create(self.path())
            .await
            .map_err(|e| Error::io(self.path(), e))?;
        Ok(AsyncWriteStream::new(file, self.path().to_path_buf()))
    }

    /// See [`read_file_offset`](Self::read_file_offset).
    pub async fn read_file_offset_async(&self, offset: u64, len: Option<usize>) -> Result<Vec<u8>> {
        self.ensure_kind_async("read_file_offset", PathKind::File).await?;

        match len {
            Some(len) => {
                let mut file = fs::File::open(self.path())
                    .await
                    .map_err(|e| Error::io(self.path(), e))?;
                file.seek(SeekFrom::Start(offset))
                    .await
                    .map_err(|e| Error::io(self.path(), e))?;
                let mut buf = Vec::new();
                file.take(len as u64)
                    .read_to_end(&mut buf)
                    .await
                    .map_err(|e| Error::io(self.path(), e))?;
                Ok(buf)
            }
            None => {
                let mut bytes = fs::read(self.path())
                    .await
                    .map_err(|e| Error::io(self.path(), e))?;
                Ok(suffix_from(&mut bytes, offset))
            }
        }
    }

    pub async fn create_file_async(
        &self,
        name: &str,
        contents: impl AsRef<[u8]>,
    ) -> Result<PathHandle> {
        self.ensure_kind_async("create_file", PathKind::Directory).await?;
        let target = self.child(name);
        if target.exists_async().await {
            return Err(Error::already_exists("create_file", target.path()));
        }
        tracing::debug!(path = %target, "Creating file");
        fs::write(target.path(), contents)
            .await
            .map_err(|e| Error::io(target.path(), e))?;
        Ok(target)
    }

    pub async fn list_dir_async(&self, absolute: bool) -> Result<Vec<PathBuf>> {
        self.ensure_kind_async("list_dir", PathKind::Directory).await?;
        let mut entries = fs::read_dir(self.path())
            .await
            .map_err(|e| Error::io(self.path(), e))?;

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| Error::io(self.path(), e))?
        {
            names.push(PathBuf::from(entry.file_name()));
        }
        Ok(self.finish_listing(names, absolute))
    }

    pub async fn make_dir_async(&self, recursive: bool) -> Result<()> {
        if self.exists_async().await {
            return Err(Error::already_exists("make_dir", self.path()));
        }
        tracing::debug!(path = %self, recursive, "Creating directory");
        let created = if recursive {
            fs::create_dir_all(self.path()).await
        } else {
            fs::create_dir(self.path()).await
        };
        created.map_err(|e| Error::io(self.path(), e))
    }

    pub async fn delete_dir_async(&self, recursive: bool) -> Result<()> {
        self.ensure_kind_async("delete_dir", PathKind::Directory).await?;
        tracing::debug!(path = %self, recursive, "Removing directory");
        let removed = if recursive {
            fs::remove_dir_all(self.path()).await
        } else {
            fs::remove_dir(self.path()).await
        };
        removed.map_err(|e| Error::io(self.path(), e))
    }

    async fn ensure_kind_async(&self, operation: &'static str, expected: PathKind) -> Result<()> {
        match fs::metadata(self.path()).await {
            Ok(metadata) => check_kind(self, operation, expected, &metadata),
            Err(e) if e.kind() == IoErrorKind::NotFound => {
                Err(Error::not_found(operation, self.path()))
            }
            Err(e) => Err(Error::io(self.path(), e)),
        }
    }

    async fn destination_async(&self, operation: &'static str, dest: &Path) -> Result<PathHandle> {
        let target = PathHandle::from_resolved(path::resolve([self.root(), dest])?);
        if target.exists_async().await {
            return Err(Error::already_exists(operation, target.path()));
        }
        Ok(target)
    }

    async fn remove_existing_file_async(&self) -> Result<()> {
        match fs::remove_file(self.path()).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == IoErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::io(self.path(), e)),
        }
    }
}
