//! Output streams returned by `create_write_stream`

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::{Error, Result};

/// A buffered writer over a freshly created file.
///
/// [`finish`](Self::finish) is the completion signal: it flushes, syncs
/// and reports the outcome. Dropping the stream without finishing it
/// flushes on a best-effort basis and swallows errors.
#[derive(Debug)]
pub struct WriteStream {
    writer: BufWriter<File>,
    path: PathBuf,
    written: u64,
}

impl WriteStream {
    pub(crate) fn new(file: File, path: PathBuf) -> Self {
        Self {
            writer: BufWriter::new(file),
            path,
            written: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bytes accepted so far.
    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    /// Flush and sync, returning the total number of bytes written.
    pub fn finish(self) -> Result<u64> {
        let Self {
            writer,
            path,
            written,
        } = self;
        let file = writer
            .into_inner()
            .map_err(|e| Error::io(&path, e.into_error()))?;
        file.sync_all().map_err(|e| Error::io(&path, e))?;
        tracing::debug!(path = %path.display(), bytes = written, "Write stream finished");
        Ok(written)
    }
}

impl Write for WriteStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.writer.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Async counterpart of [`WriteStream`].
#[derive(Debug)]
pub struct AsyncWriteStream {
    writer: tokio::io::BufWriter<tokio::fs::File>,
    path: PathBuf,
    written: u64,
}

impl AsyncWriteStream {
    pub(crate) fn new(file: tokio::fs::File, path: PathBuf) -> Self {
        Self {
            writer: tokio::io::BufWriter::new(file),
            path,
            written: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    /// Flush and sync, returning the total number of bytes written.
    pub async fn finish(mut self) -> Result<u64> {
        self.writer
            .flush()
            .await
            .map_err(|e| Error::io(&self.path, e))?;
        let file = self.writer.into_inner();
        file.sync_all()
            .await
            .map_err(|e| Error::io(&self.path, e))?;
        tracing::debug!(path = %self.path.display(), bytes = self.written, "Write stream finished");
        Ok(self.written)
    }
}

impl AsyncWrite for AsyncWriteStream {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        let this = self.get_mut();
        let poll = Pin::new(&mut this.writer).poll_write(cx, buf);
        if let Poll::Ready(Ok(n)) = &poll {
            this.written += *n as u64;
        }
        poll
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().writer).poll_flush(cx)
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().writer).poll_shutdown(cx)
    }
}
