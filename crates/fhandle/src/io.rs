//! Atomic writes with file locking

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use backoff::ExponentialBackoffBuilder;
use fs2::FileExt;

use crate::{Error, PathHandle, Result};

/// Tuning for [`write_atomic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RobustnessConfig {
    /// How long to keep retrying the advisory lock before giving up.
    pub lock_timeout: Duration,
    /// Whether to fsync the temp file before renaming it into place.
    pub enable_fsync: bool,
}

impl Default for RobustnessConfig {
    fn default() -> Self {
        Self {
            lock_timeout: Duration::from_secs(5),
            enable_fsync: true,
        }
    }
}

/// Sibling lock file used to serialize atomic writers: `<file>.lock`.
pub fn lock_path(path: &Path) -> PathBuf {
    let mut lock = path.as_os_str().to_owned();
    lock.push(".lock");
    PathBuf::from(lock)
}

/// Write content atomically to a file with locking.
///
/// Writes to a temp file in the same directory, then renames it over the
/// target, so readers see either the old or the new content. Missing
/// parent directories are created. The `<file>.lock` file is left behind
/// for the next writer.
pub fn write_atomic(path: &Path, content: &[u8], config: RobustnessConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let lock_path = lock_path(path);
    let lock_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&lock_path)
        .map_err(|e| Error::io(&lock_path, e))?;

    let policy = ExponentialBackoffBuilder::new()
        .with_initial_interval(Duration::from_millis(10))
        .with_max_interval(Duration::from_millis(250))
        .with_max_elapsed_time(Some(config.lock_timeout))
        .build();
    backoff::retry(policy, || {
        FileExt::try_lock_exclusive(&lock_file).map_err(backoff::Error::transient)
    })
    .map_err(|_| Error::LockFailed {
        path: path.to_path_buf(),
    })?;

    let result = write_via_temp(path, content, config);

    FileExt::unlock(&lock_file).map_err(|_| Error::LockFailed {
        path: path.to_path_buf(),
    })?;

    result
}

fn write_via_temp(path: &Path, content: &[u8], config: RobustnessConfig) -> Result<()> {
    // Same directory keeps the rename on one filesystem
    let temp_name = format!(
        ".{}.{}.tmp",
        path.file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = path.with_file_name(&temp_name);

    let written = (|| {
        let mut temp_file = fs::File::create(&temp_path).map_err(|e| Error::io(&temp_path, e))?;
        temp_file
            .write_all(content)
            .map_err(|e| Error::io(&temp_path, e))?;
        if config.enable_fsync {
            temp_file.sync_all().map_err(|e| Error::io(&temp_path, e))?;
        }
        fs::rename(&temp_path, path).map_err(|e| Error::io(path, e))
    })();

    if written.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    written
}

impl PathHandle {
    /// Replace the file's content atomically.
    ///
    /// The crash-safe alternative to [`write`](Self::write).
    pub fn write_atomic(&self, contents: impl AsRef<[u8]>, config: RobustnessConfig) -> Result<()> {
        let contents = contents.as_ref();
        tracing::debug!(path = %self, bytes = contents.len(), "Writing file atomically");
        write_atomic(self.path(), contents, config)
    }
}
