//! A resolved filesystem path with guarded file and directory I/O
//!
//! [`PathHandle`] binds one absolute path together with its root, name
//! and extension, classifies it as a file or directory on demand, derives
//! sibling paths, and wraps the common `std::fs` / `tokio::fs` calls behind
//! existence and type checks that fail with descriptive errors.

pub mod error;
pub mod io;
pub mod path;
pub mod record;
pub mod structured;

mod derive;
mod dir;
mod file;
mod handle;
mod kind;
mod nonblocking;
mod options;
mod stream;

pub use error::{Error, ErrorKind, Result};
pub use handle::{Fragment, PathHandle};
pub use io::RobustnessConfig;
pub use kind::{KindSnapshot, PathKind};
pub use options::{Encoding, OpenMode};
pub use record::PathRecord;
pub use stream::{AsyncWriteStream, WriteStream};
pub use structured::Format;
