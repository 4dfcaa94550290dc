//! Errors raised while reading a sample.

use std::path::PathBuf;

use crate::collector::procfs::parser::ParseError;
use crate::fmt::FormatError;

/// Error collecting a single reading. Every variant names the file involved.
#[derive(Debug)]
pub enum CollectError {
    /// I/O error reading a `/proc` or cgroup file.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A `/proc` file did not have the expected layout.
    Parse { path: PathBuf, source: ParseError },
    /// The byte formatter rejected a cgroup file's contents.
    Format { path: PathBuf, source: FormatError },
}

impl CollectError {
    /// Path of the file that failed.
    pub fn path(&self) -> &std::path::Path {
        match self {
            CollectError::Io { path, .. }
            | CollectError::Parse { path, .. }
            | CollectError::Format { path, .. } => path,
        }
    }
}

impl std::fmt::Display for CollectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectError::Io { path, source } => {
                write!(f, "I/O error reading {}: {}", path.display(), source)
            }
            CollectError::Parse { path, source } => {
                write!(f, "cannot parse {}: {}", path.display(), source)
            }
            CollectError::Format { path, source } => {
                write!(f, "cannot format {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for CollectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CollectError::Io { source, .. } => Some(source),
            CollectError::Parse { source, .. } => Some(source),
            CollectError::Format { source, .. } => Some(source),
        }
    }
}
