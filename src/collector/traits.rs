//! Abstractions for filesystem access to enable testing and mocking.
//!
//! The `FileSystem` trait lets the profiler read the real `/proc` and
//! `/sys/fs/cgroup` trees on Linux, or an in-memory tree in tests.

use std::io;
use std::path::Path;

/// Abstraction for filesystem operations.
///
/// Collectors only ever check for a file and read it whole, so that is all
/// this trait covers.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Checks if a path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Real filesystem implementation that delegates to `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl RealFs {
    /// Creates a new `RealFs` instance.
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for RealFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
