//! Mock filesystem implementations for testing.
//!
//! This module provides `MockFs` and pre-built scenarios for exercising the
//! profiler without real `/proc` or cgroup filesystems.

mod filesystem;
mod scenarios;

pub use filesystem::MockFs;
