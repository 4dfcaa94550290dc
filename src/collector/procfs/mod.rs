//! Collectors for the Linux `/proc` filesystem.
//!
//! This module provides parsers and a collector for reading process and
//! system memory information from the `/proc` virtual filesystem.

pub mod memory;
pub mod parser;

pub use memory::{MemoryCollector, ProcessMemory, SwapMemory, VirtualMemory};
pub use parser::ParseError;
