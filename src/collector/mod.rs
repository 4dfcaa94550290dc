//! Resource readings for the profiler.
//!
//! Everything here reads through the [`FileSystem`] trait, so the same code
//! runs against the real `/proc` and `/sys/fs/cgroup` trees in production
//! and against [`MockFs`] in tests.
//!
//! ```text
//!   ┌──────────────────────┐   ┌──────────────────────────┐
//!   │   MemoryCollector    │   │   CgroupProbeCollector   │
//!   │  - /proc/self/statm  │   │  - cpu/cpuacct.*         │
//!   │  - /proc/meminfo     │   │  - memory/memory.*       │
//!   │  - /proc/vmstat      │   │  - ByteFormatter         │
//!   └──────────┬───────────┘   └─────────────┬────────────┘
//!              └──────────────┬──────────────┘
//!                      ┌──────▼──────┐
//!                      │  FileSystem │ (trait)
//!                      └──────┬──────┘
//!                     ┌───────┴───────┐
//!              ┌──────▼──────┐ ┌──────▼──────┐
//!              │   RealFs    │ │   MockFs    │
//!              └─────────────┘ └─────────────┘
//! ```
//!
//! ```
//! use hax_profiler::collector::{MemoryCollector, MockFs};
//!
//! let collector = MemoryCollector::new(MockFs::proc_only_host(), "/proc");
//! let swap = collector.swap_memory().unwrap();
//! assert_eq!(swap.percent, 25.0);
//! ```

pub mod cgroup;
mod error;
pub mod mock;
pub mod procfs;
pub mod traits;

pub use cgroup::{CGROUP_V1_PROBES, CgroupProbe, CgroupProbeCollector, ProbeReading};
pub use error::CollectError;
pub use mock::MockFs;
pub use procfs::{MemoryCollector, ProcessMemory, SwapMemory, VirtualMemory};
pub use traits::{FileSystem, RealFs};
