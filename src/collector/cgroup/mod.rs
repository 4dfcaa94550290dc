//! Cgroup v1 controller file dumps.
//!
//! The profiler does not interpret these files; it logs their contents as-is,
//! except for byte counters which are converted to IEC units first.

mod collector;
mod probes;

pub use collector::{CgroupProbeCollector, ProbeReading};
pub use probes::{CGROUP_V1_PROBES, CgroupProbe};
