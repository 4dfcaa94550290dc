//! hax-profiler: a diagnostic sidecar thread for the hax daemon.
//!
//! Provides:
//! - `sampler`: the background profiler thread and its start/stop handles
//! - `collector`: `/proc` memory readings and cgroup v1 probe dumps
//! - `fmt`: human-readable byte formatting for cgroup byte counters

pub mod collector;
pub mod fmt;
pub mod sampler;

#[cfg(test)]
mod testing;
