//! Sampler configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Time between the start of one cycle's wait and the next cycle.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(10);

/// Where the profiler reads from and how often.
#[derive(Debug, Clone)]
pub struct SamplerConfig {
    /// Wait between cycles.
    pub interval: Duration,
    /// Base path to proc filesystem.
    pub proc_path: PathBuf,
    /// cgroup v1 mount root.
    pub cgroup_path: PathBuf,
    /// Name of the sampler thread.
    pub thread_name: String,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            proc_path: PathBuf::from("/proc"),
            cgroup_path: PathBuf::from("/sys/fs/cgroup"),
            thread_name: "hax profiler".to_string(),
        }
    }
}

impl SamplerConfig {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_proc_path(mut self, proc_path: impl Into<PathBuf>) -> Self {
        self.proc_path = proc_path.into();
        self
    }

    pub fn with_cgroup_path(mut self, cgroup_path: impl Into<PathBuf>) -> Self {
        self.cgroup_path = cgroup_path.into();
        self
    }

    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }
}
