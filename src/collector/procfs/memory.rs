//! Process and system memory readings.

use std::path::{Path, PathBuf};

use crate::collector::error::CollectError;
use crate::collector::traits::FileSystem;

use super::parser::{self, ParseError};

const KB: u64 = 1024;

/// Memory held by the current process, in bytes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessMemory {
    pub rss: u64,
    pub vms: u64,
    pub shared: u64,
    pub text: u64,
    pub lib: u64,
    pub data: u64,
    pub dirty: u64,
    /// Unique set size: private clean + private dirty.
    pub uss: u64,
    /// Proportional set size.
    pub pss: u64,
    pub swap: u64,
}

/// System-wide memory, in bytes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VirtualMemory {
    pub total: u64,
    pub available: u64,
    pub percent: f64,
    pub used: u64,
    pub free: u64,
    pub active: u64,
    pub inactive: u64,
    pub buffers: u64,
    pub cached: u64,
    pub shared: u64,
    pub slab: u64,
}

/// System-wide swap, in bytes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SwapMemory {
    pub total: u64,
    pub used: u64,
    pub free: u64,
    pub percent: f64,
    /// Bytes swapped in since boot.
    pub sin: u64,
    /// Bytes swapped out since boot.
    pub sout: u64,
}

/// Reads memory figures from a proc filesystem.
pub struct MemoryCollector<F: FileSystem> {
    fs: F,
    proc_path: PathBuf,
    /// Converts `statm` and `vmstat` page counts to bytes.
    page_size: u64,
}

impl<F: FileSystem> MemoryCollector<F> {
    /// Creates a new memory collector.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `proc_path` - Base path to proc filesystem (usually "/proc")
    pub fn new(fs: F, proc_path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            proc_path: proc_path.into(),
            page_size: procfs::page_size(),
        }
    }

    /// Overrides the page size detected from the running kernel.
    pub fn with_page_size(mut self, page_size: u64) -> Self {
        self.page_size = page_size;
        self
    }

    fn pages(&self, count: u64) -> u64 {
        count.saturating_mul(self.page_size)
    }

    /// Memory of the calling process, from `self/statm` and `self/smaps_rollup`.
    ///
    /// `smaps_rollup` only exists on kernels 4.14+; without it `uss`, `pss`
    /// and `swap` are reported as zero.
    pub fn process_memory(&self) -> Result<ProcessMemory, CollectError> {
        let self_dir = self.proc_path.join("self");

        let statm_path = self_dir.join("statm");
        let statm = parser::parse_statm(&self.read(&statm_path)?)
            .map_err(|e| parse_error(&statm_path, e))?;

        let rollup_path = self_dir.join("smaps_rollup");
        let rollup = if self.fs.exists(&rollup_path) {
            parser::parse_smaps_rollup(&self.read(&rollup_path)?)
                .map_err(|e| parse_error(&rollup_path, e))?
        } else {
            parser::SmapsRollup::default()
        };

        Ok(ProcessMemory {
            rss: self.pages(statm.resident),
            vms: self.pages(statm.size),
            shared: self.pages(statm.shared),
            text: self.pages(statm.text),
            lib: self.pages(statm.lib),
            data: self.pages(statm.data),
            dirty: self.pages(statm.dirty),
            uss: kib(rollup.private_clean.saturating_add(rollup.private_dirty)),
            pss: kib(rollup.pss),
            swap: kib(rollup.swap),
        })
    }

    /// System memory from `meminfo`.
    pub fn virtual_memory(&self) -> Result<VirtualMemory, CollectError> {
        let path = self.proc_path.join("meminfo");
        let info = parser::parse_meminfo(&self.read(&path)?).map_err(|e| parse_error(&path, e))?;

        let total = kib(info.mem_total);
        let free = kib(info.mem_free);
        let buffers = kib(info.buffers);
        let cached = kib(info.cached.saturating_add(info.s_reclaimable));
        let available = kib(info.mem_available);

        let used = match total.checked_sub(free.saturating_add(buffers).saturating_add(cached)) {
            Some(used) => used,
            // Happens in some LXC containers where Cached is larger than the limit.
            None => total.saturating_sub(free),
        };

        Ok(VirtualMemory {
            total,
            available,
            percent: percent(total.saturating_sub(available), total),
            used,
            free,
            active: kib(info.active),
            inactive: kib(info.inactive),
            buffers,
            cached,
            shared: kib(info.shmem),
            slab: kib(info.slab),
        })
    }

    /// Swap usage from `meminfo` plus paging counters from `vmstat`.
    ///
    /// `vmstat` is optional; without it `sin` and `sout` are zero.
    pub fn swap_memory(&self) -> Result<SwapMemory, CollectError> {
        let meminfo_path = self.proc_path.join("meminfo");
        let info = parser::parse_meminfo(&self.read(&meminfo_path)?)
            .map_err(|e| parse_error(&meminfo_path, e))?;

        let vmstat_path = self.proc_path.join("vmstat");
        let paging = if self.fs.exists(&vmstat_path) {
            parser::parse_vmstat_swap(&self.read(&vmstat_path)?)
                .map_err(|e| parse_error(&vmstat_path, e))?
        } else {
            parser::SwapPaging::default()
        };

        let total = kib(info.swap_total);
        let free = kib(info.swap_free);
        let used = total.saturating_sub(free);

        Ok(SwapMemory {
            total,
            used,
            free,
            percent: percent(used, total),
            sin: self.pages(paging.pswpin),
            sout: self.pages(paging.pswpout),
        })
    }

    fn read(&self, path: &Path) -> Result<String, CollectError> {
        self.fs
            .read_to_string(path)
            .map_err(|source| CollectError::Io {
                path: path.to_path_buf(),
                source,
            })
    }
}

fn kib(count: u64) -> u64 {
    count.saturating_mul(KB)
}

fn parse_error(path: &Path, source: ParseError) -> CollectError {
    CollectError::Parse {
        path: path.to_path_buf(),
        source,
    }
}

/// Percentage rounded to one decimal place; zero when `total` is zero.
fn percent(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let pct = part as f64 / total as f64 * 100.0;
    (pct * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::MockFs;
    use std::io;

    #[test]
    fn test_process_memory() {
        let collector = MemoryCollector::new(MockFs::proc_only_host(), "/proc").with_page_size(4096);
        let mem = collector.process_memory().unwrap();

        assert_eq!(mem.vms, 51200 * 4096);
        assert_eq!(mem.rss, 2048 * 4096);
        assert_eq!(mem.shared, 1024 * 4096);
        assert_eq!(mem.text, 256 * 4096);
        assert_eq!(mem.lib, 0);
        assert_eq!(mem.data, 4096 * 4096);
        assert_eq!(mem.dirty, 0);
        assert_eq!(mem.uss, (1024 + 4096) * 1024);
        assert_eq!(mem.pss, 6144 * 1024);
        assert_eq!(mem.swap, 512 * 1024);
    }

    #[test]
    fn test_process_memory_without_smaps_rollup() {
        let mut fs = MockFs::proc_only_host();
        fs.remove_file("/proc/self/smaps_rollup");

        let mem = MemoryCollector::new(fs, "/proc")
            .with_page_size(4096)
            .process_memory()
            .unwrap();
        assert_eq!(mem.rss, 2048 * 4096);
        assert_eq!(mem.uss, 0);
        assert_eq!(mem.pss, 0);
        assert_eq!(mem.swap, 0);
    }

    #[test]
    fn test_process_memory_unreadable_statm() {
        let mut fs = MockFs::proc_only_host();
        fs.fail_on("/proc/self/statm", io::ErrorKind::PermissionDenied);

        let err = MemoryCollector::new(fs, "/proc")
            .process_memory()
            .unwrap_err();
        assert!(matches!(err, CollectError::Io { .. }));
        assert_eq!(err.path(), Path::new("/proc/self/statm"));
    }

    #[test]
    fn test_virtual_memory() {
        let collector = MemoryCollector::new(MockFs::proc_only_host(), "/proc").with_page_size(4096);
        let mem = collector.virtual_memory().unwrap();

        assert_eq!(mem.total, 16384000 * 1024);
        assert_eq!(mem.free, 8192000 * 1024);
        assert_eq!(mem.available, 12000000 * 1024);
        assert_eq!(mem.buffers, 512000 * 1024);
        assert_eq!(mem.cached, (2048000 + 256000) * 1024);
        assert_eq!(mem.used, (16384000 - 8192000 - 512000 - 2304000) * 1024);
        assert_eq!(mem.shared, 65536 * 1024);
        assert_eq!(mem.slab, 512000 * 1024);
        assert_eq!(mem.active, 4096000 * 1024);
        assert_eq!(mem.inactive, 2048000 * 1024);
        // (16384000 - 12000000) / 16384000 = 26.757...%
        assert_eq!(mem.percent, 26.8);
    }

    #[test]
    fn test_virtual_memory_used_falls_back_when_cache_exceeds_total() {
        let mut fs = MockFs::new();
        fs.add_file(
            "/proc/meminfo",
            "MemTotal: 1000 kB\nMemFree: 400 kB\nMemAvailable: 900 kB\nCached: 800 kB\n",
        );
        let mem = MemoryCollector::new(fs, "/proc").virtual_memory().unwrap();
        assert_eq!(mem.used, 600 * 1024);
    }

    #[test]
    fn test_swap_memory() {
        let collector = MemoryCollector::new(MockFs::proc_only_host(), "/proc").with_page_size(4096);
        let swap = collector.swap_memory().unwrap();

        assert_eq!(swap.total, 4096000 * 1024);
        assert_eq!(swap.free, 3072000 * 1024);
        assert_eq!(swap.used, 1024000 * 1024);
        assert_eq!(swap.percent, 25.0);
        assert_eq!(swap.sin, 100 * 4096);
        assert_eq!(swap.sout, 250 * 4096);
    }

    #[test]
    fn test_swap_memory_without_swap() {
        let mut fs = MockFs::new();
        fs.add_file(
            "/proc/meminfo",
            "MemTotal: 1000 kB\nSwapTotal: 0 kB\nSwapFree: 0 kB\n",
        );
        let swap = MemoryCollector::new(fs, "/proc").swap_memory().unwrap();
        assert_eq!(swap.total, 0);
        assert_eq!(swap.percent, 0.0);
        assert_eq!(swap.sin, 0);
    }

    #[test]
    fn test_page_counts_follow_page_size() {
        let collector =
            MemoryCollector::new(MockFs::proc_only_host(), "/proc").with_page_size(65536);

        let mem = collector.process_memory().unwrap();
        assert_eq!(mem.rss, 2048 * 65536);
        assert_eq!(mem.vms, 51200 * 65536);
        // smaps_rollup is in kB regardless of page size
        assert_eq!(mem.pss, 6144 * 1024);

        let swap = collector.swap_memory().unwrap();
        assert_eq!(swap.sin, 100 * 65536);
        assert_eq!(swap.sout, 250 * 65536);
    }

    #[test]
    fn test_default_page_size_is_detected() {
        let collector = MemoryCollector::new(MockFs::new(), "/proc");
        assert_eq!(collector.page_size, procfs::page_size());
        assert!(collector.page_size.is_power_of_two());
    }

    #[test]
    fn test_huge_counters_saturate() {
        let mut fs = MockFs::new();
        fs.add_file(
            "/proc/self/statm",
            "18446744073709551615 18446744073709551615 1 1 0 1 0",
        );
        fs.add_file(
            "/proc/meminfo",
            "MemTotal: 1000 kB\nMemFree: 18446744073709551615 kB\nBuffers: 18446744073709551615 kB\nCached: 1 kB\n",
        );
        let collector = MemoryCollector::new(fs, "/proc").with_page_size(4096);

        let mem = collector.process_memory().unwrap();
        assert_eq!(mem.rss, u64::MAX);
        assert_eq!(mem.vms, u64::MAX);

        let virt = collector.virtual_memory().unwrap();
        assert_eq!(virt.free, u64::MAX);
        assert_eq!(virt.used, 0);
    }

    #[test]
    fn test_missing_meminfo_is_an_error() {
        let err = MemoryCollector::new(MockFs::new(), "/proc")
            .virtual_memory()
            .unwrap_err();
        assert!(matches!(err, CollectError::Io { .. }));
    }
}
