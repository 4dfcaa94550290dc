//! Pre-built mock filesystem scenarios for testing.
//!
//! These scenarios provide realistic `/proc` and cgroup v1 states for a
//! daemon running inside a container.

use super::filesystem::MockFs;

impl MockFs {
    /// Creates a host with `/proc` memory files but no cgroup v1 hierarchy
    /// (for example a cgroup v2 only machine).
    pub fn proc_only_host() -> Self {
        let mut fs = Self::new();

        // statm values are in pages: size resident shared text lib data dt
        fs.add_file("/proc/self/statm", "51200 2048 1024 256 0 4096 0\n");
        fs.add_file(
            "/proc/self/smaps_rollup",
            "\
55d0c0a00000-7ffd3e9f3000 ---p 00000000 00:00 0                          [rollup]
Rss:                8192 kB
Pss:                6144 kB
Pss_Anon:           4096 kB
Shared_Clean:       2048 kB
Shared_Dirty:          0 kB
Private_Clean:      1024 kB
Private_Dirty:      4096 kB
Referenced:         8192 kB
Anonymous:          4096 kB
Swap:                512 kB
SwapPss:             512 kB
",
        );
        fs.add_file(
            "/proc/meminfo",
            "\
MemTotal:       16384000 kB
MemFree:         8192000 kB
MemAvailable:   12000000 kB
Buffers:          512000 kB
Cached:          2048000 kB
SwapCached:            0 kB
Active:          4096000 kB
Inactive:        2048000 kB
SwapTotal:       4096000 kB
SwapFree:        3072000 kB
Dirty:              1024 kB
Writeback:             0 kB
Shmem:             65536 kB
Slab:             512000 kB
SReclaimable:     256000 kB
",
        );
        fs.add_file(
            "/proc/vmstat",
            "\
nr_free_pages 2048000
pgpgin 5000
pgpgout 9000
pswpin 100
pswpout 250
pgfault 123456
",
        );

        fs
    }

    /// Creates a containerized host with the full cgroup v1 CPU and memory
    /// controller hierarchy mounted at `/sys/fs/cgroup`.
    pub fn typical_host() -> Self {
        let mut fs = Self::proc_only_host();

        let cpu = "/sys/fs/cgroup/cpu";
        fs.add_file(
            format!("{cpu}/cpuacct.usage_percpu"),
            "1234567 2345678 3456789 4567890\n",
        );
        fs.add_file(format!("{cpu}/cpuacct.usage"), "11604924\n");
        fs.add_file(format!("{cpu}/cpuacct.stat"), "user 120\nsystem 45\n");
        fs.add_file(
            format!("{cpu}/cpu.stat"),
            "nr_periods 0\nnr_throttled 0\nthrottled_time 0\n",
        );
        fs.add_file(format!("{cpu}/cpu.shares"), "1024\n");
        fs.add_file(format!("{cpu}/cpu.rt_runtime_us"), "0\n");
        fs.add_file(format!("{cpu}/cpu.rt_period_us"), "1000000\n");
        fs.add_file(format!("{cpu}/cpu.cfs_quota_us"), "-1\n");
        fs.add_file(format!("{cpu}/cpu.cfs_period_us"), "100000\n");

        let mem = "/sys/fs/cgroup/memory";
        fs.add_file(format!("{mem}/memory.use_hierarchy"), "1\n");
        fs.add_file(format!("{mem}/memory.usage_in_bytes"), "268435456\n");
        fs.add_file(format!("{mem}/memory.swappiness"), "60\n");
        fs.add_file(
            format!("{mem}/memory.stat"),
            "\
cache 104857600
rss 134217728
rss_huge 0
shmem 0
mapped_file 8388608
swap 0
pgfault 42000
pgmajfault 12
hierarchical_memory_limit 9223372036854771712
",
        );
        fs.add_file(
            format!("{mem}/memory.soft_limit_in_bytes"),
            "9223372036854771712\n",
        );
        fs.add_file(
            format!("{mem}/memory.oom_control"),
            "oom_kill_disable 0\nunder_oom 0\noom_kill 0\n",
        );
        fs.add_file(
            format!("{mem}/memory.numa_stat"),
            "total=65536 N0=65536\nfile=25600 N0=25600\nanon=39936 N0=39936\n",
        );
        fs.add_file(format!("{mem}/memory.move_charge_at_immigrate"), "0\n");
        fs.add_file(format!("{mem}/memory.memsw.usage_in_bytes"), "272629760\n");
        fs.add_file(
            format!("{mem}/memory.memsw.max_usage_in_bytes"),
            "314572800\n",
        );
        fs.add_file(
            format!("{mem}/memory.memsw.limit_in_bytes"),
            "9223372036854771712\n",
        );
        fs.add_file(format!("{mem}/memory.memsw.failcnt"), "0\n");
        fs.add_file(format!("{mem}/memory.max_usage_in_bytes"), "301989888\n");
        fs.add_file(
            format!("{mem}/memory.limit_in_bytes"),
            "9223372036854771712\n",
        );
        fs.add_file(format!("{mem}/memory.failcnt"), "0\n");

        fs
    }
}
