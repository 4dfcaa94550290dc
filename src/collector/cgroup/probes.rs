//! The fixed list of cgroup v1 files read on every cycle.

/// A cgroup file to dump, relative to the cgroup mount root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CgroupProbe {
    pub path: &'static str,
    /// Byte counters are piped through the byte formatter before logging.
    pub humanize: bool,
}

const fn raw(path: &'static str) -> CgroupProbe {
    CgroupProbe {
        path,
        humanize: false,
    }
}

const fn bytes(path: &'static str) -> CgroupProbe {
    CgroupProbe {
        path,
        humanize: true,
    }
}

/// CPU and memory controller files, in logging order.
pub const CGROUP_V1_PROBES: &[CgroupProbe] = &[
    raw("cpu/cpuacct.usage_percpu"),
    raw("cpu/cpuacct.usage"),
    raw("cpu/cpuacct.stat"),
    raw("cpu/cpu.stat"),
    raw("cpu/cpu.shares"),
    raw("cpu/cpu.rt_runtime_us"),
    raw("cpu/cpu.rt_period_us"),
    raw("cpu/cpu.cfs_quota_us"),
    raw("cpu/cpu.cfs_period_us"),
    raw("memory/memory.use_hierarchy"),
    bytes("memory/memory.usage_in_bytes"),
    raw("memory/memory.swappiness"),
    raw("memory/memory.stat"),
    raw("memory/memory.soft_limit_in_bytes"),
    raw("memory/memory.oom_control"),
    raw("memory/memory.numa_stat"),
    raw("memory/memory.move_charge_at_immigrate"),
    bytes("memory/memory.memsw.usage_in_bytes"),
    bytes("memory/memory.memsw.max_usage_in_bytes"),
    raw("memory/memory.memsw.limit_in_bytes"),
    raw("memory/memory.memsw.failcnt"),
    bytes("memory/memory.max_usage_in_bytes"),
    raw("memory/memory.limit_in_bytes"),
    raw("memory/memory.failcnt"),
];
