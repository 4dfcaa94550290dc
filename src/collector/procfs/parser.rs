//! Parsers for `/proc` filesystem files.
//!
//! These are pure functions that parse the content of various `/proc` files
//! into structured data. They are designed to be easily testable with string inputs.

/// Error type for parsing failures.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Parse error: {}", self.message)
    }
}

impl std::error::Error for ParseError {}

/// Parsed data from `/proc/[pid]/statm`. All values are in pages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statm {
    pub size: u64,
    pub resident: u64,
    pub shared: u64,
    pub text: u64,
    pub lib: u64,
    pub data: u64,
    pub dirty: u64,
}

/// Parses `/proc/[pid]/statm` content.
///
/// Format: `size resident shared text lib data dt` on a single line.
pub fn parse_statm(content: &str) -> Result<Statm, ParseError> {
    let values: Vec<u64> = content
        .split_whitespace()
        .map(|s| {
            s.parse()
                .map_err(|_| ParseError::new(format!("invalid statm field '{}'", s)))
        })
        .collect::<Result<_, _>>()?;

    if values.len() < 7 {
        return Err(ParseError::new(format!(
            "statm has {} fields, expected 7",
            values.len()
        )));
    }

    Ok(Statm {
        size: values[0],
        resident: values[1],
        shared: values[2],
        text: values[3],
        lib: values[4],
        data: values[5],
        dirty: values[6],
    })
}

/// Parsed data from `/proc/[pid]/smaps_rollup`. Values are in kB.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SmapsRollup {
    pub pss: u64,
    pub private_clean: u64,
    pub private_dirty: u64,
    pub swap: u64,
}

/// Parses `/proc/[pid]/smaps_rollup` content.
///
/// The first line is the pseudo-mapping header and is skipped; the rest are
/// `Key:   value kB` lines.
pub fn parse_smaps_rollup(content: &str) -> Result<SmapsRollup, ParseError> {
    let mut rollup = SmapsRollup::default();

    for line in content.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let kb = || -> u64 {
            value
                .split_whitespace()
                .next()
                .and_then(|s| s.parse().ok())
                .unwrap_or(0)
        };
        match key.trim() {
            "Pss" => rollup.pss = kb(),
            "Private_Clean" => rollup.private_clean = kb(),
            "Private_Dirty" => rollup.private_dirty = kb(),
            "Swap" => rollup.swap = kb(),
            _ => {}
        }
    }

    Ok(rollup)
}

/// Parsed data from `/proc/meminfo`. Values are in kB.
#[derive(Debug, Clone, Default)]
pub struct MemInfo {
    pub mem_total: u64,
    pub mem_free: u64,
    pub mem_available: u64,
    pub buffers: u64,
    pub cached: u64,
    pub swap_cached: u64,
    pub active: u64,
    pub inactive: u64,
    pub swap_total: u64,
    pub swap_free: u64,
    pub shmem: u64,
    pub slab: u64,
    pub s_reclaimable: u64,
}

/// Parses `/proc/meminfo` content.
///
/// Fails if `MemTotal` is absent, since every derived value depends on it.
pub fn parse_meminfo(content: &str) -> Result<MemInfo, ParseError> {
    let mut info = MemInfo::default();
    let mut has_total = false;

    let parse_kb = |line: &str| -> u64 {
        line.split_whitespace()
            .nth(1)
            .and_then(|s| s.parse().ok())
            .unwrap_or(0)
    };

    for line in content.lines() {
        if line.starts_with("MemTotal:") {
            info.mem_total = parse_kb(line);
            has_total = true;
        } else if line.starts_with("MemFree:") {
            info.mem_free = parse_kb(line);
        } else if line.starts_with("MemAvailable:") {
            info.mem_available = parse_kb(line);
        } else if line.starts_with("Buffers:") {
            info.buffers = parse_kb(line);
        } else if line.starts_with("Cached:") {
            info.cached = parse_kb(line);
        } else if line.starts_with("SwapCached:") {
            info.swap_cached = parse_kb(line);
        } else if line.starts_with("Active:") {
            info.active = parse_kb(line);
        } else if line.starts_with("Inactive:") {
            info.inactive = parse_kb(line);
        } else if line.starts_with("SwapTotal:") {
            info.swap_total = parse_kb(line);
        } else if line.starts_with("SwapFree:") {
            info.swap_free = parse_kb(line);
        } else if line.starts_with("Shmem:") {
            info.shmem = parse_kb(line);
        } else if line.starts_with("Slab:") {
            info.slab = parse_kb(line);
        } else if line.starts_with("SReclaimable:") {
            info.s_reclaimable = parse_kb(line);
        }
    }

    if !has_total {
        return Err(ParseError::new("meminfo is missing MemTotal"));
    }

    Ok(info)
}

/// Swap paging counters from `/proc/vmstat`, in pages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SwapPaging {
    pub pswpin: u64,
    pub pswpout: u64,
}

/// Parses the swap-in/swap-out counters from `/proc/vmstat` content.
pub fn parse_vmstat_swap(content: &str) -> Result<SwapPaging, ParseError> {
    let mut paging = SwapPaging::default();

    for line in content.lines() {
        let mut parts = line.split_whitespace();
        let (Some(key), Some(value)) = (parts.next(), parts.next()) else {
            continue;
        };
        match key {
            "pswpin" => paging.pswpin = value.parse().unwrap_or(0),
            "pswpout" => paging.pswpout = value.parse().unwrap_or(0),
            _ => {}
        }
    }

    Ok(paging)
}
