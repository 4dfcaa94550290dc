//! Cgroup v1 probe reader.

use std::path::PathBuf;

use crate::collector::error::CollectError;
use crate::collector::traits::FileSystem;
use crate::fmt::{ByteFormatter, NUMFMT_COMMAND};

use super::probes::{CGROUP_V1_PROBES, CgroupProbe};

/// Contents of one probe, ready to log.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeReading {
    pub path: PathBuf,
    /// Shell equivalent of how the output was produced.
    pub command: String,
    pub output: String,
}

/// Reads the cgroup v1 probe table under a cgroup mount root.
pub struct CgroupProbeCollector<F: FileSystem> {
    fs: F,
    cgroup_path: PathBuf,
}

impl<F: FileSystem> CgroupProbeCollector<F> {
    /// Creates a new collector.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation
    /// * `cgroup_path` - cgroup mount root (e.g., "/sys/fs/cgroup")
    pub fn new(fs: F, cgroup_path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            cgroup_path: cgroup_path.into(),
        }
    }

    /// The probes this collector reads, in order.
    pub fn probes(&self) -> &'static [CgroupProbe] {
        CGROUP_V1_PROBES
    }

    /// Reads one probe.
    ///
    /// Returns `Ok(None)` when the file does not exist. Any failure reading
    /// or formatting an existing file is an error.
    pub fn read(
        &self,
        probe: &CgroupProbe,
        formatter: &dyn ByteFormatter,
    ) -> Result<Option<ProbeReading>, CollectError> {
        let path = self.cgroup_path.join(probe.path);
        if !self.fs.exists(&path) {
            return Ok(None);
        }

        let raw = self
            .fs
            .read_to_string(&path)
            .map_err(|source| CollectError::Io {
                path: path.clone(),
                source,
            })?;

        let (command, output) = if probe.humanize {
            let output = formatter
                .humanize(&raw)
                .map_err(|source| CollectError::Format {
                    path: path.clone(),
                    source,
                })?;
            (
                format!("cat {} | {}", path.display(), NUMFMT_COMMAND),
                output,
            )
        } else {
            (format!("cat {}", path.display()), raw)
        };

        Ok(Some(ProbeReading {
            path,
            command,
            output,
        }))
    }
}
