//! The profiler: a background thread that logs resource usage on an interval.
//!
//! Each cycle logs the current process' memory, system memory and swap, then
//! dumps every existing cgroup v1 probe file. Between cycles the thread
//! waits on a [`StopSignal`], so [`StopHandle::stop`] takes effect without
//! waiting out the interval.
//!
//! Errors never reach the owner. A failed cycle is logged once at error
//! level and ends the thread; every exit path logs `profiler exited`.
//!
//! ```no_run
//! use hax_profiler::sampler::{Sampler, SamplerConfig};
//!
//! let handle = Sampler::from_config(SamplerConfig::default()).start();
//! // ... run the daemon ...
//! handle.stop();
//! handle.join();
//! ```

mod config;
mod error;
mod signal;

pub use config::{DEFAULT_INTERVAL, SamplerConfig};
pub use error::SampleError;
pub use signal::{StopSignal, WaitOutcome};

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{debug, error, info};

use crate::collector::{CgroupProbeCollector, FileSystem, MemoryCollector, RealFs};
use crate::fmt::{ByteFormatter, Numfmt};

/// Target of every record the profiler emits.
pub const LOG_TARGET: &str = "hax";

/// Owns everything one profiler run needs. Consumed by [`Sampler::start`].
pub struct Sampler<F: FileSystem + Clone, B: ByteFormatter> {
    config: SamplerConfig,
    memory: MemoryCollector<F>,
    cgroup: CgroupProbeCollector<F>,
    formatter: B,
    signal: Arc<StopSignal>,
}

impl Sampler<RealFs, Numfmt> {
    /// Reads the real filesystem and formats byte counters with `numfmt`.
    pub fn from_config(config: SamplerConfig) -> Self {
        Self::new(RealFs::new(), Numfmt::new(), config)
    }
}

impl<F, B> Sampler<F, B>
where
    F: FileSystem + Clone + 'static,
    B: ByteFormatter + 'static,
{
    pub fn new(fs: F, formatter: B, config: SamplerConfig) -> Self {
        Self {
            memory: MemoryCollector::new(fs.clone(), config.proc_path.clone()),
            cgroup: CgroupProbeCollector::new(fs, config.cgroup_path.clone()),
            formatter,
            config,
            signal: Arc::new(StopSignal::new()),
        }
    }

    /// A handle that can stop this sampler, usable before it is started.
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            signal: Arc::clone(&self.signal),
        }
    }

    /// Spawns the profiler thread.
    ///
    /// The thread logs through the caller's current `tracing` dispatcher.
    pub fn start(self) -> SamplerHandle {
        let stop = self.stop_handle();
        let dispatch = tracing::dispatcher::get_default(|d| d.clone());

        let spawned = thread::Builder::new()
            .name(self.config.thread_name.clone())
            .spawn(move || tracing::dispatcher::with_default(&dispatch, || self.run()));

        let thread = match spawned {
            Ok(thread) => Some(thread),
            Err(e) => {
                error!(target: LOG_TARGET, error = %e, "failed to spawn profiler thread");
                None
            }
        };

        SamplerHandle { stop, thread }
    }

    /// Runs the sampling loop on the current thread until it stops.
    pub fn run(&self) {
        let _exited = ExitRecord;
        debug!(target: LOG_TARGET, "profiler started");

        let result = panic::catch_unwind(AssertUnwindSafe(|| self.sample_until_stopped()))
            .unwrap_or_else(|payload| Err(SampleError::Panicked(panic_message(payload.as_ref()))));

        match result {
            Ok(()) => {}
            Err(SampleError::Cancelled) => {
                debug!(target: LOG_TARGET, "wait interrupted, shutting down");
            }
            Err(e) => {
                error!(target: LOG_TARGET, error = %e, details = ?e, "aborting due to an error");
            }
        }
    }

    fn sample_until_stopped(&self) -> Result<(), SampleError> {
        while !self.signal.is_stopped() {
            self.sample_once()?;
            if self.signal.wait_timeout(self.config.interval) == WaitOutcome::Stopped {
                return Err(SampleError::Cancelled);
            }
        }
        Ok(())
    }

    fn sample_once(&self) -> Result<(), SampleError> {
        let actual = self.memory.process_memory()?;
        let virtual_memory = self.memory.virtual_memory()?;
        let swap = self.memory.swap_memory()?;

        info!(target: LOG_TARGET, memory = ?actual, "actual memory in bytes");
        info!(target: LOG_TARGET, memory = ?virtual_memory, "virtual memory in bytes");
        info!(target: LOG_TARGET, memory = ?swap, "swap memory in bytes");

        for probe in self.cgroup.probes() {
            if let Some(reading) = self.cgroup.read(probe, &self.formatter)? {
                info!(
                    target: LOG_TARGET,
                    cmd = %reading.command,
                    output = ?reading.output,
                    "cgroup probe"
                );
            }
        }

        Ok(())
    }
}

/// Logs the final lifecycle record when the loop unwinds for any reason.
struct ExitRecord;

impl Drop for ExitRecord {
    fn drop(&mut self) {
        debug!(target: LOG_TARGET, "profiler exited");
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Requests a profiler stop. Cheap to clone; callable from any thread.
#[derive(Debug, Clone)]
pub struct StopHandle {
    signal: Arc<StopSignal>,
}

impl StopHandle {
    /// Asks the profiler to stop and wakes it if it is waiting.
    ///
    /// Does not wait for the thread to exit. Calling it again is a no-op.
    pub fn stop(&self) {
        debug!(target: LOG_TARGET, "stop signal received");
        self.signal.stop();
    }

    pub fn is_stopped(&self) -> bool {
        self.signal.is_stopped()
    }
}

/// A running profiler. Dropping the handle detaches the thread; it keeps
/// sampling until stopped through a [`StopHandle`].
#[derive(Debug)]
pub struct SamplerHandle {
    stop: StopHandle,
    thread: Option<JoinHandle<()>>,
}

impl SamplerHandle {
    /// See [`StopHandle::stop`].
    pub fn stop(&self) {
        self.stop.stop();
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Whether the profiler thread has exited (or never started).
    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().is_none_or(|t| t.is_finished())
    }

    /// Blocks until the profiler thread exits. Does not request a stop.
    pub fn join(mut self) {
        if let Some(thread) = self.thread.take() {
            // The loop catches its own panics, so join only fails if logging panicked.
            let _ = thread.join();
        }
    }
}
