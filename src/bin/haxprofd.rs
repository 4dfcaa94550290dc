//! haxprofd - runs the hax profiler in the foreground.
//!
//! Logs process memory, system memory, swap and cgroup v1 controller files
//! every interval until interrupted with Ctrl-C.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tracing::level_filters::LevelFilter;
use tracing::{Level, info, warn};
use tracing_subscriber::EnvFilter;

use hax_profiler::collector::RealFs;
use hax_profiler::fmt::{IecFormatter, Numfmt};
use hax_profiler::sampler::{Sampler, SamplerConfig, SamplerHandle};

/// Resource usage profiler for the hax daemon.
#[derive(Parser)]
#[command(name = "haxprofd", about = "Resource usage profiler", version)]
struct Args {
    /// Sampling interval in seconds.
    #[arg(short, long, default_value = "10", value_parser = clap::value_parser!(u64).range(1..))]
    interval: u64,

    /// Path to /proc filesystem.
    #[arg(long, default_value = "/proc")]
    proc_path: PathBuf,

    /// Mount root of the cgroup v1 hierarchy.
    #[arg(long, default_value = "/sys/fs/cgroup")]
    cgroup_path: PathBuf,

    /// How byte counters are converted to human-readable units.
    #[arg(long, value_enum, default_value_t = FormatterKind::Numfmt)]
    formatter: FormatterKind,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is info level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatterKind {
    /// Pipe through the external `numfmt --to=iec`.
    Numfmt,
    /// Format in-process.
    Builtin,
}

/// Initializes the tracing subscriber with the appropriate log level.
/// `RUST_LOG` directives take precedence over the default level.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    info!("haxprofd {} starting", env!("CARGO_PKG_VERSION"));
    info!(
        "Config: interval={}s, proc={}, cgroup={}, formatter={:?}",
        args.interval,
        args.proc_path.display(),
        args.cgroup_path.display(),
        args.formatter
    );

    let config = SamplerConfig::default()
        .with_interval(Duration::from_secs(args.interval))
        .with_proc_path(args.proc_path)
        .with_cgroup_path(args.cgroup_path);

    let handle: SamplerHandle = match args.formatter {
        FormatterKind::Numfmt => Sampler::new(RealFs::new(), Numfmt::new(), config).start(),
        FormatterKind::Builtin => Sampler::new(RealFs::new(), IecFormatter, config).start(),
    };

    let stop = handle.stop_handle();
    if let Err(e) = ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        stop.stop();
    }) {
        warn!("Failed to set Ctrl-C handler: {}", e);
    }

    handle.join();
    info!("Shutting down...");
}
