//! Human-readable byte formatting for cgroup byte counters.
//!
//! The profiler logs byte-count files (`memory.usage_in_bytes` and friends)
//! in IEC units, the way `cat <file> | numfmt --to=iec` prints them. The
//! conversion is a [`ByteFormatter`] so callers can pick the external
//! `numfmt` utility, the in-process [`IecFormatter`], or a test double.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use std::thread;

/// Shell equivalent of the conversion, used when logging a probe's command.
pub const NUMFMT_COMMAND: &str = "numfmt --to=iec";

/// Suffixes used by `numfmt --to=iec`, starting at 1024.
const IEC_SUFFIXES: [&str; 8] = ["K", "M", "G", "T", "P", "E", "Z", "Y"];

/// Error produced while formatting a byte counter.
#[derive(Debug)]
pub enum FormatError {
    /// The formatter process could not be started or talked to.
    Spawn(std::io::Error),
    /// The formatter process exited unsuccessfully.
    Failed { status: ExitStatus, stderr: String },
    /// The formatter printed something that is not UTF-8.
    NonUtf8,
    /// A line of input is not an unsigned byte count.
    InvalidNumber(String),
}

impl std::fmt::Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatError::Spawn(e) => write!(f, "cannot run numfmt: {}", e),
            FormatError::Failed { status, stderr } if stderr.is_empty() => {
                write!(f, "numfmt failed with {}", status)
            }
            FormatError::Failed { status, stderr } => {
                write!(f, "numfmt failed with {}: {}", status, stderr)
            }
            FormatError::NonUtf8 => write!(f, "numfmt printed non UTF-8 output"),
            FormatError::InvalidNumber(s) => write!(f, "invalid number: '{}'", s),
        }
    }
}

impl std::error::Error for FormatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FormatError::Spawn(e) => Some(e),
            _ => None,
        }
    }
}

/// Converts the raw contents of a byte-count file into human-readable form.
pub trait ByteFormatter: Send {
    /// Formats `raw`, one value per line, preserving line structure.
    fn humanize(&self, raw: &str) -> Result<String, FormatError>;
}

/// Formats through the external `numfmt --to=iec` utility from coreutils.
#[derive(Debug, Clone)]
pub struct Numfmt {
    program: PathBuf,
}

impl Numfmt {
    /// Uses `numfmt` from `PATH`.
    pub fn new() -> Self {
        Self::with_program("numfmt")
    }

    /// Uses a specific `numfmt` binary.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for Numfmt {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteFormatter for Numfmt {
    fn humanize(&self, raw: &str) -> Result<String, FormatError> {
        let mut child = Command::new(&self.program)
            .arg("--to=iec")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(FormatError::Spawn)?;

        // stdin is fed from its own thread so a large input cannot fill the
        // stdout pipe while nothing is draining it.
        let stdin = child.stdin.take();
        let (output, written) = thread::scope(|scope| {
            let writer = scope.spawn(move || -> io::Result<()> {
                if let Some(mut stdin) = stdin {
                    stdin.write_all(raw.as_bytes())?;
                }
                Ok(())
            });
            let output = child.wait_with_output();
            let written = writer
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("stdin writer panicked")));
            (output, written)
        });

        let output = output.map_err(FormatError::Spawn)?;
        if !output.status.success() {
            return Err(FormatError::Failed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        // A failed exit explains an early-closed pipe better than EPIPE does.
        written.map_err(FormatError::Spawn)?;

        String::from_utf8(output.stdout).map_err(|_| FormatError::NonUtf8)
    }
}

/// In-process formatter producing the same output as `numfmt --to=iec`.
#[derive(Debug, Default, Clone, Copy)]
pub struct IecFormatter;

impl ByteFormatter for IecFormatter {
    fn humanize(&self, raw: &str) -> Result<String, FormatError> {
        let mut out = String::new();
        for line in raw.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let value: u64 = line
                .parse()
                .map_err(|_| FormatError::InvalidNumber(line.to_string()))?;
            out.push_str(&format_iec(value));
            out.push('\n');
        }
        Ok(out)
    }
}

/// Format a byte count in IEC units the way `numfmt --to=iec` does.
///
/// Values below 1024 are printed as-is. Scaled values below 10 keep one
/// decimal, larger ones are integers. Rounding is away from zero.
///
/// `1024` -> `"1.0K"`, `1536` -> `"1.5K"`, `10241` -> `"11K"`, `268435456` -> `"256M"`
pub fn format_iec(value: u64) -> String {
    if value < 1024 {
        return value.to_string();
    }

    let mut scaled = value as f64 / 1024.0;
    let mut unit = 0;
    while scaled >= 1024.0 && unit + 1 < IEC_SUFFIXES.len() {
        scaled /= 1024.0;
        unit += 1;
    }

    if scaled < 10.0 {
        let rounded = (scaled * 10.0).ceil() / 10.0;
        if rounded < 10.0 {
            return format!("{:.1}{}", rounded, IEC_SUFFIXES[unit]);
        }
        return format!("10{}", IEC_SUFFIXES[unit]);
    }

    let rounded = scaled.ceil();
    if rounded >= 1024.0 && unit + 1 < IEC_SUFFIXES.len() {
        return format!("1.0{}", IEC_SUFFIXES[unit + 1]);
    }
    format!("{}{}", rounded as u64, IEC_SUFFIXES[unit])
}
