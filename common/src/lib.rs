//! Shared filesystem operations for the vendor-tools maintenance commands.
//!
//! The commands all follow the same shape: resolve a fixed set of paths,
//! pre-flight their existence, then run a short sequence of [`mirror`],
//! [`clear`] and file-copy steps. Everything here is synchronous, blocking
//! I/O; these are low-frequency maintenance operations, not a performance
//! sensitive path.

use anyhow::anyhow;

pub mod clear;
pub mod filter;
pub mod mirror;
pub mod rm;
#[cfg(test)]
pub mod testutils;

/// Output and logging configuration shared by every command.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Suppress error output
    pub quiet: bool,
    /// Verbosity level: 0=ERROR, 1=INFO, 2=DEBUG, 3=TRACE
    pub verbose: u8,
    /// Print summary statistics at the end
    pub print_summary: bool,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "error",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Set up tracing, invoke `func`, report errors and optionally print the
/// resulting summary.
///
/// Returns `None` when `func` failed so callers can exit with a non-zero
/// status.
pub fn run<Summary, Func>(output: &OutputConfig, func: Func) -> Option<Summary>
where
    Summary: std::fmt::Display,
    Func: FnOnce() -> anyhow::Result<Summary>,
{
    init_tracing(output.verbose);
    match func() {
        Ok(summary) => {
            if output.print_summary {
                println!("{}", &summary);
            }
            Some(summary)
        }
        Err(error) => {
            if !output.quiet {
                tracing::error!("{:#}", &error);
            }
            None
        }
    }
}

/// Pre-flight check: every path must exist before any copying begins.
pub fn ensure_dirs_exist<'a, Paths>(paths: Paths) -> anyhow::Result<()>
where
    Paths: IntoIterator<Item = &'a std::path::Path>,
{
    for path in paths {
        if !path.exists() {
            return Err(anyhow!("{} not found", path.display()));
        }
    }
    Ok(())
}
