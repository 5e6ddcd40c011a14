// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! Both executables share [`CommonArgs`]; the parallel one additionally takes
//! the worker count as its first positional argument.

use std::ffi::OsString;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};

/// Command-line arguments for `topodag-serial`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "topodag-serial",
    version,
    about = "Topologically sort a DAG with Kahn's algorithm on a single thread.",
    long_about = None
)]
pub struct SerialArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Command-line arguments for `topodag-parallel`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "topodag-parallel",
    version,
    about = "Topologically sort a DAG with Kahn's algorithm on a pool of worker threads.",
    long_about = None
)]
pub struct ParallelArgs {
    /// Number of worker threads (positive integer).
    #[arg(value_name = "THREAD-COUNT", value_parser = parse_thread_count)]
    pub threads: NonZeroUsize,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments shared by both executables.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Edge-list file containing the graph to sort.
    #[arg(value_name = "INPUT-FILE")]
    pub input: PathBuf,

    /// File the computed order is written to (created or truncated).
    #[arg(value_name = "OUTPUT-FILE")]
    pub output: PathBuf,

    /// Check the computed order against the graph before writing it.
    #[arg(long)]
    pub verify: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `TOPODAG_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

fn parse_thread_count(s: &str) -> Result<NonZeroUsize, String> {
    let count: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("`{s}` is not a positive integer"))?;
    NonZeroUsize::new(count).ok_or_else(|| "thread count must be at least 1".to_string())
}

/// Parse serial arguments from an explicit argument list.
pub fn try_parse_serial<I, T>(args: I) -> Result<SerialArgs, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    SerialArgs::try_parse_from(args)
}

/// Parse parallel arguments from an explicit argument list.
pub fn try_parse_parallel<I, T>(args: I) -> Result<ParallelArgs, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    ParallelArgs::try_parse_from(args)
}

/// Report a parse failure and exit.
///
/// `--help` and `--version` are not failures and exit with 0; everything else
/// exits with [`crate::EXIT_FAILURE`].
pub fn exit_on_parse_error(err: clap::Error) -> ! {
    err.print().ok();
    if err.use_stderr() {
        std::process::exit(crate::EXIT_FAILURE);
    }
    std::process::exit(0);
}
