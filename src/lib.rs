// src/lib.rs

//! Topological sorting of dense DAGs with Kahn's algorithm.
//!
//! Two executables share this library:
//! - `topodag-serial` runs [`sort::SerialSorter`], whose output is
//!   deterministic;
//! - `topodag-parallel` runs [`sort::ParallelSorter`], which seeds and drains
//!   the frontier with a fixed pool of worker threads.

pub mod cli;
pub mod errors;
pub mod graph;
pub mod logging;
pub mod output;
pub mod queue;
pub mod sort;
pub mod verify;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::{CommonArgs, ParallelArgs, SerialArgs};
use crate::errors::TopoError;
use crate::sort::{ParallelSorter, SerialSorter, TopologicalSorter};

/// Process exit code for every failure the binaries report.
pub const EXIT_FAILURE: i32 = -1;

/// Options shared by both executables, decoupled from `clap`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub verify: bool,
}

impl From<&CommonArgs> for RunOptions {
    fn from(args: &CommonArgs) -> Self {
        Self {
            input: args.input.clone(),
            output: args.output.clone(),
            verify: args.verify,
        }
    }
}

/// What a successful run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The input declared zero nodes; no sort ran and nothing was written.
    EmptyGraph,
    /// An order of `nodes` nodes was computed and written.
    Sorted { nodes: usize, elapsed: Duration },
}

/// Entry point of `topodag-serial`.
pub fn run_serial(args: SerialArgs) -> Result<RunOutcome> {
    let options = RunOptions::from(&args.common);
    run_with(&SerialSorter::new(), &options).context("serial topological sort failed")
}

/// Entry point of `topodag-parallel`.
pub fn run_parallel(args: ParallelArgs) -> Result<RunOutcome> {
    let options = RunOptions::from(&args.common);
    info!(threads = args.threads.get(), "threads that will be used");
    run_with(&ParallelSorter::new(args.threads), &options)
        .context("parallel topological sort failed")
}

/// Load, sort, optionally verify and write, using the given sorter.
///
/// Both files are opened before anything is parsed, so a bad output path is
/// reported without reading the graph. For an empty graph the output file is
/// left empty.
pub fn run_with(
    sorter: &dyn TopologicalSorter,
    options: &RunOptions,
) -> errors::Result<RunOutcome> {
    let input = File::open(&options.input).map_err(|e| TopoError::file(&options.input, e))?;
    let output = File::create(&options.output).map_err(|e| TopoError::file(&options.output, e))?;

    info!(
        input = %options.input.display(),
        output = %options.output.display(),
        sorter = sorter.name(),
        "calculating topological sort"
    );

    let graph = graph::load(BufReader::new(input)).map_err(|err| match err {
        TopoError::Io(source) => TopoError::file(&options.input, source),
        other => other,
    })?;

    if graph.is_empty() {
        info!("input graph is empty; nothing to sort");
        return Ok(RunOutcome::EmptyGraph);
    }

    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "algorithm started"
    );
    let started = Instant::now();
    let order = sorter.sort(&graph)?;
    let elapsed = started.elapsed();
    info!(elapsed_secs = elapsed.as_secs_f64(), "algorithm finished");

    if options.verify {
        verify::verify_order(&graph, order.as_slice())?;
        info!("computed order verified against every edge");
    }

    output::write_order_to_file(output, &options.output, order.as_slice())?;
    info!(output = %options.output.display(), "order written");

    Ok(RunOutcome::Sorted {
        nodes: order.len(),
        elapsed,
    })
}
