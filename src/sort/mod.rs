// src/sort/mod.rs

//! Kahn's algorithm, serial and parallel.
//!
//! - [`serial`] is the single-threaded reference implementation; its output
//!   is fully deterministic.
//! - [`parallel`] partitions seeding across a worker pool and drains a shared
//!   frontier under one mutex; its output is *a* valid order, not a
//!   reproducible one.
//!
//! Both report cyclic input as [`TopoError::CyclicInput`] rather than
//! truncating or hanging.
//!
//! [`TopoError::CyclicInput`]: crate::errors::TopoError::CyclicInput

pub mod parallel;
pub mod serial;

use crate::errors::Result;
use crate::graph::{GraphStore, NodeIndex};

pub use parallel::{ParallelSorter, SeedPartition};
pub use serial::{SerialPhase, SerialSorter};

/// Common interface of the two sorters.
pub trait TopologicalSorter {
    /// Short label used in logs.
    fn name(&self) -> &'static str;

    /// Compute a topological order of `graph`.
    ///
    /// The graph is only read; its static in-degrees are copied into
    /// per-run working counters.
    fn sort(&self, graph: &GraphStore) -> Result<TopologicalOrder>;
}

/// Result sequence of a sort: every node exactly once, predecessors first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopologicalOrder {
    nodes: Vec<NodeIndex>,
}

impl TopologicalOrder {
    pub(crate) fn new(nodes: Vec<NodeIndex>) -> Self {
        Self { nodes }
    }

    pub fn as_slice(&self) -> &[NodeIndex] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.nodes.iter().copied()
    }

    pub fn into_vec(self) -> Vec<NodeIndex> {
        self.nodes
    }
}

impl From<TopologicalOrder> for Vec<NodeIndex> {
    fn from(order: TopologicalOrder) -> Self {
        order.nodes
    }
}

/// Reserve room for a full result sequence up front.
pub(crate) fn reserve_order(node_count: usize) -> Result<Vec<NodeIndex>> {
    let mut nodes = Vec::new();
    nodes
        .try_reserve_exact(node_count)
        .map_err(|_| crate::errors::TopoError::Allocation {
            what: "result sequence",
        })?;
    Ok(nodes)
}
