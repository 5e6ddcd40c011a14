// src/graph/store.rs

use crate::errors::{Result, TopoError};

/// Index of a node in a [`GraphStore`], always in `0..node_count`.
pub type NodeIndex = usize;

/// Dense adjacency relation plus static in-degree counters.
///
/// `adjacency` is stored row-major in a single buffer: the cell for edge
/// `i -> j` lives at `i * node_count + j`. The relation is immutable once
/// loading is finished, so sorters can read it from any thread without
/// synchronization.
///
/// Sorters never mutate the store; they copy [`GraphStore::in_degree`] into
/// their own working counters, which lets the same graph be sorted any
/// number of times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphStore {
    node_count: usize,
    adjacency: Vec<bool>,
    in_degree: Vec<usize>,
    edge_count: usize,
}

impl GraphStore {
    /// Allocate an edgeless graph with `node_count` nodes.
    ///
    /// Fails with [`TopoError::Allocation`] if `node_count * node_count`
    /// overflows or the storage cannot be reserved.
    pub fn with_nodes(node_count: usize) -> Result<Self> {
        let cells = node_count
            .checked_mul(node_count)
            .ok_or(TopoError::Allocation {
                what: "adjacency matrix",
            })?;

        let mut adjacency = Vec::new();
        adjacency
            .try_reserve_exact(cells)
            .map_err(|_| TopoError::Allocation {
                what: "adjacency matrix",
            })?;
        adjacency.resize(cells, false);

        let mut in_degree = Vec::new();
        in_degree
            .try_reserve_exact(node_count)
            .map_err(|_| TopoError::Allocation {
                what: "in-degree counters",
            })?;
        in_degree.resize(node_count, 0);

        Ok(Self {
            node_count,
            adjacency,
            in_degree,
            edge_count: 0,
        })
    }

    /// Record edge `from -> to`.
    ///
    /// Returns `Ok(true)` if the edge was new and `Ok(false)` if it was
    /// already present; duplicates leave the in-degree untouched.
    pub fn add_edge(&mut self, from: NodeIndex, to: NodeIndex) -> Result<bool> {
        if from >= self.node_count || to >= self.node_count {
            return Err(TopoError::Parameter(format!(
                "edge {from} -> {to} is out of range for a graph of {} nodes",
                self.node_count
            )));
        }

        let cell = &mut self.adjacency[from * self.node_count + to];
        if *cell {
            return Ok(false);
        }
        *cell = true;
        self.in_degree[to] += 1;
        self.edge_count += 1;
        Ok(true)
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of distinct edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.node_count == 0
    }

    pub fn has_edge(&self, from: NodeIndex, to: NodeIndex) -> bool {
        from < self.node_count
            && to < self.node_count
            && self.adjacency[from * self.node_count + to]
    }

    /// Static in-degree of every node, indexed by node.
    pub fn in_degree(&self) -> &[usize] {
        &self.in_degree
    }

    /// Ascending iterator over the direct successors of `node`.
    ///
    /// This scans the node's full adjacency row.
    pub fn successors(&self, node: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        let row = &self.adjacency[node * self.node_count..(node + 1) * self.node_count];
        row.iter()
            .enumerate()
            .filter_map(|(target, &present)| present.then_some(target))
    }

    /// All edges in row-major order.
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex)> + '_ {
        (0..self.node_count).flat_map(move |from| self.successors(from).map(move |to| (from, to)))
    }

    /// Copy the static in-degrees into a freshly reserved working buffer.
    pub(crate) fn working_in_degree(&self) -> Result<Vec<usize>> {
        let mut counters = Vec::new();
        counters
            .try_reserve_exact(self.node_count)
            .map_err(|_| TopoError::Allocation {
                what: "in-degree counters",
            })?;
        counters.extend_from_slice(&self.in_degree);
        Ok(counters)
    }
}
