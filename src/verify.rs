// src/verify.rs

//! Independent check that a sequence is a topological order of a graph.
//!
//! Used by `--verify` in the binaries and throughout the test-suite.

use thiserror::Error;

use crate::graph::{GraphStore, NodeIndex};

/// First problem found in a candidate order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderViolation {
    #[error("order has {actual} entries but the graph has {expected} nodes")]
    WrongLength { expected: usize, actual: usize },

    #[error("node {node} at position {position} is out of range")]
    OutOfRange { node: NodeIndex, position: usize },

    #[error("node {node} appears twice (positions {first} and {second})")]
    Duplicate {
        node: NodeIndex,
        first: usize,
        second: usize,
    },

    #[error("edge {from} -> {to} is violated: {to} is placed before {from}")]
    EdgeViolated { from: NodeIndex, to: NodeIndex },
}

/// Check that `order` is a permutation of `0..N` in which every edge
/// `i -> j` of `graph` has `i` before `j`.
pub fn verify_order(graph: &GraphStore, order: &[NodeIndex]) -> Result<(), OrderViolation> {
    let node_count = graph.node_count();
    if order.len() != node_count {
        return Err(OrderViolation::WrongLength {
            expected: node_count,
            actual: order.len(),
        });
    }

    let mut position: Vec<Option<usize>> = vec![None; node_count];
    for (pos, &node) in order.iter().enumerate() {
        let slot = position
            .get_mut(node)
            .ok_or(OrderViolation::OutOfRange {
                node,
                position: pos,
            })?;
        if let Some(first) = *slot {
            return Err(OrderViolation::Duplicate {
                node,
                first,
                second: pos,
            });
        }
        *slot = Some(pos);
    }

    // Every slot is filled: `order` has N distinct in-range entries.
    for (from, to) in graph.edges() {
        if position[from] > position[to] {
            return Err(OrderViolation::EdgeViolated { from, to });
        }
    }

    Ok(())
}
