// src/sort/serial.rs

use tracing::debug;

use crate::errors::{Result, TopoError};
use crate::graph::GraphStore;
use crate::queue::FrontierQueue;
use crate::sort::{reserve_order, TopologicalOrder, TopologicalSorter};

/// States of a serial sort run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerialPhase {
    Init,
    /// Ascending scan for nodes with no dependencies.
    Seeding,
    /// Popping the frontier and releasing successors.
    Draining,
    Done,
}

/// Single-threaded Kahn's algorithm.
///
/// Seeding scans nodes in ascending index order and draining is strictly
/// FIFO, so two runs over the same graph always produce the same sequence.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerialSorter;

impl SerialSorter {
    pub fn new() -> Self {
        Self
    }
}

impl TopologicalSorter for SerialSorter {
    fn name(&self) -> &'static str {
        "serial"
    }

    fn sort(&self, graph: &GraphStore) -> Result<TopologicalOrder> {
        let total = graph.node_count();
        let mut in_degree = graph.working_in_degree()?;
        let mut order = reserve_order(total)?;
        let mut frontier = FrontierQueue::new();
        let mut phase = SerialPhase::Init;

        loop {
            phase = match phase {
                SerialPhase::Init => SerialPhase::Seeding,
                SerialPhase::Seeding => {
                    for node in (0..total).filter(|&node| in_degree[node] == 0) {
                        frontier.push(node)?;
                    }
                    debug!(roots = frontier.len(), "serial: seeded frontier");
                    SerialPhase::Draining
                }
                SerialPhase::Draining => match frontier.pop() {
                    Some(node) => {
                        order.push(node);
                        for next in graph.successors(node) {
                            in_degree[next] -= 1;
                            if in_degree[next] == 0 {
                                frontier.push(next)?;
                            }
                        }
                        SerialPhase::Draining
                    }
                    None => SerialPhase::Done,
                },
                SerialPhase::Done => break,
            };
        }

        debug!(sorted = order.len(), total, "serial: frontier exhausted");
        if order.len() < total {
            return Err(TopoError::CyclicInput {
                sorted: order.len(),
                total,
            });
        }
        Ok(TopologicalOrder::new(order))
    }
}
