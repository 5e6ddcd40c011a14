// src/queue.rs

//! Frontier queues: FIFO sequences of nodes whose dependencies are resolved.
//!
//! - [`FrontierQueue`] is the unsynchronized flavor, owned by a single thread
//!   (the serial sorter, or one parallel worker during seeding).
//! - [`SharedFrontier`] is the mutex-guarded flavor every seeding worker
//!   drains into.
//!
//! FIFO order matters: nodes are emitted in the order they became ready.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::errors::{Result, TopoError};
use crate::graph::NodeIndex;

/// Ring-buffer FIFO of ready node indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontierQueue {
    nodes: VecDeque<NodeIndex>,
}

impl FrontierQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `node` at the tail.
    ///
    /// Growth is reserved fallibly so an exhausted allocator surfaces as
    /// [`TopoError::Allocation`] instead of aborting inside `VecDeque`.
    pub fn push(&mut self, node: NodeIndex) -> Result<()> {
        self.nodes.try_reserve(1).map_err(|_| TopoError::Allocation {
            what: "frontier queue",
        })?;
        self.nodes.push_back(node);
        Ok(())
    }

    /// Remove and return the head, or `None` if the queue is empty.
    pub fn pop(&mut self) -> Option<NodeIndex> {
        self.nodes.pop_front()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Move every entry to the tail of `other`, preserving order.
    pub fn drain_into(&mut self, other: &mut FrontierQueue) -> Result<()> {
        other
            .nodes
            .try_reserve(self.nodes.len())
            .map_err(|_| TopoError::Allocation {
                what: "frontier queue",
            })?;
        other.nodes.extend(self.nodes.drain(..));
        Ok(())
    }
}

impl FromIterator<NodeIndex> for FrontierQueue {
    fn from_iter<I: IntoIterator<Item = NodeIndex>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for FrontierQueue {
    type Item = NodeIndex;
    type IntoIter = std::collections::vec_deque::IntoIter<NodeIndex>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

/// A [`FrontierQueue`] shared between threads behind one mutex.
#[derive(Debug, Default)]
pub struct SharedFrontier {
    inner: Mutex<FrontierQueue>,
}

impl SharedFrontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the queue.
    ///
    /// A poisoned lock is recovered: the queue holds plain indices and cannot
    /// be left half-updated by a panicking holder.
    pub fn lock(&self) -> MutexGuard<'_, FrontierQueue> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Drain a private queue into the shared one under a single lock
    /// acquisition.
    pub fn absorb(&self, local: &mut FrontierQueue) -> Result<()> {
        if local.is_empty() {
            return Ok(());
        }
        let mut shared = self.lock();
        local.drain_into(&mut shared)
    }

    pub fn into_inner(self) -> FrontierQueue {
        self.inner
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
