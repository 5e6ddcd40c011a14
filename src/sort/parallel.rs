// src/sort/parallel.rs

//! Multi-threaded Kahn's algorithm.
//!
//! A run has two phases separated by a full join of the worker pool:
//!
//! 1. **Seeding.** Each worker scans a static slice of the node range (see
//!    [`SeedPartition`]) for zero in-degree nodes, collects them in a private
//!    [`FrontierQueue`] and then moves them into the [`SharedFrontier`] with a
//!    single lock acquisition.
//! 2. **Draining.** Workers repeatedly lock the drain state, release the
//!    successors they found on their previous iteration, pop one ready node and
//!    append it to the result. The edge scan of the popped node happens
//!    outside the lock; adjacency is read-only so it needs no synchronization.
//!
//! Every in-degree decrement, queue push/pop and result write happens under
//! the one drain mutex. Workers with nothing to do park on a condition
//! variable. When every worker is parked, no pending buffer can hold work and
//! the frontier is empty, so a result still short of `N` means the remaining
//! nodes sit on a cycle; the run halts with [`TopoError::CyclicInput`].

use std::num::NonZeroUsize;
use std::ops::Range;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, ScopedJoinHandle};

use tracing::{debug, trace};

use crate::errors::{Result, TopoError};
use crate::graph::{GraphStore, NodeIndex};
use crate::queue::{FrontierQueue, SharedFrontier};
use crate::sort::{reserve_order, TopologicalOrder, TopologicalSorter};

/// Worker-pool Kahn's algorithm with a shared frontier.
#[derive(Debug, Clone, Copy)]
pub struct ParallelSorter {
    workers: NonZeroUsize,
}

impl ParallelSorter {
    pub fn new(workers: NonZeroUsize) -> Self {
        Self { workers }
    }

    pub fn workers(&self) -> NonZeroUsize {
        self.workers
    }

    /// Phase 1: find every initial zero in-degree node.
    ///
    /// Returns the shared frontier once all seeding workers have been joined.
    fn seed(&self, graph: &GraphStore) -> Result<FrontierQueue> {
        let shared = SharedFrontier::new();
        let in_degree = graph.in_degree();
        let node_count = graph.node_count();

        thread::scope(|scope| {
            let handles: Vec<_> = (0..self.workers.get())
                .map(|worker| {
                    let shared = &shared;
                    let partition = SeedPartition::for_worker(worker, self.workers, node_count);
                    scope.spawn(move || -> Result<usize> {
                        let mut local = FrontierQueue::new();
                        for node in partition.nodes() {
                            if in_degree[node] == 0 {
                                local.push(node)?;
                            }
                        }
                        let roots = local.len();
                        trace!(worker, ?partition, roots, "parallel: seeding worker done");
                        shared.absorb(&mut local)?;
                        Ok(roots)
                    })
                })
                .collect();

            join_workers(handles)
                .into_iter()
                .collect::<Result<Vec<usize>>>()
        })?;

        Ok(shared.into_inner())
    }

    /// Phase 2: drain the frontier with the full worker pool.
    fn drain(&self, graph: &GraphStore, frontier: FrontierQueue) -> Result<TopologicalOrder> {
        let ctx = DrainContext::new(graph, self.workers.get(), frontier)?;

        let per_worker = thread::scope(|scope| {
            let handles: Vec<_> = (0..ctx.workers)
                .map(|worker| {
                    let ctx = &ctx;
                    scope.spawn(move || ctx.run_worker(worker))
                })
                .collect();

            join_workers(handles)
        });
        debug!(?per_worker, "parallel: nodes emitted per worker");

        ctx.into_order()
    }
}

impl TopologicalSorter for ParallelSorter {
    fn name(&self) -> &'static str {
        "parallel"
    }

    fn sort(&self, graph: &GraphStore) -> Result<TopologicalOrder> {
        if graph.is_empty() {
            return Ok(TopologicalOrder::default());
        }

        let frontier = self.seed(graph)?;
        debug!(
            roots = frontier.len(),
            workers = self.workers.get(),
            "parallel: seeding barrier passed"
        );

        self.drain(graph, frontier)
    }
}

/// The nodes one worker scans during seeding.
///
/// The range `[0, N)` is cut into `W` contiguous blocks of `N / W` nodes.
/// The `N % W` nodes left over at the end of the range are handed out one
/// each to the lowest-numbered workers, counting down from the last node:
/// worker `id` (for `id < N % W`) also owns node `N - id - 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedPartition {
    pub block: Range<NodeIndex>,
    pub remainder: Option<NodeIndex>,
}

impl SeedPartition {
    pub fn for_worker(worker: usize, workers: NonZeroUsize, node_count: usize) -> Self {
        let workers = workers.get();
        let interval = node_count / workers;
        let leftover = node_count % workers;
        let start = worker * interval;

        Self {
            block: start..start + interval,
            remainder: (worker < leftover).then(|| node_count - worker - 1),
        }
    }

    /// Block nodes in ascending order, then the remainder node if any.
    pub fn nodes(&self) -> impl Iterator<Item = NodeIndex> {
        self.block.clone().chain(self.remainder)
    }

    pub fn len(&self) -> usize {
        self.block.len() + usize::from(self.remainder.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Why the drain phase stopped before emitting every node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Halt {
    /// All workers parked with an empty frontier.
    Stalled,
    Allocation(&'static str),
    WorkerPanicked,
}

/// Everything guarded by the drain mutex.
#[derive(Debug)]
struct DrainState {
    frontier: FrontierQueue,
    in_degree: Vec<usize>,
    order: Vec<NodeIndex>,
    /// Workers currently parked on `DrainContext::ready`.
    waiting: usize,
    halt: Option<Halt>,
}

impl DrainState {
    /// Apply the decrements buffered by one worker and queue every node whose
    /// in-degree reaches zero. Returns how many nodes became ready.
    fn release(&mut self, pending: &mut Vec<NodeIndex>) -> Result<usize> {
        let mut released = 0;
        for node in pending.drain(..) {
            self.in_degree[node] -= 1;
            if self.in_degree[node] == 0 {
                self.frontier.push(node)?;
                released += 1;
            }
        }
        Ok(released)
    }

    fn halt(&mut self, reason: Halt) {
        self.halt.get_or_insert(reason);
    }
}

/// Per-run context borrowed by every drain worker.
struct DrainContext<'g> {
    graph: &'g GraphStore,
    workers: usize,
    state: Mutex<DrainState>,
    ready: Condvar,
    /// Mirror of `order.len()`, written under the lock and read without it as
    /// the termination fast path.
    emitted: AtomicUsize,
}

impl<'g> DrainContext<'g> {
    fn new(graph: &'g GraphStore, workers: usize, frontier: FrontierQueue) -> Result<Self> {
        Ok(Self {
            graph,
            workers,
            state: Mutex::new(DrainState {
                frontier,
                in_degree: graph.working_in_degree()?,
                order: reserve_order(graph.node_count())?,
                waiting: 0,
                halt: None,
            }),
            ready: Condvar::new(),
            emitted: AtomicUsize::new(0),
        })
    }

    /// Turn the state left by the joined workers into the run's result.
    fn into_order(self) -> Result<TopologicalOrder> {
        let total = self.graph.node_count();
        let state = self
            .state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        let sorted = state.order.len();

        match state.halt {
            Some(Halt::Allocation(what)) => Err(TopoError::Allocation { what }),
            _ if sorted < total => Err(TopoError::CyclicInput { sorted, total }),
            _ => Ok(TopologicalOrder::new(state.order)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, DrainState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn abort(&self, reason: Halt) {
        self.lock().halt(reason);
        self.ready.notify_all();
    }

    /// Drain loop of one worker. Returns the number of nodes it emitted.
    fn run_worker(&self, worker: usize) -> usize {
        let _guard = HaltOnPanic(self);
        let total = self.graph.node_count();
        let mut pending: Vec<NodeIndex> = Vec::new();
        let mut emitted_here = 0;

        while self.emitted.load(Ordering::Acquire) != total {
            let mut state = self.lock();

            match state.release(&mut pending) {
                Ok(0) => {}
                Ok(1) => self.ready.notify_one(),
                Ok(_) => self.ready.notify_all(),
                Err(_) => {
                    state.halt(Halt::Allocation("frontier queue"));
                    self.ready.notify_all();
                    break;
                }
            }

            let next = loop {
                if state.halt.is_some() || state.order.len() == total {
                    break None;
                }
                if let Some(node) = state.frontier.pop() {
                    break Some(node);
                }

                state.waiting += 1;
                if state.waiting == self.workers {
                    debug!(
                        worker,
                        sorted = state.order.len(),
                        total,
                        "parallel: every worker idle with nodes left; input is cyclic"
                    );
                    state.waiting -= 1;
                    state.halt(Halt::Stalled);
                    self.ready.notify_all();
                    break None;
                }
                state = self
                    .ready
                    .wait(state)
                    .unwrap_or_else(PoisonError::into_inner);
                state.waiting -= 1;
            };

            let Some(node) = next else {
                break;
            };

            state.order.push(node);
            let emitted = state.order.len();
            self.emitted.store(emitted, Ordering::Release);
            if emitted == total {
                self.ready.notify_all();
            }
            drop(state);
            emitted_here += 1;

            for target in self.graph.successors(node) {
                if pending.try_reserve(1).is_err() {
                    self.abort(Halt::Allocation("pending buffer"));
                    return emitted_here;
                }
                pending.push(target);
            }
        }

        trace!(worker, emitted = emitted_here, "parallel: drain worker exiting");
        emitted_here
    }
}

/// Halts the run if a worker unwinds, so its peers stop waiting for it.
struct HaltOnPanic<'a, 'g>(&'a DrainContext<'g>);

impl Drop for HaltOnPanic<'_, '_> {
    fn drop(&mut self) {
        if thread::panicking() {
            self.0.abort(Halt::WorkerPanicked);
        }
    }
}

/// Join every worker in spawn order, re-raising any panic on the caller.
fn join_workers<T>(handles: Vec<ScopedJoinHandle<'_, T>>) -> Vec<T> {
    handles
        .into_iter()
        .map(|handle| match handle.join() {
            Ok(out) => out,
            Err(panic) => std::panic::resume_unwind(panic),
        })
        .collect()
}
