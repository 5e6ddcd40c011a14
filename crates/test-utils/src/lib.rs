pub mod builders;

use std::sync::Once;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use topodag::graph::{GraphStore, NodeIndex};
use topodag::verify::verify_order;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// - Uses `with_test_writer()`, so logs are captured per-test.
/// - The Rust test harness only prints captured output for **failing** tests
///   (unless you run with `-- --nocapture`).
///
/// Enable levels with e.g.:
/// `RUST_LOG=debug cargo test`
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer() // print only for failing tests unless --nocapture
            .with_target(true)
            .init();
    });
}

/// Run `f` on its own thread and fail the test if it takes longer than
/// `limit`.
///
/// The worker thread is detached on timeout, so a hung sort cannot keep the
/// test binary alive past the assertion.
pub fn with_timeout<F, T>(limit: Duration, f: F) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(f());
    });
    rx.recv_timeout(limit)
        .unwrap_or_else(|_| panic!("Test timed out after {limit:?}"))
}

/// Assert that `order` is a valid topological order of `graph`.
#[track_caller]
pub fn assert_topological(graph: &GraphStore, order: &[NodeIndex]) {
    if let Err(violation) = verify_order(graph, order) {
        panic!("invalid topological order {order:?}: {violation}");
    }
}
