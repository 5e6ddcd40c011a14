// tests/serial_sort.rs

mod common;
use crate::common::{assert_topological, init_tracing, GraphBuilder};

use std::error::Error;

use topodag::errors::TopoError;
use topodag::graph::GraphStore;
use topodag::sort::{SerialSorter, TopologicalSorter};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn test_diamond_is_sorted_in_fifo_order() -> TestResult {
    init_tracing();
    let graph = GraphBuilder::diamond().build();

    let order = SerialSorter::new().sort(&graph)?;

    assert_eq!(order.as_slice(), &[0, 1, 2, 3]);
    assert_topological(&graph, order.as_slice());
    Ok(())
}

#[test]
fn test_singleton_graph() -> TestResult {
    let graph = GraphBuilder::new(1).build();

    let order = SerialSorter::new().sort(&graph)?;

    assert_eq!(order.into_vec(), vec![0]);
    Ok(())
}

#[test]
fn test_empty_graph_yields_empty_order() -> TestResult {
    let graph = GraphStore::with_nodes(0)?;

    let order = SerialSorter::new().sort(&graph)?;

    assert!(order.is_empty());
    Ok(())
}

#[test]
fn test_roots_are_seeded_in_ascending_index_order() -> TestResult {
    // 3 and 1 are roots; 3 -> 0, 1 -> 2.
    let graph = GraphBuilder::new(4).edge(3, 0).edge(1, 2).build();

    let order = SerialSorter::new().sort(&graph)?;

    assert_eq!(order.as_slice(), &[1, 3, 2, 0]);
    Ok(())
}

#[test]
fn test_reverse_chain() -> TestResult {
    let graph = GraphBuilder::new(5)
        .edges([(4, 3), (3, 2), (2, 1), (1, 0)])
        .build();

    let order = SerialSorter::new().sort(&graph)?;

    assert_eq!(order.as_slice(), &[4, 3, 2, 1, 0]);
    Ok(())
}

#[test]
fn test_runs_are_deterministic_and_leave_graph_untouched() -> TestResult {
    let graph = GraphBuilder::layered(6, 5).edge(0, 29).build();
    let before = graph.clone();

    let first = SerialSorter::new().sort(&graph)?;
    let second = SerialSorter::new().sort(&graph)?;

    assert_eq!(first, second);
    assert_eq!(graph, before);
    assert_topological(&graph, first.as_slice());
    Ok(())
}

#[test]
fn test_three_cycle_orders_nothing() {
    let graph = GraphBuilder::ring(3).build();

    match SerialSorter::new().sort(&graph) {
        Err(TopoError::CyclicInput { sorted, total }) => {
            assert_eq!(sorted, 0);
            assert_eq!(total, 3);
        }
        other => panic!("Expected CyclicInput, got: {other:?}"),
    }
}

#[test]
fn test_cycle_downstream_of_valid_prefix() {
    // 0 -> 1 is fine; 2 <-> 3 is a cycle that also blocks 4.
    let graph = GraphBuilder::new(5)
        .edges([(0, 1), (2, 3), (3, 2), (3, 4)])
        .build();

    match SerialSorter::new().sort(&graph) {
        Err(TopoError::CyclicInput { sorted, total }) => {
            assert_eq!(sorted, 2);
            assert_eq!(total, 5);
        }
        other => panic!("Expected CyclicInput, got: {other:?}"),
    }
}

#[test]
fn test_self_loop_is_a_cycle() {
    let graph = GraphBuilder::new(2).edge(1, 1).build();

    let err = SerialSorter::new().sort(&graph).unwrap_err();

    assert!(matches!(err, TopoError::CyclicInput { sorted: 1, total: 2 }));
}
