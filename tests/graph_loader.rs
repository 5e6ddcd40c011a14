// tests/graph_loader.rs

mod common;
use crate::common::{init_tracing, input_file};

use std::error::Error;

use topodag::errors::TopoError;
use topodag::graph::{load, load_from_path, GraphStore};

type TestResult = Result<(), Box<dyn Error>>;

fn parse(text: &str) -> topodag::errors::Result<GraphStore> {
    load(text.as_bytes())
}

fn expect_parse_error(text: &str, line: usize, needle: &str) {
    match parse(text) {
        Err(TopoError::Parse { line: got, reason }) => {
            assert_eq!(got, line, "wrong line for {reason:?}");
            assert!(
                reason.contains(needle),
                "expected {needle:?} in parse error, got {reason:?}"
            );
        }
        Err(e) => panic!("Expected Parse error, got: {e:?}"),
        Ok(g) => panic!("Expected error, got graph {g:?}"),
    }
}

#[test]
fn test_loads_edges_and_in_degrees() -> TestResult {
    init_tracing();

    let graph = parse("4\n0 1 0.5\n0 2 1\n1 3 2.25\n2 3 -7e3\n-1")?;

    assert_eq!(graph.node_count(), 4);
    assert_eq!(graph.edge_count(), 4);
    assert_eq!(graph.in_degree(), &[0, 1, 1, 2]);
    assert!(graph.has_edge(0, 1));
    assert!(!graph.has_edge(1, 0));
    assert_eq!(graph.successors(0).collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(graph.successors(3).count(), 0);
    Ok(())
}

#[test]
fn test_records_may_come_in_any_order_with_blank_lines() -> TestResult {
    let graph = parse("3\n\n2 0 1.0\n\n1 0 1.0\n-1\n")?;

    assert_eq!(graph.in_degree(), &[2, 0, 0]);
    assert_eq!(graph.edges().collect::<Vec<_>>(), vec![(1, 0), (2, 0)]);
    Ok(())
}

#[test]
fn test_zero_nodes_returns_empty_graph_without_sentinel() -> TestResult {
    let graph = parse("0\n")?;

    assert!(graph.is_empty());
    assert_eq!(graph.edge_count(), 0);
    Ok(())
}

#[test]
fn test_singleton_without_edges() -> TestResult {
    let graph = parse("1\n-1")?;

    assert_eq!(graph.node_count(), 1);
    assert_eq!(graph.in_degree(), &[0]);
    Ok(())
}

#[test]
fn test_duplicate_edges_keep_in_degree_consistent() -> TestResult {
    let graph = parse("2\n0 1 1.0\n0 1 2.0\n-1")?;

    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.in_degree(), &[0, 1]);
    Ok(())
}

#[test]
fn test_text_after_sentinel_is_ignored() -> TestResult {
    let graph = parse("2\n0 1 1.0\n-1\nthis is not an edge\n")?;

    assert_eq!(graph.edge_count(), 1);
    Ok(())
}

#[test]
fn test_missing_node_count() {
    expect_parse_error("", 1, "missing node count");
    expect_parse_error("\n\n", 1, "missing node count");
}

#[test]
fn test_non_integer_node_count() {
    expect_parse_error("four\n-1", 1, "expected integer node count");
    expect_parse_error("4 5\n-1", 1, "only the node count");
}

#[test]
fn test_negative_node_count() {
    expect_parse_error("-3\n-1", 1, "non-negative");
}

#[test]
fn test_missing_sentinel() {
    expect_parse_error("3\n0 1 1.0\n1 2 1.0\n", 3, "sentinel");
}

#[test]
fn test_wrong_field_count() {
    expect_parse_error("3\n0 1\n-1", 2, "found 2 field(s)");
    expect_parse_error("3\n0 1 1.0 9\n-1", 2, "found 4 field(s)");
}

#[test]
fn test_non_integer_index() {
    expect_parse_error("3\n0 x 1.0\n-1", 2, "expected integer node index, found `x`");
    expect_parse_error("3\n0.5 1 1.0\n-1", 2, "expected integer node index");
}

#[test]
fn test_non_numeric_weight() {
    expect_parse_error("3\n0 1 heavy\n-1", 2, "expected numeric weight");
}

#[test]
fn test_out_of_range_indices() {
    expect_parse_error("3\n0 3 1.0\n-1", 2, "node index 3 is out of range 0..3");
    expect_parse_error("3\n\n-2 1 1.0\n-1", 3, "node index -2 is out of range");
    expect_parse_error("3\n-1 1 1.0\n-1", 2, "node index -1 is out of range");
}

#[test]
fn test_invalid_utf8_is_parse_error() {
    match load(&b"3\n\xff 1 1.0\n-1"[..]) {
        Err(TopoError::Parse { line, reason }) => {
            assert_eq!(line, 2);
            assert!(reason.contains("UTF-8"), "unexpected reason {reason:?}");
        }
        other => panic!("Expected Parse error, got: {other:?}"),
    }
}

#[test]
fn test_load_from_path_reads_file() -> TestResult {
    let file = input_file("2\n1 0 3.5\n-1");

    let graph = load_from_path(file.path())?;

    assert_eq!(graph.in_degree(), &[1, 0]);
    Ok(())
}

#[test]
fn test_load_from_missing_path_is_file_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("no-such-graph.txt");

    match load_from_path(&missing) {
        Err(TopoError::File { path, .. }) => assert_eq!(path, missing),
        other => panic!("Expected File error, got: {other:?}"),
    }
}

#[test]
fn test_add_edge_rejects_out_of_range() -> TestResult {
    let mut graph = GraphStore::with_nodes(2)?;

    assert!(graph.add_edge(0, 1)?);
    assert!(!graph.add_edge(0, 1)?);
    assert!(matches!(graph.add_edge(2, 0), Err(TopoError::Parameter(_))));
    assert_eq!(graph.in_degree(), &[0, 1]);
    Ok(())
}

#[test]
fn test_impossible_graph_size_is_allocation_error() {
    match GraphStore::with_nodes(usize::MAX) {
        Err(TopoError::Allocation { what }) => assert_eq!(what, "adjacency matrix"),
        other => panic!("Expected Allocation error, got: {other:?}"),
    }
}
