// src/graph/loader.rs

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use tracing::{debug, warn};

use crate::errors::{Result, TopoError};
use crate::graph::store::{GraphStore, NodeIndex};

/// Line that terminates the edge list.
pub const SENTINEL: &str = "-1";

/// One parsed line of the edge list.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Record {
    Edge { from: NodeIndex, to: NodeIndex },
    Sentinel,
}

/// Open `path` and parse it as an edge list.
///
/// An unreadable file is reported as [`TopoError::File`]; everything else is
/// delegated to [`load`].
pub fn load_from_path(path: impl AsRef<Path>) -> Result<GraphStore> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| TopoError::file(path, e))?;
    load(BufReader::new(file))
}

/// Parse an edge list:
///
/// ```text
/// <node count>
/// <from> <to> <weight>
/// ...
/// -1
/// ```
///
/// Blank lines are skipped and anything after the sentinel is ignored. A node
/// count of zero returns an empty graph immediately, without looking for edges
/// or the sentinel.
pub fn load(reader: impl BufRead) -> Result<GraphStore> {
    let mut lines = reader
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line));

    let Some((header_line, header)) = next_significant(&mut lines)? else {
        return Err(TopoError::parse(1, "missing node count"));
    };
    let node_count = parse_node_count(header_line, &header)?;

    let mut graph = GraphStore::with_nodes(node_count)?;
    if node_count == 0 {
        warn!("graph has no nodes; nothing to sort");
        return Ok(graph);
    }

    let mut last_line = header_line;
    let mut duplicates = 0usize;
    loop {
        let Some((line_no, text)) = next_significant(&mut lines)? else {
            return Err(TopoError::parse(
                last_line,
                format!("missing `{SENTINEL}` sentinel after the last edge"),
            ));
        };
        last_line = line_no;

        match parse_record(line_no, &text, node_count)? {
            Record::Sentinel => break,
            Record::Edge { from, to } => {
                if !graph.add_edge(from, to)? {
                    duplicates += 1;
                }
            }
        }
    }

    if duplicates > 0 {
        warn!(duplicates, "edge list contains repeated edges; ignoring repeats");
    }
    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "loaded graph"
    );
    Ok(graph)
}

/// Next non-blank line, with its 1-based line number.
///
/// Bytes that do not decode as UTF-8 are malformed input, not a read failure.
fn next_significant(
    lines: &mut impl Iterator<Item = (usize, std::io::Result<String>)>,
) -> Result<Option<(usize, String)>> {
    for (line_no, line) in lines {
        let line = line.map_err(|err| match err.kind() {
            ErrorKind::InvalidData => TopoError::parse(line_no, "line is not valid UTF-8"),
            _ => TopoError::Io(err),
        })?;
        if !line.trim().is_empty() {
            return Ok(Some((line_no, line)));
        }
    }
    Ok(None)
}

fn parse_node_count(line: usize, text: &str) -> Result<usize> {
    let mut fields = text.split_whitespace();
    let (Some(token), None) = (fields.next(), fields.next()) else {
        return Err(TopoError::parse(
            line,
            "first line must contain only the node count",
        ));
    };

    let value: i64 = token.parse().map_err(|_| {
        TopoError::parse(line, format!("expected integer node count, found `{token}`"))
    })?;

    usize::try_from(value).map_err(|_| {
        TopoError::parse(line, format!("node count must be non-negative, got {value}"))
    })
}

fn parse_record(line: usize, text: &str, node_count: usize) -> Result<Record> {
    let fields: Vec<&str> = text.split_whitespace().collect();

    if fields == [SENTINEL] {
        return Ok(Record::Sentinel);
    }

    let [from, to, weight] = fields.as_slice() else {
        return Err(TopoError::parse(
            line,
            format!(
                "expected `<from> <to> <weight>` or `{SENTINEL}`, found {} field(s)",
                fields.len()
            ),
        ));
    };

    let from = parse_index(line, from, node_count)?;
    let to = parse_index(line, to, node_count)?;
    weight.parse::<f64>().map_err(|_| {
        TopoError::parse(line, format!("expected numeric weight, found `{weight}`"))
    })?;

    Ok(Record::Edge { from, to })
}

fn parse_index(line: usize, token: &str, node_count: usize) -> Result<NodeIndex> {
    let value: i64 = token.parse().map_err(|_| {
        TopoError::parse(line, format!("expected integer node index, found `{token}`"))
    })?;

    usize::try_from(value)
        .ok()
        .filter(|&idx| idx < node_count)
        .ok_or_else(|| {
            TopoError::parse(
                line,
                format!("node index {value} is out of range 0..{node_count}"),
            )
        })
}
