#![allow(dead_code)]

use std::fmt::Write as _;

use topodag::graph::{GraphStore, NodeIndex};

/// Builder for `GraphStore` to simplify test setup.
pub struct GraphBuilder {
    node_count: usize,
    edges: Vec<(NodeIndex, NodeIndex)>,
}

impl GraphBuilder {
    pub fn new(node_count: usize) -> Self {
        Self {
            node_count,
            edges: Vec::new(),
        }
    }

    pub fn edge(mut self, from: NodeIndex, to: NodeIndex) -> Self {
        self.edges.push((from, to));
        self
    }

    pub fn edges(mut self, edges: impl IntoIterator<Item = (NodeIndex, NodeIndex)>) -> Self {
        self.edges.extend(edges);
        self
    }

    /// `0 -> 1 -> ... -> n-1`.
    pub fn chain(node_count: usize) -> Self {
        Self::new(node_count).edges((1..node_count).map(|to| (to - 1, to)))
    }

    /// `0 -> 1, 0 -> 2, 1 -> 3, 2 -> 3`.
    pub fn diamond() -> Self {
        Self::new(4).edges([(0, 1), (0, 2), (1, 3), (2, 3)])
    }

    /// `0 -> 1 -> ... -> n-1 -> 0`.
    pub fn ring(node_count: usize) -> Self {
        Self::chain(node_count).edge(node_count - 1, 0)
    }

    /// Layers of `width` nodes where every node feeds every node of the next
    /// layer.
    pub fn layered(layers: usize, width: usize) -> Self {
        let mut builder = Self::new(layers * width);
        for layer in 1..layers {
            for from in 0..width {
                for to in 0..width {
                    builder = builder.edge((layer - 1) * width + from, layer * width + to);
                }
            }
        }
        builder
    }

    pub fn build(self) -> GraphStore {
        let mut graph =
            GraphStore::with_nodes(self.node_count).expect("Failed to allocate test graph");
        for (from, to) in self.edges {
            graph
                .add_edge(from, to)
                .expect("Failed to add edge from builder");
        }
        graph
    }

    /// Render the edge list in the text input format.
    pub fn to_edge_list(&self) -> String {
        let mut text = format!("{}\n", self.node_count);
        for (from, to) in &self.edges {
            writeln!(text, "{from} {to} 1.0").expect("writing to String cannot fail");
        }
        text.push_str("-1\n");
        text
    }
}
