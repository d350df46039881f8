// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Graph view of a connectivity matrix, with petgraph backing for algorithms

use crate::matrix::{ConnectivityMatrix, Weight};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

/// A connectivity matrix as a directed graph
///
/// Every key becomes a node; every non-zero cell becomes one edge carrying
/// the cell value.
pub struct MatrixGraph {
    /// The underlying directed graph
    graph: DiGraph<String, Weight>,
    /// Map from key to node index
    node_indices: HashMap<String, NodeIndex>,
}

impl MatrixGraph {
    /// Build the graph for a matrix
    #[must_use]
    pub fn from_matrix(matrix: &ConnectivityMatrix) -> Self {
        Self::build(matrix, |_| true)
    }

    /// Build the graph keeping only the keys accepted by `keep`
    ///
    /// Edges touching a dropped key are dropped with it.
    #[must_use]
    pub fn from_matrix_filtered<F>(matrix: &ConnectivityMatrix, keep: F) -> Self
    where
        F: Fn(&str) -> bool,
    {
        Self::build(matrix, keep)
    }

    fn build<F>(matrix: &ConnectivityMatrix, keep: F) -> Self
    where
        F: Fn(&str) -> bool,
    {
        let mut graph = DiGraph::new();
        let mut node_indices = HashMap::new();
        let mut by_position = Vec::with_capacity(matrix.size());

        for key in matrix.keys() {
            if keep(key) {
                let idx = graph.add_node(key.clone());
                node_indices.insert(key.clone(), idx);
                by_position.push(Some(idx));
            } else {
                by_position.push(None);
            }
        }

        for (row, col, weight) in matrix.non_zero() {
            if let (Some(from), Some(to)) = (by_position[row], by_position[col]) {
                graph.add_edge(from, to, weight);
            }
        }

        Self { graph, node_indices }
    }

    /// Get node count
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get edge count
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Check if the graph has no nodes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Outgoing neighbours of a key with their weights
    #[must_use]
    pub fn neighbors(&self, key: &str) -> Vec<(&str, Weight)> {
        let Some(&idx) = self.node_indices.get(key) else {
            return vec![];
        };
        let mut out: Vec<_> = self
            .graph
            .edges(idx)
            .map(|e| (self.graph[e.target()].as_str(), *e.weight()))
            .collect();
        // petgraph yields edges newest first
        out.reverse();
        out
    }

    /// Borrow the petgraph graph
    #[must_use]
    pub fn inner(&self) -> &DiGraph<String, Weight> {
        &self.graph
    }

    /// Export to DOT format for Graphviz
    #[must_use]
    pub fn to_dot(&self) -> String {
        let mut dot = String::from("digraph concept_map {\n");
        dot.push_str("  rankdir=LR;\n");
        dot.push_str("  node [shape=box, style=rounded];\n\n");

        for idx in self.graph.node_indices() {
            let key = escape(&self.graph[idx]);
            dot.push_str(&format!("  \"{key}\";\n"));
        }

        dot.push('\n');

        for edge in self.graph.edge_references() {
            dot.push_str(&format!(
                "  \"{}\" -> \"{}\" [label=\"{}\"];\n",
                escape(&self.graph[edge.source()]),
                escape(&self.graph[edge.target()]),
                edge.weight()
            ));
        }

        dot.push_str("}\n");
        dot
    }
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}
