// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Rendering aggregates for output

use crate::aggregate::{VoteAggregate, WeightAggregate};
use crate::graph::MatrixGraph;
use crate::matrix::{ConnectivityMatrix, Weight};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Tab-delimited matrix dump
    Tsv,
    /// JSON report
    Json,
    /// Graphviz DOT format
    Dot,
}

impl FromStr for ExportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "tsv" | "tab" => Ok(Self::Tsv),
            "json" => Ok(Self::Json),
            "dot" | "graphviz" => Ok(Self::Dot),
            other => anyhow::bail!("Unknown export format: {}. Supported: tsv, json, dot", other),
        }
    }
}

impl ExportFormat {
    /// Get file extension for format
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Tsv => "tsv",
            Self::Json => "json",
            Self::Dot => "dot",
        }
    }
}

/// Which aggregation produced a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AggregateKind {
    /// Summed weights
    WeightAggregate,
    /// Majority vote
    VoteAggregate,
}

/// Serializable snapshot of an aggregate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateReport {
    /// Aggregation that produced the matrix
    pub kind: AggregateKind,
    /// When the report was generated
    pub generated_at: DateTime<Utc>,
    /// Number of source matrices
    pub matrix_count: usize,
    /// Union keys, in row/column order
    pub keys: Vec<String>,
    /// Source-matrix count per key, aligned with `keys`
    pub node_counts: Vec<usize>,
    /// Cell values
    pub matrix: Vec<Vec<Weight>>,
}

impl AggregateReport {
    fn build(
        kind: AggregateKind,
        matrix: &ConnectivityMatrix,
        count: usize,
        node_count: impl Fn(&str) -> usize,
    ) -> Self {
        Self {
            kind,
            generated_at: Utc::now(),
            matrix_count: count,
            keys: matrix.keys().to_vec(),
            node_counts: matrix.keys().iter().map(|k| node_count(k)).collect(),
            matrix: matrix.rows().map(<[Weight]>::to_vec).collect(),
        }
    }

    /// Snapshot a weight aggregate
    #[must_use]
    pub fn from_weights(agg: &WeightAggregate) -> Self {
        Self::build(
            AggregateKind::WeightAggregate,
            agg.aggregate(),
            agg.count(),
            |k| agg.node_count(k),
        )
    }

    /// Snapshot a vote aggregate
    #[must_use]
    pub fn from_votes(agg: &VoteAggregate) -> Self {
        Self::build(
            AggregateKind::VoteAggregate,
            agg.aggregate(),
            agg.count(),
            |k| agg.node_count(k),
        )
    }

    /// Export to JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize report to JSON")
    }
}

/// Render a weight aggregate
pub fn render_weights(agg: &WeightAggregate, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Tsv => Ok(agg.aggregate().to_tsv()),
        ExportFormat::Json => AggregateReport::from_weights(agg).to_json(),
        ExportFormat::Dot => Ok(MatrixGraph::from_matrix(agg.aggregate()).to_dot()),
    }
}

/// Render a vote aggregate
///
/// The DOT rendering leaves out nodes that lost the node vote.
pub fn render_votes(agg: &VoteAggregate, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Tsv => Ok(agg.aggregate().to_tsv()),
        ExportFormat::Json => AggregateReport::from_votes(agg).to_json(),
        ExportFormat::Dot => {
            Ok(MatrixGraph::from_matrix_filtered(agg.aggregate(), |k| agg.node_voted(k)).to_dot())
        }
    }
}

/// One line per union key: key, node count, and whether it survives the vote
#[must_use]
pub fn node_table(agg: &VoteAggregate) -> String {
    let mut out = String::new();
    for key in agg.keys() {
        let verdict = if agg.node_voted(key) { "kept" } else { "dropped" };
        out.push_str(&format!(
            "{}\t{}/{}\t{}\n",
            key,
            agg.node_count(key),
            agg.count(),
            verdict
        ));
    }
    out
}
