// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Loading connectivity matrices from JSON documents
//!
//! Two document shapes are accepted:
//!
//! ```json
//! { "keys": ["a", "b"], "matrix": [[0, 1], [0, 0]] }
//! { "directed": false, "edges": [{ "from": "a", "to": "b", "weight": 2 }] }
//! ```
//!
//! Link documents may also carry `keys` to fix the ordering or to include
//! unlinked nodes; without it keys are taken from the links in order.

use crate::matrix::{ConnectivityMatrix, DenseMatrix, Link};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A matrix document as it appears on disk
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MatrixDocument {
    /// Explicit square matrix
    Dense(DenseMatrix),
    /// Link list
    Links {
        /// Optional key ordering
        #[serde(default)]
        keys: Option<Vec<String>>,
        /// Whether links only run `from -> to`
        #[serde(default = "default_directed")]
        directed: bool,
        /// The links
        edges: Vec<Link>,
    },
}

fn default_directed() -> bool {
    true
}

impl MatrixDocument {
    /// Build the matrix the document describes
    pub fn into_matrix(self) -> Result<ConnectivityMatrix> {
        let matrix = match self {
            Self::Dense(dense) => ConnectivityMatrix::try_from(dense)?,
            Self::Links { keys, directed, edges } => {
                ConnectivityMatrix::from_links(keys, &edges, directed)?
            }
        };
        Ok(matrix)
    }
}

/// Parse a matrix document from a JSON string
pub fn parse_matrix(content: &str) -> Result<ConnectivityMatrix> {
    let document: MatrixDocument =
        serde_json::from_str(content).context("Failed to parse matrix document")?;
    document.into_matrix()
}

/// Load one matrix document
pub fn load_matrix(path: &Path) -> Result<ConnectivityMatrix> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let matrix = parse_matrix(&content)
        .with_context(|| format!("Invalid matrix in {}", path.display()))?;
    debug!("Loaded {} ({} keys)", path.display(), matrix.size());
    Ok(matrix)
}

/// Load matrix documents in order
pub fn load_matrices(paths: &[PathBuf]) -> Result<Vec<ConnectivityMatrix>> {
    let matrices = paths
        .iter()
        .map(|p| load_matrix(p))
        .collect::<Result<Vec<_>>>()?;
    info!("Loaded {} matrices", matrices.len());
    Ok(matrices)
}
