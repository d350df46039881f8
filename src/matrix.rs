// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Dense connectivity matrices over a key index
//!
//! Cell `(i, j)` holds the weight of the relationship from key `i` to key
//! `j`; zero means no link. Matrices are not assumed to be symmetric.

use crate::error::{MatrixError, Result};
use crate::index::KeyIndex;
use serde::{Deserialize, Serialize};

/// Edge weight stored in a matrix cell
pub type Weight = i64;

/// A link between two keys, as found in a concept map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Source key
    pub from: String,
    /// Target key
    pub to: String,
    /// Link weight (defaults to 1)
    #[serde(default = "default_link_weight")]
    pub weight: Weight,
}

fn default_link_weight() -> Weight {
    1
}

impl Link {
    /// Create a link of weight 1
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            weight: 1,
        }
    }

    /// Set the weight
    #[must_use]
    pub fn with_weight(mut self, weight: Weight) -> Self {
        self.weight = weight;
        self
    }
}

/// Square matrix of integer weights indexed by key position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DenseMatrix", into = "DenseMatrix")]
pub struct ConnectivityMatrix {
    keys: KeyIndex,
    /// Row-major `size * size` cells
    cells: Vec<Weight>,
}

impl ConnectivityMatrix {
    /// Allocate a zero matrix sized to the key index
    #[must_use]
    pub fn new(keys: KeyIndex) -> Self {
        let size = keys.len();
        Self {
            keys,
            cells: vec![0; size * size],
        }
    }

    /// Allocate a zero matrix over a list of distinct keys
    pub fn from_keys<I, S>(keys: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self::new(KeyIndex::from_unique(keys)?))
    }

    /// Build a matrix from row data, validating that it is square over the keys
    pub fn from_rows<S: Into<String>>(keys: Vec<S>, rows: Vec<Vec<Weight>>) -> Result<Self> {
        let mut matrix = Self::from_keys(keys)?;
        let size = matrix.size();
        if rows.len() != size {
            return Err(MatrixError::DimensionMismatch {
                expected: size,
                actual: rows.len(),
            });
        }
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(MatrixError::DimensionMismatch {
                    expected: size,
                    actual: row.len(),
                });
            }
            matrix.cells[i * size..(i + 1) * size].copy_from_slice(&row);
        }
        Ok(matrix)
    }

    /// Build a matrix from a link list
    ///
    /// Keys come from `keys` when given, otherwise from link endpoints in
    /// first-seen order. Undirected links are written in both directions,
    /// except self links which are written once.
    pub fn from_links(keys: Option<Vec<String>>, links: &[Link], directed: bool) -> Result<Self> {
        let index = match keys {
            Some(keys) => KeyIndex::from_unique(keys)?,
            None => {
                let mut index = KeyIndex::new();
                for link in links {
                    index.insert(link.from.as_str());
                    index.insert(link.to.as_str());
                }
                index
            }
        };

        let mut matrix = Self::new(index);
        for link in links {
            let from = matrix.index_of(&link.from)?;
            let to = matrix.index_of(&link.to)?;
            matrix.add(from, to, link.weight)?;
            if !directed && from != to {
                matrix.add(to, from, link.weight)?;
            }
        }
        Ok(matrix)
    }

    /// Matrix dimension, equal to the number of keys
    #[must_use]
    pub fn size(&self) -> usize {
        self.keys.len()
    }

    /// Check if the matrix has no keys
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The key index
    #[must_use]
    pub fn key_index(&self) -> &KeyIndex {
        &self.keys
    }

    /// Keys in row/column order
    #[must_use]
    pub fn keys(&self) -> &[String] {
        self.keys.keys()
    }

    /// Key labelling a row or column
    #[must_use]
    pub fn key_at(&self, pos: usize) -> Option<&str> {
        self.keys.key_at(pos)
    }

    /// Row/column of a key
    pub fn index_of(&self, key: &str) -> Result<usize> {
        self.keys.index_of(key)
    }

    fn offset(&self, row: usize, col: usize) -> Result<usize> {
        let size = self.size();
        if row >= size || col >= size {
            return Err(MatrixError::IndexOutOfRange { row, col, size });
        }
        Ok(row * size + col)
    }

    /// Read a cell by position
    pub fn get(&self, row: usize, col: usize) -> Result<Weight> {
        let offset = self.offset(row, col)?;
        Ok(self.cells[offset])
    }

    /// Overwrite a cell by position
    pub fn set(&mut self, row: usize, col: usize, value: Weight) -> Result<()> {
        let offset = self.offset(row, col)?;
        self.cells[offset] = value;
        Ok(())
    }

    /// Add to a cell by position, failing instead of wrapping on overflow
    pub fn add(&mut self, row: usize, col: usize, delta: Weight) -> Result<()> {
        let offset = self.offset(row, col)?;
        self.cells[offset] = self.cells[offset]
            .checked_add(delta)
            .ok_or(MatrixError::WeightOverflow { row, col })?;
        Ok(())
    }

    /// Read a cell by key pair
    pub fn value(&self, from: &str, to: &str) -> Result<Weight> {
        self.get(self.index_of(from)?, self.index_of(to)?)
    }

    /// Overwrite a cell by key pair
    pub fn set_value(&mut self, from: &str, to: &str, value: Weight) -> Result<()> {
        let (row, col) = (self.index_of(from)?, self.index_of(to)?);
        self.set(row, col, value)
    }

    /// Iterate rows as slices
    pub fn rows(&self) -> impl Iterator<Item = &[Weight]> {
        // chunks(0) panics, and an empty matrix has no rows anyway
        self.cells.chunks(self.size().max(1))
    }

    /// Iterate `(row, col, weight)` over non-zero cells in row-major order
    pub fn non_zero(&self) -> impl Iterator<Item = (usize, usize, Weight)> + '_ {
        let size = self.size();
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &w)| w != 0)
            .map(move |(offset, &w)| (offset / size, offset % size, w))
    }

    /// Mutable access to every cell in row-major order
    pub(crate) fn cells_mut(&mut self) -> &mut [Weight] {
        &mut self.cells
    }

    /// Tab-delimited dump: a header row of keys, then one labelled row per key
    #[must_use]
    pub fn to_tsv(&self) -> String {
        let mut out = String::new();
        for key in self.keys() {
            out.push('\t');
            out.push_str(key);
        }
        out.push('\n');

        for (key, row) in self.keys().iter().zip(self.rows()) {
            out.push_str(key);
            for value in row {
                out.push('\t');
                out.push_str(&value.to_string());
            }
            out.push('\n');
        }
        out
    }
}

/// Serialized form of a matrix: keys plus nested rows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenseMatrix {
    /// Row/column keys
    pub keys: Vec<String>,
    /// `keys.len()` rows of `keys.len()` weights
    pub matrix: Vec<Vec<Weight>>,
}

impl TryFrom<DenseMatrix> for ConnectivityMatrix {
    type Error = MatrixError;

    fn try_from(dense: DenseMatrix) -> Result<Self> {
        Self::from_rows(dense.keys, dense.matrix)
    }
}

impl From<ConnectivityMatrix> for DenseMatrix {
    fn from(matrix: ConnectivityMatrix) -> Self {
        Self {
            matrix: matrix.rows().map(<[Weight]>::to_vec).collect(),
            keys: matrix.keys().to_vec(),
        }
    }
}
