// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Error types for matrix construction and aggregation

use thiserror::Error;

/// Errors raised by key indexes, connectivity matrices and aggregates.
///
/// All of these abort the operation that raised them; an aggregation never
/// hands back a partially merged matrix.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MatrixError {
    /// A key was looked up that the index never received.
    ///
    /// During aggregation this means the union index was built from a
    /// different set of matrices than the ones being merged.
    #[error("key not found in index: {key}")]
    KeyNotFound {
        /// The missing key
        key: String,
    },

    /// Positional cell access outside the matrix.
    #[error("cell ({row}, {col}) is out of range for a {size}x{size} matrix")]
    IndexOutOfRange {
        /// Requested row
        row: usize,
        /// Requested column
        col: usize,
        /// Matrix dimension
        size: usize,
    },

    /// A matrix key list named the same key twice.
    #[error("duplicate key in matrix: {key}")]
    DuplicateKey {
        /// The repeated key
        key: String,
    },

    /// Summing weights into a cell went past the range of [`Weight`](crate::matrix::Weight).
    #[error("weight overflow in cell ({row}, {col})")]
    WeightOverflow {
        /// Row of the overflowing cell
        row: usize,
        /// Column of the overflowing cell
        col: usize,
    },

    /// Cell data does not match the key count.
    #[error("matrix dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimension implied by the key list
        expected: usize,
        /// Length actually found (row count or row width)
        actual: usize,
    },
}

impl MatrixError {
    /// Shorthand for [`MatrixError::KeyNotFound`]
    pub(crate) fn key_not_found(key: &str) -> Self {
        Self::KeyNotFound { key: key.to_string() }
    }
}

/// Result alias for matrix operations
pub type Result<T> = std::result::Result<T, MatrixError>;
