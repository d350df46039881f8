// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Mapcompare library - aggregate the connectivity of many concept maps
//!
//! Concept maps that share node labels are compared by turning each one into
//! a [`ConnectivityMatrix`](matrix::ConnectivityMatrix), then summing them
//! into a [`WeightAggregate`](aggregate::WeightAggregate) or reducing them to
//! a majority [`VoteAggregate`](aggregate::VoteAggregate).
//!
//! ```
//! use mapcompare::prelude::*;
//!
//! let a = ConnectivityMatrix::from_links(None, &[Link::new("sun", "rain")], true)?;
//! let b = ConnectivityMatrix::from_links(None, &[Link::new("sun", "rain")], true)?;
//! let sum = WeightAggregate::create(&[a, b])?;
//! assert_eq!(sum.aggregate().value("sun", "rain")?, 2);
//! # Ok::<(), mapcompare::error::MatrixError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregate;
pub mod commands;
pub mod config;
pub mod error;
pub mod graph;
pub mod index;
pub mod matrix;
pub mod report;
pub mod store;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::aggregate::{VoteAggregate, WeightAggregate, NEGATIVE_VOTE, POSITIVE_VOTE};
    pub use crate::error::MatrixError;
    pub use crate::graph::MatrixGraph;
    pub use crate::index::{IndexedCountingSet, KeyIndex};
    pub use crate::matrix::{ConnectivityMatrix, Link, Weight};
}
