// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Weight and vote aggregation across connectivity matrices
//!
//! A [`WeightAggregate`] sums any number of matrices whose keys overlap. The
//! union of their keys is computed first so the aggregate is allocated once at
//! its final size; each source is then folded in cell by cell, aligned by key.
//! A [`VoteAggregate`] turns those sums into a majority-vote matrix.

use crate::error::Result;
use crate::index::IndexedCountingSet;
use crate::matrix::{ConnectivityMatrix, Weight};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Cell value for a link that won the majority vote
pub const POSITIVE_VOTE: Weight = 1;
/// Cell value for a link that lost the majority vote
pub const NEGATIVE_VOTE: Weight = 0;

/// Majority threshold for `count` source matrices
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn vote_threshold(count: usize) -> f64 {
    count as f64 / 2.0
}

#[allow(clippy::cast_precision_loss)]
fn meets_threshold(value: Weight, count: usize) -> bool {
    value as f64 >= vote_threshold(count)
}

/// Element-wise sum of several connectivity matrices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightAggregate {
    matrix: ConnectivityMatrix,
    /// Number of source matrices each key appeared in
    node_counts: HashMap<String, usize>,
    /// Number of source matrices merged
    count: usize,
}

impl WeightAggregate {
    /// Sum a list of matrices
    ///
    /// Fails with [`KeyNotFound`](crate::error::MatrixError::KeyNotFound) if a
    /// source key cannot be placed in the union index; no partial aggregate is
    /// returned in that case.
    pub fn create(matrices: &[ConnectivityMatrix]) -> Result<Self> {
        let mut union = IndexedCountingSet::new();
        for matrix in matrices {
            union.add_all(matrix.keys());
        }
        debug!(
            "Aggregating {} matrices over {} keys",
            matrices.len(),
            union.len()
        );

        let (index, node_counts) = union.into_parts();
        let mut aggregate = Self {
            matrix: ConnectivityMatrix::new(index),
            node_counts,
            count: 0,
        };

        for matrix in matrices {
            aggregate.merge_in_connection_values(matrix)?;
        }
        Ok(aggregate)
    }

    /// Fold one source matrix into the running sum
    fn merge_in_connection_values(&mut self, input: &ConnectivityMatrix) -> Result<()> {
        // Resolve each input position once instead of once per cell
        let positions = input
            .keys()
            .iter()
            .map(|key| self.matrix.index_of(key))
            .collect::<Result<Vec<_>>>()?;

        for (row, col, weight) in input.non_zero() {
            trace!("merge {} -> {} += {}", input.keys()[row], input.keys()[col], weight);
            self.matrix.add(positions[row], positions[col], weight)?;
        }
        self.count += 1;
        Ok(())
    }

    /// Number of source matrices containing `key`, 0 if none did
    #[must_use]
    pub fn node_count(&self, key: &str) -> usize {
        self.node_counts.get(key).copied().unwrap_or(0)
    }

    /// Number of source matrices merged
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// The summed matrix
    #[must_use]
    pub fn aggregate(&self) -> &ConnectivityMatrix {
        &self.matrix
    }

    /// Consume the aggregate, keeping only the summed matrix
    #[must_use]
    pub fn into_matrix(self) -> ConnectivityMatrix {
        self.matrix
    }

    /// Union keys in first-seen order
    #[must_use]
    pub fn keys(&self) -> &[String] {
        self.matrix.keys()
    }
}

/// Majority vote over several connectivity matrices
///
/// Every cell is [`POSITIVE_VOTE`] when its summed weight reaches half the
/// number of source matrices (inclusive) and [`NEGATIVE_VOTE`] otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteAggregate {
    weights: WeightAggregate,
}

impl VoteAggregate {
    /// Sum the matrices, then vote on every cell
    pub fn new(matrices: &[ConnectivityMatrix]) -> Result<Self> {
        let mut vote = Self {
            weights: WeightAggregate::create(matrices)?,
        };
        vote.compute_votes();
        Ok(vote)
    }

    fn compute_votes(&mut self) {
        let count = self.weights.count;
        debug!("Voting with threshold {}", vote_threshold(count));
        for cell in self.weights.matrix.cells_mut() {
            *cell = if meets_threshold(*cell, count) {
                POSITIVE_VOTE
            } else {
                NEGATIVE_VOTE
            };
        }
    }

    /// Whether a key appears in at least half of the source matrices
    #[must_use]
    pub fn node_voted(&self, key: &str) -> bool {
        let nodes = self.node_count(key);
        nodes > 0 && meets_threshold(Weight::try_from(nodes).unwrap_or(Weight::MAX), self.count())
    }

    /// Keys that survive the node vote, in index order
    #[must_use]
    pub fn voted_keys(&self) -> Vec<&str> {
        self.keys()
            .iter()
            .map(String::as_str)
            .filter(|key| self.node_voted(key))
            .collect()
    }

    /// Number of source matrices containing `key`
    #[must_use]
    pub fn node_count(&self, key: &str) -> usize {
        self.weights.node_count(key)
    }

    /// Number of source matrices merged
    #[must_use]
    pub fn count(&self) -> usize {
        self.weights.count()
    }

    /// The binary vote matrix
    #[must_use]
    pub fn aggregate(&self) -> &ConnectivityMatrix {
        self.weights.aggregate()
    }

    /// Consume the aggregate, keeping only the vote matrix
    #[must_use]
    pub fn into_matrix(self) -> ConnectivityMatrix {
        self.weights.into_matrix()
    }

    /// Union keys in first-seen order
    #[must_use]
    pub fn keys(&self) -> &[String] {
        self.weights.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MatrixError;
    use crate::matrix::Link;

    fn directed(links: &[(&str, &str)]) -> ConnectivityMatrix {
        let links: Vec<Link> = links.iter().map(|(a, b)| Link::new(*a, *b)).collect();
        ConnectivityMatrix::from_links(None, &links, true).unwrap()
    }

    #[test]
    fn test_sum_aligns_by_key_not_position() {
        let first = directed(&[("a", "b")]);
        let second = ConnectivityMatrix::from_rows(
            vec!["c", "b", "a"],
            vec![vec![0, 0, 0], vec![0, 0, 0], vec![0, 4, 0]],
        )
        .unwrap();

        let agg = WeightAggregate::create(&[first, second]).unwrap();
        let m = agg.aggregate();

        assert_eq!(agg.keys(), &["a", "b", "c"]);
        assert_eq!(m.value("a", "b").unwrap(), 5);
        assert_eq!(m.value("b", "a").unwrap(), 0);
        assert_eq!(agg.count(), 2);
    }

    #[test]
    fn test_weight_overflow_aborts_aggregation() {
        let json = r#"{"keys":["a","b"],"matrix":[[0,9223372036854775807],[0,0]]}"#;
        let first: ConnectivityMatrix = serde_json::from_str(json).unwrap();
        let second = first.clone();

        assert_eq!(
            WeightAggregate::create(&[first.clone(), second.clone()]),
            Err(MatrixError::WeightOverflow { row: 0, col: 1 })
        );
        assert!(VoteAggregate::new(&[first, second]).is_err());
    }

    #[test]
    fn test_node_counts() {
        let agg = WeightAggregate::create(&[
            directed(&[("a", "b")]),
            directed(&[("b", "c")]),
            directed(&[("b", "a")]),
        ])
        .unwrap();

        assert_eq!(agg.node_count("a"), 2);
        assert_eq!(agg.node_count("b"), 3);
        assert_eq!(agg.node_count("c"), 1);
        assert_eq!(agg.node_count("zzz"), 0);
    }

    #[test]
    fn test_empty_input() {
        let agg = WeightAggregate::create(&[]).unwrap();
        assert_eq!(agg.count(), 0);
        assert_eq!(agg.aggregate().size(), 0);

        let vote = VoteAggregate::new(&[]).unwrap();
        assert_eq!(vote.count(), 0);
        assert!(vote.aggregate().is_empty());
    }

    #[test]
    fn test_vote_threshold_is_inclusive() {
        // Four maps: a->b in two of them (sum 2, threshold 2.0), b->c in one
        let maps = [
            directed(&[("a", "b"), ("b", "c")]),
            directed(&[("a", "b")]),
            directed(&[("c", "a")]),
            directed(&[("c", "a")]),
        ];
        let vote = VoteAggregate::new(&maps).unwrap();
        let m = vote.aggregate();

        assert_eq!(m.value("a", "b").unwrap(), POSITIVE_VOTE);
        assert_eq!(m.value("c", "a").unwrap(), POSITIVE_VOTE);
        assert_eq!(m.value("b", "c").unwrap(), NEGATIVE_VOTE);
        assert_eq!(m.value("a", "a").unwrap(), NEGATIVE_VOTE);
    }

    #[test]
    fn test_node_vote() {
        let maps = [
            directed(&[("a", "b")]),
            directed(&[("a", "c")]),
            directed(&[("a", "d")]),
        ];
        let vote = VoteAggregate::new(&maps).unwrap();

        // threshold 1.5: only "a" is in two or more maps
        assert!(vote.node_voted("a"));
        assert!(!vote.node_voted("b"));
        assert!(!vote.node_voted("missing"));
        assert_eq!(vote.voted_keys(), vec!["a"]);
    }

    #[test]
    fn test_single_matrix_vote_keeps_links() {
        let vote = VoteAggregate::new(&[directed(&[("x", "y")])]).unwrap();
        assert_eq!(vote.aggregate().value("x", "y").unwrap(), 1);
        assert_eq!(vote.aggregate().value("y", "x").unwrap(), 0);
    }
}
