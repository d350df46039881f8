// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Key indexes for matrix rows and columns
//!
//! [`KeyIndex`] hands out stable positions to keys in first-seen order.
//! [`IndexedCountingSet`] composes a `KeyIndex` with an occurrence table so an
//! aggregate can tell how many source matrices mentioned each key.

use crate::error::{MatrixError, Result};
use std::collections::{HashMap, HashSet};

/// Append-only mapping from key to matrix position
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyIndex {
    /// Keys in position order
    keys: Vec<String>,
    /// Map from key to position
    positions: HashMap<String, usize>,
}

impl KeyIndex {
    /// Create an empty index
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from a key list, rejecting repeated keys
    pub fn from_unique<I, S>(keys: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut index = Self::new();
        for key in keys {
            let key = key.into();
            if index.contains(&key) {
                return Err(MatrixError::DuplicateKey { key });
            }
            index.insert(key);
        }
        Ok(index)
    }

    /// Insert a key, returning its position. Known keys keep their position.
    pub fn insert(&mut self, key: impl Into<String>) -> usize {
        let key = key.into();
        if let Some(&pos) = self.positions.get(&key) {
            return pos;
        }
        let pos = self.keys.len();
        self.positions.insert(key.clone(), pos);
        self.keys.push(key);
        pos
    }

    /// Position of a key
    pub fn index_of(&self, key: &str) -> Result<usize> {
        self.position(key)
            .ok_or_else(|| MatrixError::key_not_found(key))
    }

    /// Position of a key, if present
    #[must_use]
    pub fn position(&self, key: &str) -> Option<usize> {
        self.positions.get(key).copied()
    }

    /// Key stored at a position
    #[must_use]
    pub fn key_at(&self, pos: usize) -> Option<&str> {
        self.keys.get(pos).map(String::as_str)
    }

    /// Check whether a key has been inserted
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }

    /// Keys in position order
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Number of keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check if the index is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Insertion-ordered key set that also counts how many additions saw each key
///
/// A key's count goes up by one per [`add_all`](Self::add_all) call that
/// contains it, however many times it is repeated inside that call. Fed one
/// key list per source matrix, the count is the number of matrices holding
/// the key.
#[derive(Debug, Clone, Default)]
pub struct IndexedCountingSet {
    index: KeyIndex,
    counts: HashMap<String, usize>,
}

impl IndexedCountingSet {
    /// Create an empty set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one batch of keys
    pub fn add_all<I, S>(&mut self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen: HashSet<String> = HashSet::new();
        for key in keys {
            let key = key.as_ref();
            if !seen.insert(key.to_string()) {
                continue;
            }
            self.index.insert(key);
            *self.counts.entry(key.to_string()).or_insert(0) += 1;
        }
    }

    /// Position of a key in first-seen order
    pub fn index_of(&self, key: &str) -> Result<usize> {
        self.index.index_of(key)
    }

    /// Number of batches that contained the key, 0 if never seen
    #[must_use]
    pub fn count(&self, key: &str) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Check whether a key has been added
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains(key)
    }

    /// Keys in first-seen order
    #[must_use]
    pub fn keys(&self) -> &[String] {
        self.index.keys()
    }

    /// Borrow the position index
    #[must_use]
    pub fn key_index(&self) -> &KeyIndex {
        &self.index
    }

    /// Number of distinct keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Check if nothing has been added
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Split into the position index and the occurrence table
    #[must_use]
    pub fn into_parts(self) -> (KeyIndex, HashMap<String, usize>) {
        (self.index, self.counts)
    }
}
