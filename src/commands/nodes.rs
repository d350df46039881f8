// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Nodes command - how many maps mention each key

use crate::aggregate::VoteAggregate;
use crate::report::node_table;
use crate::store::load_matrices;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;

/// Run the nodes command
pub fn run(files: &[PathBuf]) -> Result<()> {
    let matrices = load_matrices(files)?;
    let agg = VoteAggregate::new(&matrices).context("Aggregation failed")?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(node_table(&agg).as_bytes())?;
    Ok(())
}
