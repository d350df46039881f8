// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Vote command - majority vote across connectivity matrices

use super::{emit, summarize, OutputOptions};
use crate::aggregate::{vote_threshold, VoteAggregate};
use crate::report::render_votes;
use crate::store::load_matrices;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{debug, info};

/// Run the vote command
pub fn run(files: &[PathBuf], opts: &OutputOptions) -> Result<()> {
    info!("Voting across {} matrix files", files.len());

    let matrices = load_matrices(files)?;
    let agg = VoteAggregate::new(&matrices).context("Aggregation failed")?;
    debug!(
        "{} of {} keys pass threshold {}",
        agg.voted_keys().len(),
        agg.keys().len(),
        vote_threshold(agg.count())
    );

    summarize("Voted on", agg.count(), agg.keys().len(), opts);
    emit(&render_votes(&agg, opts.format)?, opts)
}
