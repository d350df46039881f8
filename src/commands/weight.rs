// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Weight command - sums connectivity matrices

use super::{emit, summarize, OutputOptions};
use crate::aggregate::WeightAggregate;
use crate::report::render_weights;
use crate::store::load_matrices;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

/// Run the weight command
pub fn run(files: &[PathBuf], opts: &OutputOptions) -> Result<()> {
    info!("Summing {} matrix files", files.len());

    let matrices = load_matrices(files)?;
    let agg = WeightAggregate::create(&matrices).context("Aggregation failed")?;

    summarize("Summed", agg.count(), agg.keys().len(), opts);
    emit(&render_weights(&agg, opts.format)?, opts)
}
