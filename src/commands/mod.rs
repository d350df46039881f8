// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Command implementations

pub mod completions;
pub mod config;
pub mod nodes;
pub mod vote;
pub mod weight;

use crate::report::ExportFormat;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Output settings shared by the aggregation commands
#[derive(Debug, Clone)]
pub struct OutputOptions {
    /// Rendering format
    pub format: ExportFormat,
    /// Output file (stdout if not specified)
    pub output: Option<PathBuf>,
    /// Colored summary on stderr
    pub color: bool,
    /// Suppress the summary
    pub quiet: bool,
}

/// Write rendered content to the output file or stdout
fn emit(content: &str, opts: &OutputOptions) -> Result<()> {
    match &opts.output {
        Some(path) => {
            fs::write(path, content)
                .with_context(|| format!("Failed to write to {}", path.display()))?;
            if !opts.quiet {
                eprintln!("Exported to {}", path.display());
            }
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            if !content.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
        }
    }
    Ok(())
}

/// Print a one-line aggregation summary on stderr
fn summarize(label: &str, matrices: usize, keys: usize, opts: &OutputOptions) {
    if opts.quiet {
        return;
    }
    if opts.color {
        eprintln!(
            "{} {} matrices over {} keys",
            label.bold().green(),
            matrices.bold(),
            keys.bold()
        );
    } else {
        eprintln!("{label} {matrices} matrices over {keys} keys");
    }
}
