// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Config command - show the effective configuration

use crate::config::Config;
use anyhow::Result;

/// Print the effective configuration as TOML
pub fn run(config: &Config) -> Result<()> {
    tracing::debug!("Showing configuration");
    print!("{}", config.to_toml()?);
    Ok(())
}
