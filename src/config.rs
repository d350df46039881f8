// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Configuration management
//!
//! Settings are layered: built-in defaults, then a TOML file, then
//! `MAPCOMPARE_*` environment variables.

use crate::report::ExportFormat;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "MAPCOMPARE";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Output format used when `--format` is not given
    pub default_format: ExportFormat,
    /// Colored terminal summaries
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            default_format: ExportFormat::Tsv,
            color: true,
        }
    }
}

/// Default location of the configuration file
#[must_use]
pub fn default_path() -> PathBuf {
    directories::ProjectDirs::from("org", "hyperpolymath", "mapcompare")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from(".mapcompare.toml"))
}

/// Load configuration, reading `path` (or the default path) if it exists
pub fn load(path: Option<&Path>) -> Result<Config> {
    let path = path.map_or_else(default_path, Path::to_path_buf);
    let defaults = Config::default();

    let settings = config::Config::builder()
        .set_default("log_level", defaults.log_level)?
        .set_default("default_format", "tsv")?
        .set_default("color", defaults.color)?
        .add_source(config::File::from(path.as_path()).required(false))
        .add_source(config::Environment::with_prefix(ENV_PREFIX))
        .build()
        .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

    let config: Config = settings
        .try_deserialize()
        .context("Invalid configuration")?;
    config.level()?;
    Ok(config)
}

impl Config {
    /// The configured log level
    pub fn level(&self) -> Result<tracing::Level> {
        self.log_level
            .parse()
            .with_context(|| format!("Invalid log_level: {}", self.log_level))
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}
