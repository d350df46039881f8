// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Mapcompare CLI - aggregate concept map connectivity matrices

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use mapcompare::commands::{self, OutputOptions};
use mapcompare::report::ExportFormat;
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mapcompare")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Configuration file path
    #[arg(short, long, env = "MAPCOMPARE_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR", global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sum connectivity matrices cell by cell, aligned by key
    Weight {
        /// Matrix documents (JSON)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format (tsv, json, dot)
        #[arg(short, long)]
        format: Option<String>,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Majority vote across connectivity matrices
    Vote {
        /// Matrix documents (JSON)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format (tsv, json, dot)
        #[arg(short, long)]
        format: Option<String>,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List every key with the number of maps containing it
    Nodes {
        /// Matrix documents (JSON)
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Show the effective configuration
    Config,

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: clap_complete::Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = mapcompare::config::load(cli.config.as_deref())?;

    // Initialize logging
    let log_level = match cli.verbose {
        0 if cli.quiet => tracing::Level::ERROR,
        0 => config.level()?,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    // RUST_LOG takes precedence over the flags and config
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(log_level).into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let output_options = |format: Option<String>, output: Option<PathBuf>| -> Result<OutputOptions> {
        let format = match format {
            Some(f) => f.parse::<ExportFormat>()?,
            None => config.default_format,
        };
        Ok(OutputOptions {
            format,
            output,
            color: config.color && !cli.no_color,
            quiet: cli.quiet,
        })
    };

    // Execute command
    match cli.command {
        Commands::Weight { ref files, ref format, ref output } => {
            commands::weight::run(files, &output_options(format.clone(), output.clone())?)
        }
        Commands::Vote { ref files, ref format, ref output } => {
            commands::vote::run(files, &output_options(format.clone(), output.clone())?)
        }
        Commands::Nodes { ref files } => commands::nodes::run(files),
        Commands::Config => commands::config::run(&config),
        Commands::Completions { shell } => commands::completions::run(shell, &mut Cli::command()),
    }
}
