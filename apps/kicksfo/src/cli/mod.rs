//! # KickSFO CLI Module
//!
//! This module implements the CLI interface for KickSFO.
//!
//! ## Available Commands
//!
//! - `server` - Start the dashboard server
//! - `axes` - List the taxonomy axes in chart order
//! - `score` - Print the score table of a CSV file (or the sample)
//! - `radar` - Build radar traces, optionally writing the chart as SVG
//! - `profiles` - Print the deduplicated athlete profiles

mod commands;

use clap::{Parser, Subcommand};
use kicksfo::config::DashboardConfig;
use kicksfo_core::KickError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// KickSFO - Taekwondo Technique Analytics
///
/// Scores match logs per athlete and technique axis and compares athletes
/// on a radar chart.
#[derive(Parser, Debug)]
#[command(name = "kicksfo")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a TOML configuration file (titles, custom taxonomy)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the dashboard server
    Server {
        /// Host to bind to
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "8501")]
        port: u16,

        /// CSV file to load at startup instead of the sample data
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// List the taxonomy axes in chart order
    Axes,

    /// Print the score table
    Score {
        /// CSV match log (defaults to the bundled sample)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Build radar traces for the selected athletes
    Radar {
        /// CSV match log (defaults to the bundled sample)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Athlete to include (repeatable; all athletes when omitted)
        #[arg(short, long = "athlete")]
        athletes: Vec<String>,

        /// Write the chart as SVG to this path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the deduplicated athlete profiles
    Profiles {
        /// CSV match log (defaults to the bundled sample)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), KickError> {
    let config = DashboardConfig::load(cli.config.as_deref())?;
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Server { host, port, file }) => {
            cmd_server(config, &host, port, file.as_deref()).await
        }
        Some(Commands::Axes) => cmd_axes(&config, json_mode),
        Some(Commands::Score { file }) => cmd_score(&config, file.as_deref(), json_mode),
        Some(Commands::Radar {
            file,
            athletes,
            output,
        }) => cmd_radar(
            &config,
            file.as_deref(),
            &athletes,
            output.as_deref(),
            json_mode,
        ),
        Some(Commands::Profiles { file }) => cmd_profiles(&config, file.as_deref(), json_mode),
        None => {
            // No subcommand - score the sample by default
            cmd_score(&config, None, json_mode)
        }
    }
}
