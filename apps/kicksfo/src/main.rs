//! # KickSFO - Taekwondo Technique Analytics
//!
//! The main binary for the KickSFO dashboard.
//!
//! This application provides:
//! - HTTP dashboard server (axum-based) with radar chart and tables
//! - CLI interface for scoring CSV files offline
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                 apps/kicksfo (THE BINARY)               │
//! │                                                         │
//! │  ┌─────────────┐    ┌──────────────┐    ┌───────────┐  │
//! │  │   CLI       │    │  Dashboard   │    │  Render   │  │
//! │  │  (clap)     │    │   (axum)     │    │ (HTML/SVG)│  │
//! │  └──────┬──────┘    └──────┬───────┘    └─────┬─────┘  │
//! │         └──────────────────┼──────────────────┘        │
//! │                            ▼                           │
//! │                    ┌───────────────┐                   │
//! │                    │ kicksfo-core  │                   │
//! │                    │  (THE LOGIC)  │                   │
//! │                    └───────────────┘                   │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the dashboard
//! kicksfo server --host 0.0.0.0 --port 8501
//!
//! # CLI operations
//! kicksfo axes
//! kicksfo score -f matches.csv
//! kicksfo radar -f matches.csv -a 김선수 -a 이선수 -o radar.svg
//! ```

mod cli;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    init_tracing(cli.verbose);

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing. `KICKSFO_LOG_FORMAT=json` enables machine-parseable
/// output; `RUST_LOG` overrides the default filter.
fn init_tracing(verbose: bool) {
    let log_format = std::env::var("KICKSFO_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if verbose {
        "kicksfo=debug,kicksfo_core=debug,tower_http=debug"
    } else {
        "kicksfo=info,tower_http=debug"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// Print the KickSFO startup banner.
fn print_banner() {
    println!(
        r#"
  🥋 KickSFO v{}

  태권도 선수 기술 특성 분석 · Technique Radar
"#,
        env!("CARGO_PKG_VERSION")
    );
}
