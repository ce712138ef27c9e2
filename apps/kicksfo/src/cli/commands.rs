//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.
//! Every command works on a fresh in-memory analysis; the only thing ever
//! written to disk is an explicit `--output` chart.

use kicksfo::api::{self, AppState, AxesResponse, ProfilesResponse, ScoresResponse};
use kicksfo::config::DashboardConfig;
use kicksfo::render;
use kicksfo_core::{Analysis, KickError, primitives::MAX_UPLOAD_BYTES};
use std::path::{Path, PathBuf};

// =============================================================================
// FILE VALIDATION
// =============================================================================

/// Validate an input path: it must resolve to an existing regular file.
///
/// Canonicalizing resolves `..` and symlinks before the file is opened.
fn validate_file_path(path: &Path) -> Result<PathBuf, KickError> {
    let canonical = path.canonicalize().map_err(|e| {
        KickError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(KickError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Reject files over the upload limit before reading them.
fn validate_file_size(path: &Path) -> Result<(), KickError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| KickError::IoError(format!("Cannot read file metadata: {}", e)))?;

    let size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
    if size > MAX_UPLOAD_BYTES {
        return Err(KickError::UploadTooLarge {
            size,
            max: MAX_UPLOAD_BYTES,
        });
    }
    Ok(())
}

/// Validate an output path: its parent directory must exist.
fn validate_output_path(path: &Path) -> Result<PathBuf, KickError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let canonical_parent = parent.canonicalize().map_err(|e| {
        KickError::IoError(format!(
            "Invalid output directory '{}': {}",
            parent.display(),
            e
        ))
    })?;

    if !canonical_parent.is_dir() {
        return Err(KickError::IoError(format!(
            "Output directory '{}' is not a valid directory",
            parent.display()
        )));
    }

    let filename = path
        .file_name()
        .ok_or_else(|| KickError::IoError("Output path has no filename".to_string()))?;

    Ok(canonical_parent.join(filename))
}

/// Score `file`, or the bundled sample when no file is given.
pub fn load_analysis(config: &DashboardConfig, file: Option<&Path>) -> Result<Analysis, KickError> {
    let Some(file) = file else {
        tracing::debug!("No input file, using sample data");
        return Ok(Analysis::sample(&config.taxonomy));
    };

    let path = validate_file_path(file)?;
    validate_file_size(&path)?;
    let bytes = std::fs::read(&path)
        .map_err(|e| KickError::IoError(format!("Cannot read '{}': {}", path.display(), e)))?;

    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());
    let analysis = Analysis::from_csv(name, &bytes, &config.taxonomy)?;

    tracing::info!(
        "Loaded {} events for {} athletes from {}",
        analysis.events().len(),
        analysis.scores().len(),
        path.display()
    );
    if !analysis.unrecognized().is_empty() {
        tracing::warn!(
            "{} axes are outside the taxonomy and will not be charted",
            analysis.unrecognized().len()
        );
    }
    Ok(analysis)
}

fn print_json<T: serde::Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_default()
    );
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the dashboard server.
pub async fn cmd_server(
    config: DashboardConfig,
    host: &str,
    port: u16,
    file: Option<&Path>,
) -> Result<(), KickError> {
    let analysis = load_analysis(&config, file)?;

    println!("KickSFO Dashboard Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:     {}", host);
    println!("  Port:     {}", port);
    println!("  Axes:     {}", config.taxonomy.len());
    match file {
        Some(f) => println!("  Data:     {}", f.display()),
        None => println!("  Data:     sample"),
    }
    println!();
    println!("Endpoints:");
    println!("  GET  /              - Dashboard");
    println!("  POST /upload        - Upload a CSV match log");
    println!("  POST /reset         - Back to sample data");
    println!("  GET  /chart.svg     - Radar chart");
    println!("  GET  /api/scores    - Score table (JSON)");
    println!("  GET  /api/radar     - Radar traces (JSON)");
    println!("  GET  /api/health    - Health check");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let addr = format!("{}:{}", host, port);
    api::run_server(&addr, AppState::with_analysis(config, analysis)).await
}

// =============================================================================
// AXES COMMAND
// =============================================================================

/// List the taxonomy axes in chart order.
pub fn cmd_axes(config: &DashboardConfig, json_mode: bool) -> Result<(), KickError> {
    let response = AxesResponse::from_taxonomy(&config.taxonomy);

    if json_mode {
        print_json(&response);
        return Ok(());
    }

    println!("Technique Axes ({})", response.count);
    println!("==================");
    for (i, axis) in response.axes.iter().enumerate() {
        println!("{:>3}. {}", i + 1, axis);
    }
    Ok(())
}

// =============================================================================
// SCORE COMMAND
// =============================================================================

/// Print the score table, one line per athlete and recorded axis.
pub fn cmd_score(
    config: &DashboardConfig,
    file: Option<&Path>,
    json_mode: bool,
) -> Result<(), KickError> {
    let analysis = load_analysis(config, file)?;

    if json_mode {
        print_json(&ScoresResponse::from_analysis(&analysis));
        return Ok(());
    }

    println!("KickSFO Score Table");
    println!("===================");
    for (athlete, cells) in analysis.scores().iter() {
        println!("{}", athlete);
        for (axis, cell) in cells {
            let marker = if config.taxonomy.contains(axis) {
                ""
            } else {
                "  (not in taxonomy)"
            };
            println!(
                "  {:<20} {:>5}%  ({}/{}){}",
                axis.as_str(),
                cell.score.to_string(),
                cell.successes,
                cell.attempts,
                marker
            );
        }
    }
    Ok(())
}

// =============================================================================
// RADAR COMMAND
// =============================================================================

/// Build radar traces; write them as SVG when `output` is given.
pub fn cmd_radar(
    config: &DashboardConfig,
    file: Option<&Path>,
    athletes: &[String],
    output: Option<&Path>,
    json_mode: bool,
) -> Result<(), KickError> {
    let analysis = load_analysis(config, file)?;
    let selected = if athletes.is_empty() {
        analysis.athletes()
    } else {
        athletes.to_vec()
    };

    let chart = analysis
        .radar(&config.taxonomy, &selected)?
        .with_title(config.chart_title.clone());

    if let Some(output) = output {
        let path = validate_output_path(output)?;
        std::fs::write(&path, render::radar_svg(&chart))
            .map_err(|e| KickError::IoError(format!("Cannot write '{}': {}", path.display(), e)))?;
        tracing::info!("Radar chart written to {}", path.display());
    }

    if json_mode {
        print_json(&chart);
        return Ok(());
    }

    println!("{}", chart.title);
    println!("{}", "=".repeat(chart.title.chars().count()));
    for trace in &chart.traces {
        println!("{}", trace.name);
        for (axis, score) in trace.spokes() {
            println!("  {:<20} {:>5}", axis.as_str(), score.to_string());
        }
    }
    if let Some(output) = output {
        println!();
        println!("SVG: {}", output.display());
    }
    Ok(())
}

// =============================================================================
// PROFILES COMMAND
// =============================================================================

/// Print the deduplicated athlete profiles.
pub fn cmd_profiles(
    config: &DashboardConfig,
    file: Option<&Path>,
    json_mode: bool,
) -> Result<(), KickError> {
    let analysis = load_analysis(config, file)?;
    let profiles = analysis.profiles();

    if json_mode {
        print_json(&ProfilesResponse { profiles });
        return Ok(());
    }

    println!("Athlete Profiles");
    println!("================");
    for row in &profiles {
        println!(
            "{} | {} | {} | {}",
            row.athlete, row.style, row.signature, row.career
        );
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
