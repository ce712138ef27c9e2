//! # Dashboard Configuration
//!
//! Optional TOML file read once at startup. Everything has a default, so an
//! absent file (or an empty one) yields the stock dashboard.
//!
//! ```toml
//! title = "Technique Profile"
//! caption = "Scores from match logs"
//!
//! [[taxonomy.region]]
//! name = "face"
//!
//! [[taxonomy.region.stance]]
//! name = "front"
//! techniques = ["quick", "push"]
//! ```
//!
//! Environment variables (read by the server, not stored here):
//! - `KICKSFO_CORS_ORIGINS`: comma-separated origins, or "*"
//! - `KICKSFO_RATE_LIMIT`: requests per second (0 disables)
//! - `KICKSFO_LOG_FORMAT`: "json" for machine-parseable logs

use kicksfo_core::{KickError, Taxonomy, primitives::RADAR_TITLE};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Maximum size of a configuration file (1 MiB).
const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

/// Dashboard text and the axis taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Short brand shown beside the title.
    pub brand: String,
    pub title: String,
    pub caption: String,
    pub chart_title: String,
    pub taxonomy: Taxonomy,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            brand: "KickSFO".to_string(),
            title: "태권도 선수 기술 특성 분석 대시보드".to_string(),
            caption: "경기 데이터 기반 자동 점수 산출 · 선수 비교 방사형 분석".to_string(),
            chart_title: RADAR_TITLE.to_string(),
            taxonomy: Taxonomy::default(),
        }
    }
}

impl DashboardConfig {
    /// Parse a TOML document and validate its taxonomy.
    pub fn from_toml_str(text: &str) -> Result<Self, KickError> {
        let config: Self = toml::from_str(text)
            .map_err(|e| KickError::InvalidTaxonomy(format!("config parse error: {}", e)))?;
        config.taxonomy.validate()?;
        Ok(config)
    }

    /// Load from `path`, or fall back to defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, KickError> {
        let Some(path) = path else {
            tracing::debug!("No config file given, using built-in taxonomy");
            return Ok(Self::default());
        };

        let metadata = std::fs::metadata(path).map_err(|e| {
            KickError::IoError(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(KickError::IoError(format!(
                "Config file size {} bytes exceeds maximum allowed {} bytes",
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            )));
        }

        let text = std::fs::read_to_string(path).map_err(|e| {
            KickError::IoError(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!(
            "Loaded config from {} ({} axes)",
            path.display(),
            config.taxonomy.len()
        );
        Ok(config)
    }
}
