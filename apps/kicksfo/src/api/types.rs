//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API and the
//! athlete-selection query shared by the page and the API.

use kicksfo_core::{Analysis, DataSource, ProfileRow, RadarChart, Score, ScoreTable, Taxonomy};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// =============================================================================
// SELECTION
// =============================================================================

/// Athletes chosen through the query string.
///
/// The multi-select submits one `athlete=` pair per chosen name plus a
/// `submitted=1` marker, so "nothing chosen" can be told apart from "no
/// form submitted yet". The latter selects everyone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub athletes: Vec<String>,
    pub explicit: bool,
}

impl Selection {
    /// Read a selection from raw query pairs, keeping the given order.
    /// A repeated name is kept once, at its first position.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let mut seen = BTreeSet::new();
        let athletes: Vec<String> = pairs
            .iter()
            .filter(|(key, _)| key == "athlete")
            .map(|(_, value)| value.clone())
            .filter(|value| seen.insert(value.clone()))
            .collect();
        let explicit = !athletes.is_empty() || pairs.iter().any(|(key, _)| key == "submitted");
        Self { athletes, explicit }
    }

    /// The athletes to show: the explicit choice, or everyone by default.
    pub fn resolve(&self, analysis: &Analysis) -> Vec<String> {
        if self.explicit {
            self.athletes.clone()
        } else {
            analysis.athletes()
        }
    }
}

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// AXES RESPONSE
// =============================================================================

/// Taxonomy axes in chart order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AxesResponse {
    pub count: usize,
    pub axes: Vec<String>,
}

impl AxesResponse {
    pub fn from_taxonomy(taxonomy: &Taxonomy) -> Self {
        let axes: Vec<String> = taxonomy.axes().into_iter().map(|a| a.0).collect();
        Self {
            count: axes.len(),
            axes,
        }
    }
}

// =============================================================================
// SCORES RESPONSE
// =============================================================================

/// Score table as athlete → axis → percentage.
///
/// Only recorded axes appear; an absent axis means no attempts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoresResponse {
    pub success: bool,
    pub source: Option<DataSource>,
    #[serde(default)]
    pub scores: BTreeMap<String, BTreeMap<String, Score>>,
    #[serde(default)]
    pub unrecognized_axes: Vec<String>,
    pub error: Option<String>,
}

impl ScoresResponse {
    pub fn from_analysis(analysis: &Analysis) -> Self {
        Self {
            success: true,
            source: Some(analysis.source().clone()),
            scores: score_map(analysis.scores()),
            unrecognized_axes: analysis.unrecognized().iter().map(|a| a.0.clone()).collect(),
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            source: None,
            scores: BTreeMap::new(),
            unrecognized_axes: Vec::new(),
            error: Some(msg.into()),
        }
    }
}

fn score_map(table: &ScoreTable) -> BTreeMap<String, BTreeMap<String, Score>> {
    table
        .iter()
        .map(|(athlete, cells)| {
            let axes = cells
                .iter()
                .map(|(axis, cell)| (axis.0.clone(), cell.score))
                .collect();
            (athlete.to_string(), axes)
        })
        .collect()
}

// =============================================================================
// PROFILES RESPONSE
// =============================================================================

/// Deduplicated athlete profiles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilesResponse {
    pub profiles: Vec<ProfileRow>,
}

// =============================================================================
// RADAR RESPONSE
// =============================================================================

/// Radar traces for the requested selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadarResponse {
    pub success: bool,
    pub chart: Option<RadarChart>,
    pub error: Option<String>,
}

impl RadarResponse {
    pub fn success(chart: RadarChart) -> Self {
        Self {
            success: true,
            chart: Some(chart),
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            chart: None,
            error: Some(msg.into()),
        }
    }
}
