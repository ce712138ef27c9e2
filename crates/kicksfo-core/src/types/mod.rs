//! # Core Type Definitions
//!
//! This module contains the core types for KickSFO scoring:
//! - Match events (`MatchEvent`), one row per attempted technique
//! - Technique axes (`Axis`), the composite key every score is filed under
//! - Scores (`Score`), success percentages held as integer tenths
//! - Error types (`KickError`)
//!
//! ## Determinism Guarantees
//!
//! - `Score` is an integer in tenths of a percent; the one-decimal rounding
//!   happens once, at aggregation time
//! - `Axis` implements `Ord` so score maps are `BTreeMap`s with stable order

use crate::primitives::{AXIS_DELIMITER, SCORE_SCALE};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt;
use thiserror::Error;

// =============================================================================
// AXIS
// =============================================================================

/// A technique axis: target region, stance and technique joined with
/// [`AXIS_DELIMITER`], e.g. `얼굴-앞발-빠른발`.
///
/// The axis label is both the score-table key and the radar spoke label.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Axis(pub String);

impl Axis {
    /// Build an axis label from its three components.
    #[must_use]
    pub fn compose(target: &str, foot: &str, technique: &str) -> Self {
        Self(format!(
            "{target}{AXIS_DELIMITER}{foot}{AXIS_DELIMITER}{technique}"
        ))
    }

    /// Get the label as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Axis {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// =============================================================================
// MATCH EVENT
// =============================================================================

/// One attempted technique by one athlete.
///
/// `style`, `signature` and `career` are descriptive labels carried through
/// unchanged for the profile summary; they never take part in scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchEvent {
    pub athlete: String,
    pub target: String,
    pub foot: String,
    pub technique: String,
    /// `true` when the attempt scored.
    pub success: bool,
    pub style: String,
    pub signature: String,
    pub career: String,
}

impl MatchEvent {
    /// The axis this event is scored under.
    #[must_use]
    pub fn axis(&self) -> Axis {
        Axis::compose(&self.target, &self.foot, &self.technique)
    }

    /// The success flag as it appears in the CSV (`0` or `1`).
    #[must_use]
    pub const fn success_flag(&self) -> u8 {
        if self.success { 1 } else { 0 }
    }
}

// =============================================================================
// SCORE
// =============================================================================

/// Success percentage for one athlete on one axis.
///
/// Stored as tenths of a percent (`0..=1000`), so `66.7%` is `Score(667)`.
/// Serializes to JSON as a one-decimal number (`66.7`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Score(u16);

impl Score {
    /// No successful attempts (also the value shown for unrecorded axes).
    pub const ZERO: Self = Self(0);

    /// Every attempt succeeded.
    pub const MAX: Self = Self(SCORE_SCALE);

    /// Mean success rate of `successes` out of `attempts`, rounded to one
    /// decimal place. Exact ties go to the even tenth (`1/16` is `6.2`).
    ///
    /// Returns `None` when there are no attempts or more successes than
    /// attempts.
    #[must_use]
    pub fn from_counts(successes: u32, attempts: u32) -> Option<Self> {
        if attempts == 0 || successes > attempts {
            return None;
        }
        let attempts = u64::from(attempts);
        let numerator = u64::from(successes) * u64::from(SCORE_SCALE);
        let quotient = numerator / attempts;
        let twice_rem = (numerator % attempts) * 2;
        let round_up = twice_rem > attempts || (twice_rem == attempts && quotient % 2 == 1);
        let tenths = if round_up { quotient + 1 } else { quotient };
        u16::try_from(tenths).ok().map(Self)
    }

    /// Build a score from tenths of a percent, clamped to `0..=1000`.
    #[must_use]
    pub fn from_tenths(tenths: u16) -> Self {
        Self(tenths.min(SCORE_SCALE))
    }

    /// Build a score from a percentage, rounding to one decimal.
    ///
    /// Returns `None` outside `0.0..=100.0` (including NaN).
    #[must_use]
    #[allow(clippy::float_arithmetic)]
    pub fn from_percent(percent: f64) -> Option<Self> {
        if !(0.0..=100.0).contains(&percent) {
            return None;
        }
        let tenths = (percent * 10.0).round();
        Some(Self::from_tenths(tenths as u16))
    }

    /// Raw value in tenths of a percent.
    #[must_use]
    pub const fn tenths(self) -> u16 {
        self.0
    }

    /// Value as a percentage with one decimal (`66.7`).
    #[must_use]
    #[allow(clippy::float_arithmetic)]
    pub fn percent(self) -> f64 {
        f64::from(self.0) / 10.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

impl Serialize for Score {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.percent())
    }
}

impl<'de> Deserialize<'de> for Score {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let percent = f64::deserialize(deserializer)?;
        Self::from_percent(percent)
            .ok_or_else(|| de::Error::custom(format!("score {percent} outside 0..=100")))
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in KickSFO.
///
/// - Malformed uploads fail as a whole; no partial processing
/// - An empty athlete selection is not an error
/// - The CORE never panics; every failure is a `KickError`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KickError {
    /// A required CSV column is absent from the header row.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// The success column holds something other than 0 or 1.
    #[error("Row {row}: invalid success flag '{value}' (expected 0 or 1)")]
    InvalidSuccessFlag { row: usize, value: String },

    /// A key column (athlete, target, foot, technique) is empty.
    #[error("Row {row}: empty value in column '{column}'")]
    EmptyField { row: usize, column: String },

    /// A field exceeds the per-field length limit.
    #[error("Row {row}: value in column '{column}' exceeds {max} bytes")]
    FieldTooLong {
        row: usize,
        column: String,
        max: usize,
    },

    /// The upload is larger than allowed.
    #[error("Upload size {size} bytes exceeds maximum allowed {max} bytes")]
    UploadTooLarge { size: usize, max: usize },

    /// The upload holds more events than allowed.
    #[error("Event count exceeds maximum {max}")]
    TooManyEvents { max: usize },

    /// The CSV itself could not be parsed.
    #[error("CSV parse error: {0}")]
    Csv(String),

    /// A selected athlete has no entry in the score table.
    #[error("Unknown athlete: {0}")]
    UnknownAthlete(String),

    /// The axis taxonomy configuration is unusable.
    #[error("Invalid taxonomy: {0}")]
    InvalidTaxonomy(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

impl KickError {
    /// Whether the error was caused by the caller's input (bad upload,
    /// bad selection) rather than the environment.
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        !matches!(self, Self::IoError(_))
    }
}

impl From<csv::Error> for KickError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

// =============================================================================
// TESTS
// =============================================================================
