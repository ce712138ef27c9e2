//! # Fixed Primitives
//!
//! Hardcoded runtime constants for KickSFO.
//!
//! These are compiled into the binary and are immutable at runtime.

/// Delimiter joining target region, stance and technique into an axis label.
///
/// Changing it changes every axis label, and with it every score-table key.
pub const AXIS_DELIMITER: &str = "-";

/// Tenths of a percent in a perfect score (100.0%).
pub const SCORE_SCALE: u16 = 1000;

/// Radial range shared by every radar trace, in percent.
pub const RADIAL_RANGE: [u8; 2] = [0, 100];

/// Default radar chart title.
pub const RADAR_TITLE: &str = "태권도 선수 기술 특성 비교";

/// Rows shown in the uploaded-data preview.
pub const PREVIEW_ROWS: usize = 5;

// =============================================================================
// CSV SCHEMA
// =============================================================================

pub const COLUMN_ATHLETE: &str = "athlete";
pub const COLUMN_TARGET: &str = "target";
pub const COLUMN_FOOT: &str = "foot";
pub const COLUMN_TECHNIQUE: &str = "technique";
pub const COLUMN_SUCCESS: &str = "success";
pub const COLUMN_STYLE: &str = "style";
pub const COLUMN_SIGNATURE: &str = "signature";
pub const COLUMN_CAREER: &str = "career";

/// Columns every upload must carry. Names are exact and case-sensitive;
/// order in the file does not matter.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    COLUMN_ATHLETE,
    COLUMN_TARGET,
    COLUMN_FOOT,
    COLUMN_TECHNIQUE,
    COLUMN_SUCCESS,
    COLUMN_STYLE,
    COLUMN_SIGNATURE,
    COLUMN_CAREER,
];

// =============================================================================
// INPUT LIMITS
// =============================================================================

/// Maximum length of a single CSV field, in bytes.
pub const MAX_FIELD_LENGTH: usize = 256;

/// Maximum number of events in one upload.
pub const MAX_EVENTS: usize = 100_000;

/// Maximum size of an uploaded CSV file (2 MiB).
pub const MAX_UPLOAD_BYTES: usize = 2 * 1024 * 1024;
