//! # kicksfo-core
//!
//! The scoring engine for KickSFO - THE LOGIC.
//!
//! This crate turns a flat table of taekwondo match events (one row per
//! attempted technique per athlete) into per-athlete success rates on a
//! fixed set of technique axes, and lays those rates out as closed radar
//! traces for charting.
//!
//! ## Pipeline
//!
//! ```text
//! CSV bytes ──► Ingestor ──► [MatchEvent] ──► score() ──► ScoreTable
//!                                                            │
//!                          Taxonomy (axis order) ────────────┤
//!                                                            ▼
//!                                         RadarChart / ScoreRow / ProfileRow
//! ```
//!
//! ## Architectural Constraints
//!
//! - Has NO async, NO network dependencies (pure Rust)
//! - Every derived artifact is recomputed from scratch; nothing is cached
//! - Scores are integer tenths of a percent, so aggregation is exact
//! - Axis order comes from the taxonomy and nowhere else

// =============================================================================
// MODULES
// =============================================================================

pub mod analysis;
pub mod ingestor;
pub mod primitives;
pub mod radar;
pub mod report;
pub mod sample;
pub mod scorer;
pub mod taxonomy;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Axis, KickError, MatchEvent, Score};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use analysis::{Analysis, DataSource};
pub use ingestor::Ingestor;
pub use radar::{Fill, RadarChart, RadarTrace, radar};
pub use report::{ProfileRow, ScoreRow, preview, profile_summary, score_rows};
pub use sample::sample_events;
pub use scorer::{ScoreCell, ScoreTable, score};
pub use taxonomy::{Stance, TargetRegion, Taxonomy};
