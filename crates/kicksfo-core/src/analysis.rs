//! # Analysis Snapshot
//!
//! One loaded dataset and everything derived from it.
//!
//! An `Analysis` is rebuilt from scratch whenever the input changes (a new
//! upload, or falling back to the sample). There is no incremental update:
//! the score table is a pure function of the events and the taxonomy.

use crate::ingestor::Ingestor;
use crate::primitives::PREVIEW_ROWS;
use crate::radar::{RadarChart, radar};
use crate::report::{ProfileRow, ScoreRow, preview, profile_summary, score_rows};
use crate::sample::sample_events;
use crate::scorer::{ScoreTable, score};
use crate::taxonomy::Taxonomy;
use crate::{Axis, KickError, MatchEvent};
use serde::{Deserialize, Serialize};

/// Where the current events came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataSource {
    /// The bundled sample data.
    Sample,
    /// A user-supplied CSV file.
    Upload { name: String },
}

/// Events plus their derived score table.
#[derive(Debug, Clone)]
pub struct Analysis {
    source: DataSource,
    events: Vec<MatchEvent>,
    scores: ScoreTable,
    unrecognized: Vec<Axis>,
}

impl Analysis {
    /// Score `events` against `taxonomy`.
    #[must_use]
    pub fn new(source: DataSource, events: Vec<MatchEvent>, taxonomy: &Taxonomy) -> Self {
        let scores = score(&events);
        let unrecognized = taxonomy.unrecognized(&scores);
        Self {
            source,
            events,
            scores,
            unrecognized,
        }
    }

    /// Analysis of the bundled sample data.
    #[must_use]
    pub fn sample(taxonomy: &Taxonomy) -> Self {
        Self::new(DataSource::Sample, sample_events(), taxonomy)
    }

    /// Parse and score an uploaded CSV. Fails as a whole on any bad row.
    pub fn from_csv(
        name: impl Into<String>,
        bytes: &[u8],
        taxonomy: &Taxonomy,
    ) -> Result<Self, KickError> {
        let events = Ingestor::from_bytes(bytes)?;
        Ok(Self::new(
            DataSource::Upload { name: name.into() },
            events,
            taxonomy,
        ))
    }

    #[must_use]
    pub fn source(&self) -> &DataSource {
        &self.source
    }

    #[must_use]
    pub fn is_sample(&self) -> bool {
        self.source == DataSource::Sample
    }

    #[must_use]
    pub fn events(&self) -> &[MatchEvent] {
        &self.events
    }

    #[must_use]
    pub fn scores(&self) -> &ScoreTable {
        &self.scores
    }

    /// Scored axes the taxonomy does not know; absent from chart and table.
    #[must_use]
    pub fn unrecognized(&self) -> &[Axis] {
        &self.unrecognized
    }

    /// Athletes discovered in the data, sorted. The default selection.
    #[must_use]
    pub fn athletes(&self) -> Vec<String> {
        self.scores.athletes().map(str::to_string).collect()
    }

    /// First rows of the loaded events.
    #[must_use]
    pub fn preview(&self) -> &[MatchEvent] {
        preview(&self.events, PREVIEW_ROWS)
    }

    #[must_use]
    pub fn profiles(&self) -> Vec<ProfileRow> {
        profile_summary(&self.events)
    }

    pub fn radar<S: AsRef<str>>(
        &self,
        taxonomy: &Taxonomy,
        selected: &[S],
    ) -> Result<RadarChart, KickError> {
        radar(&self.scores, taxonomy, selected)
    }

    pub fn score_rows<S: AsRef<str>>(
        &self,
        taxonomy: &Taxonomy,
        selected: &[S],
    ) -> Result<Vec<ScoreRow>, KickError> {
        score_rows(&self.scores, taxonomy, selected)
    }
}
