//! # Scorer
//!
//! Groups match events by (athlete, target, foot, technique) and reduces
//! each group to a success percentage.
//!
//! - Pure function of its input: no state, no side effects
//! - An axis with no events for an athlete is absent, never stored as 0
//! - Axes outside any taxonomy are scored like any other; filtering is the
//!   caller's concern (see [`crate::Taxonomy::unrecognized`])
//! - Groups are keyed by the joined axis label, the same key the taxonomy,
//!   table and chart use. Rows whose labels coincide through an embedded
//!   delimiter (`a-b`,`c` and `a`,`b-c`) share one tally

use crate::{Axis, MatchEvent, Score};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tally and score for one (athlete, axis) group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCell {
    pub attempts: u32,
    pub successes: u32,
    pub score: Score,
}

/// Per-athlete, per-axis scores.
///
/// Athletes and axes are both kept in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTable {
    athletes: BTreeMap<String, BTreeMap<Axis, ScoreCell>>,
}

impl ScoreTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Distinct athlete names, sorted.
    pub fn athletes(&self) -> impl Iterator<Item = &str> {
        self.athletes.keys().map(String::as_str)
    }

    #[must_use]
    pub fn contains_athlete(&self, athlete: &str) -> bool {
        self.athletes.contains_key(athlete)
    }

    /// All recorded axes for one athlete.
    #[must_use]
    pub fn axes_for(&self, athlete: &str) -> Option<&BTreeMap<Axis, ScoreCell>> {
        self.athletes.get(athlete)
    }

    /// The recorded cell, if the athlete attempted this axis at all.
    #[must_use]
    pub fn cell(&self, athlete: &str, axis: &Axis) -> Option<&ScoreCell> {
        self.athletes.get(athlete)?.get(axis)
    }

    /// Score for display: unrecorded axes (and unknown athletes) read as 0.
    #[must_use]
    pub fn value(&self, athlete: &str, axis: &Axis) -> Score {
        self.cell(athlete, axis)
            .map_or(Score::ZERO, |cell| cell.score)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeMap<Axis, ScoreCell>)> {
        self.athletes.iter().map(|(name, cells)| (name.as_str(), cells))
    }

    /// Number of athletes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.athletes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.athletes.is_empty()
    }
}

/// Score a sequence of match events.
///
/// For each (athlete, axis) group: `round(mean(success) * 100, 1)`.
#[must_use]
pub fn score(events: &[MatchEvent]) -> ScoreTable {
    let mut tallies: BTreeMap<String, BTreeMap<Axis, (u32, u32)>> = BTreeMap::new();

    for event in events {
        let (attempts, successes) = tallies
            .entry(event.athlete.clone())
            .or_default()
            .entry(event.axis())
            .or_default();
        *attempts = attempts.saturating_add(1);
        if event.success {
            *successes = successes.saturating_add(1);
        }
    }

    let athletes = tallies
        .into_iter()
        .map(|(athlete, axes)| {
            let cells = axes
                .into_iter()
                .filter_map(|(axis, (attempts, successes))| {
                    Score::from_counts(successes, attempts).map(|score| {
                        (
                            axis,
                            ScoreCell {
                                attempts,
                                successes,
                                score,
                            },
                        )
                    })
                })
                .collect();
            (athlete, cells)
        })
        .collect();

    ScoreTable { athletes }
}

// =============================================================================
// TESTS
// =============================================================================
