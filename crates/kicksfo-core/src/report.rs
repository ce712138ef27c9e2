//! # Summary Tables
//!
//! Tabular views shown next to the radar chart: the data preview, the
//! athlete profile summary and the per-athlete score table.

use crate::scorer::ScoreTable;
use crate::taxonomy::Taxonomy;
use crate::{KickError, MatchEvent, Score};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Descriptive labels for one athlete.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProfileRow {
    pub athlete: String,
    pub style: String,
    pub signature: String,
    pub career: String,
}

impl From<&MatchEvent> for ProfileRow {
    fn from(event: &MatchEvent) -> Self {
        Self {
            athlete: event.athlete.clone(),
            style: event.style.clone(),
            signature: event.signature.clone(),
            career: event.career.clone(),
        }
    }
}

/// One row of the score table: an athlete and a score per taxonomy axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRow {
    pub athlete: String,
    /// Aligned with `Taxonomy::axes()`; unrecorded axes are 0.
    pub scores: Vec<Score>,
}

/// The first `rows` events, in file order.
#[must_use]
pub fn preview(events: &[MatchEvent], rows: usize) -> &[MatchEvent] {
    &events[..rows.min(events.len())]
}

/// Distinct (athlete, style, signature, career) rows in first-seen order.
///
/// An athlete whose descriptive labels differ between rows appears once per
/// distinct combination.
#[must_use]
pub fn profile_summary(events: &[MatchEvent]) -> Vec<ProfileRow> {
    let mut seen = BTreeSet::new();
    events
        .iter()
        .map(ProfileRow::from)
        .filter(|row| seen.insert(row.clone()))
        .collect()
}

/// Score rows for the selected athletes, one column per taxonomy axis.
///
/// # Errors
///
/// `KickError::UnknownAthlete` if a selected name is not in the table.
pub fn score_rows<S: AsRef<str>>(
    table: &ScoreTable,
    taxonomy: &Taxonomy,
    selected: &[S],
) -> Result<Vec<ScoreRow>, KickError> {
    let axes = taxonomy.axes();
    selected
        .iter()
        .map(|name| {
            let name = name.as_ref();
            if !table.contains_athlete(name) {
                return Err(KickError::UnknownAthlete(name.to_string()));
            }
            Ok(ScoreRow {
                athlete: name.to_string(),
                scores: axes.iter().map(|axis| table.value(name, axis)).collect(),
            })
        })
        .collect()
}
