//! # Radar Traces
//!
//! Lays a score table out as closed polar traces, one per selected athlete.
//!
//! For the taxonomy axes `a0..an`, a trace is
//!
//! ```text
//! r     = [score(a0), score(a1), ..., score(an), score(a0)]
//! theta = [a0,        a1,        ..., an,        a0       ]
//! ```
//!
//! The first point is repeated at the end so the polygon closes. Every
//! trace shares the radial range `[0, 100]`.

use crate::primitives::{RADAR_TITLE, RADIAL_RANGE};
use crate::scorer::ScoreTable;
use crate::taxonomy::Taxonomy;
use crate::{Axis, KickError, Score};
use serde::{Deserialize, Serialize};

/// How the area enclosed by a trace is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Fill {
    /// Fill the polygon itself.
    #[default]
    #[serde(rename = "toself")]
    ToSelf,
    None,
}

/// One athlete's closed polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarTrace {
    pub name: String,
    pub r: Vec<Score>,
    pub theta: Vec<Axis>,
    pub fill: Fill,
}

impl RadarTrace {
    /// Whether the first and last points coincide in both sequences.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.r.len() == self.theta.len()
            && self.r.len() >= 2
            && self.r.first() == self.r.last()
            && self.theta.first() == self.theta.last()
    }

    /// Points without the closing repeat, as (axis, score) pairs.
    pub fn spokes(&self) -> impl Iterator<Item = (&Axis, Score)> {
        let open = self.theta.len().saturating_sub(1);
        self.theta.iter().zip(self.r.iter().copied()).take(open)
    }
}

/// A radar chart comparing several athletes on the same axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarChart {
    pub title: String,
    /// Spoke labels in angular order (not closed).
    pub axes: Vec<Axis>,
    pub radial_range: [u8; 2],
    pub traces: Vec<RadarTrace>,
}

impl RadarChart {
    /// An empty-state chart: axes, no traces.
    #[must_use]
    pub fn empty(taxonomy: &Taxonomy) -> Self {
        Self {
            title: RADAR_TITLE.to_string(),
            axes: taxonomy.axes(),
            radial_range: RADIAL_RANGE,
            traces: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }
}

/// Build one closed trace per selected athlete, in selection order.
///
/// # Errors
///
/// `KickError::UnknownAthlete` if a selected name is not in the table. A
/// zero-filled trace for a name that was never scored would be misleading.
pub fn radar<S: AsRef<str>>(
    table: &ScoreTable,
    taxonomy: &Taxonomy,
    selected: &[S],
) -> Result<RadarChart, KickError> {
    let mut chart = RadarChart::empty(taxonomy);
    let Some(first_axis) = chart.axes.first().cloned() else {
        return Err(KickError::InvalidTaxonomy("no axes".to_string()));
    };

    let mut theta = chart.axes.clone();
    theta.push(first_axis);

    for name in selected {
        let name = name.as_ref();
        if !table.contains_athlete(name) {
            return Err(KickError::UnknownAthlete(name.to_string()));
        }

        let mut r: Vec<Score> = chart.axes.iter().map(|axis| table.value(name, axis)).collect();
        if let Some(first) = r.first().copied() {
            r.push(first);
        }

        chart.traces.push(RadarTrace {
            name: name.to_string(),
            r,
            theta: theta.clone(),
            fill: Fill::ToSelf,
        });
    }

    Ok(chart)
}

// =============================================================================
// TESTS
// =============================================================================
