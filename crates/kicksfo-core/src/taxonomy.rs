//! # Axis Taxonomy
//!
//! The nested technique taxonomy (target region → stance → technique) and
//! its flattening into an ordered list of axes.
//!
//! Axis order is a contract: it is the order used for score lookups, table
//! columns and radar spoke positions. Regions are walked in their defined
//! order, then stances, then techniques. Reordering the taxonomy reorders
//! the chart.

use crate::scorer::ScoreTable;
use crate::{Axis, KickError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Built-in taxonomy, initialized once on first use.
static STANDARD: LazyLock<Taxonomy> = LazyLock::new(|| Taxonomy {
    regions: vec![
        TargetRegion::new(
            "얼굴",
            vec![
                Stance::new("뒷발", &["돌려차기", "찍기", "이중발"]),
                Stance::new("앞발", &["빠른발", "앞발"]),
            ],
        ),
        TargetRegion::new(
            "몸통",
            vec![
                Stance::new("뒷발", &["돌려차기", "컷트"]),
                Stance::new("앞발", &["빠른발", "앞발", "앞발컷트"]),
            ],
        ),
    ],
});

// =============================================================================
// CONFIGURATION STRUCTURE
// =============================================================================

/// A stance (which foot kicks) and the techniques recorded for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stance {
    pub name: String,
    pub techniques: Vec<String>,
}

impl Stance {
    #[must_use]
    pub fn new(name: impl Into<String>, techniques: &[&str]) -> Self {
        Self {
            name: name.into(),
            techniques: techniques.iter().map(|t| (*t).to_string()).collect(),
        }
    }
}

/// A target region (e.g. face, torso) and its stances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetRegion {
    pub name: String,
    #[serde(rename = "stance")]
    pub stances: Vec<Stance>,
}

impl TargetRegion {
    #[must_use]
    pub fn new(name: impl Into<String>, stances: Vec<Stance>) -> Self {
        Self {
            name: name.into(),
            stances,
        }
    }
}

/// The full technique taxonomy.
///
/// In TOML this reads as:
///
/// ```toml
/// [[region]]
/// name = "face"
///
/// [[region.stance]]
/// name = "front"
/// techniques = ["quick", "push"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxonomy {
    #[serde(rename = "region")]
    pub regions: Vec<TargetRegion>,
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::standard().clone()
    }
}

impl Taxonomy {
    /// Build a taxonomy from explicit regions, validating it.
    pub fn new(regions: Vec<TargetRegion>) -> Result<Self, KickError> {
        let taxonomy = Self { regions };
        taxonomy.validate()?;
        Ok(taxonomy)
    }

    /// The built-in taxonomy: face and torso, rear and front foot, 10 axes.
    #[must_use]
    pub fn standard() -> &'static Self {
        &STANDARD
    }

    /// Check the taxonomy is usable.
    ///
    /// Rejects:
    /// - an empty region list, or a region/stance with nothing under it
    /// - empty names anywhere
    /// - two paths that flatten to the same axis label
    pub fn validate(&self) -> Result<(), KickError> {
        if self.regions.is_empty() {
            return Err(KickError::InvalidTaxonomy("no target regions".to_string()));
        }

        let mut seen = BTreeSet::new();
        for region in &self.regions {
            if region.name.trim().is_empty() {
                return Err(KickError::InvalidTaxonomy(
                    "empty target region name".to_string(),
                ));
            }
            if region.stances.is_empty() {
                return Err(KickError::InvalidTaxonomy(format!(
                    "region '{}' has no stances",
                    region.name
                )));
            }
            for stance in &region.stances {
                if stance.name.trim().is_empty() {
                    return Err(KickError::InvalidTaxonomy(format!(
                        "empty stance name under '{}'",
                        region.name
                    )));
                }
                if stance.techniques.is_empty() {
                    return Err(KickError::InvalidTaxonomy(format!(
                        "stance '{}' under '{}' has no techniques",
                        stance.name, region.name
                    )));
                }
                for technique in &stance.techniques {
                    if technique.trim().is_empty() {
                        return Err(KickError::InvalidTaxonomy(format!(
                            "empty technique name under '{}-{}'",
                            region.name, stance.name
                        )));
                    }
                    let axis = Axis::compose(&region.name, &stance.name, technique);
                    if !seen.insert(axis.clone()) {
                        return Err(KickError::InvalidTaxonomy(format!(
                            "duplicate axis '{axis}'"
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Flatten into the ordered axis list.
    #[must_use]
    pub fn axes(&self) -> Vec<Axis> {
        self.regions
            .iter()
            .flat_map(|region| {
                region.stances.iter().flat_map(move |stance| {
                    stance
                        .techniques
                        .iter()
                        .map(move |technique| Axis::compose(&region.name, &stance.name, technique))
                })
            })
            .collect()
    }

    /// Number of axes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.regions
            .iter()
            .flat_map(|r| &r.stances)
            .map(|s| s.techniques.len())
            .sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Position of an axis in the chart order.
    #[must_use]
    pub fn position(&self, axis: &Axis) -> Option<usize> {
        self.axes().iter().position(|a| a == axis)
    }

    #[must_use]
    pub fn contains(&self, axis: &Axis) -> bool {
        self.position(axis).is_some()
    }

    /// Axes that appear in scored data but not in this taxonomy.
    ///
    /// Those scores exist in the table but never reach the radar chart or
    /// the per-athlete score table. Sorted and deduplicated.
    #[must_use]
    pub fn unrecognized(&self, table: &ScoreTable) -> Vec<Axis> {
        let known: BTreeSet<Axis> = self.axes().into_iter().collect();
        table
            .iter()
            .flat_map(|(_, cells)| cells.keys())
            .filter(|axis| !known.contains(*axis))
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> Taxonomy {
        Taxonomy::new(vec![
            TargetRegion::new(
                "face",
                vec![
                    Stance::new("rear", &["round"]),
                    Stance::new("front", &["quick"]),
                ],
            ),
            TargetRegion::new(
                "torso",
                vec![
                    Stance::new("rear", &["round"]),
                    Stance::new("front", &["basic"]),
                ],
            ),
        ])
        .expect("valid taxonomy")
    }

    #[test]
    fn standard_has_ten_axes_in_order() {
        let labels: Vec<String> = Taxonomy::standard().axes().into_iter().map(|a| a.0).collect();
        assert_eq!(
            labels,
            vec![
                "얼굴-뒷발-돌려차기",
                "얼굴-뒷발-찍기",
                "얼굴-뒷발-이중발",
                "얼굴-앞발-빠른발",
                "얼굴-앞발-앞발",
                "몸통-뒷발-돌려차기",
                "몸통-뒷발-컷트",
                "몸통-앞발-빠른발",
                "몸통-앞발-앞발",
                "몸통-앞발-앞발컷트",
            ]
        );
        assert_eq!(Taxonomy::standard().len(), 10);
        assert!(Taxonomy::standard().validate().is_ok());
    }

    #[test]
    fn axes_follow_region_then_stance_then_technique() {
        let labels: Vec<String> = small().axes().into_iter().map(|a| a.0).collect();
        assert_eq!(
            labels,
            vec![
                "face-rear-round",
                "face-front-quick",
                "torso-rear-round",
                "torso-front-basic"
            ]
        );
    }

    #[test]
    fn axes_are_stable_across_calls() {
        let taxonomy = small();
        assert_eq!(taxonomy.axes(), taxonomy.axes());
        assert_eq!(taxonomy.len(), 4);
    }

    #[test]
    fn position_and_contains() {
        let taxonomy = small();
        assert_eq!(taxonomy.position(&Axis::from("torso-rear-round")), Some(2));
        assert!(!taxonomy.contains(&Axis::from("torso-rear-spin")));
    }

    #[test]
    fn duplicate_axis_rejected() {
        let result = Taxonomy::new(vec![TargetRegion::new(
            "face",
            vec![Stance::new("rear", &["round", "round"])],
        )]);
        assert!(matches!(result, Err(KickError::InvalidTaxonomy(_))));
    }

    #[test]
    fn empty_pieces_rejected() {
        assert!(Taxonomy::new(vec![]).is_err());
        assert!(Taxonomy::new(vec![TargetRegion::new("face", vec![])]).is_err());
        assert!(
            Taxonomy::new(vec![TargetRegion::new("face", vec![Stance::new("rear", &[])])])
                .is_err()
        );
        assert!(
            Taxonomy::new(vec![TargetRegion::new("", vec![Stance::new("rear", &["x"])])])
                .is_err()
        );
    }
}
