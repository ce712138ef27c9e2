//! # Property-Based Tests
//!
//! Determinism, bounds and closure invariants checked with proptest.

use kicksfo_core::{MatchEvent, Score, Taxonomy, radar, score};
use proptest::collection::vec;
use proptest::prelude::*;

const ATHLETES: [&str; 3] = ["A", "B", "C"];
const TARGETS: [&str; 3] = ["얼굴", "몸통", "다리"];
const FEET: [&str; 2] = ["뒷발", "앞발"];
const TECHNIQUES: [&str; 4] = ["돌려차기", "빠른발", "앞발", "컷트"];

fn arb_event() -> impl Strategy<Value = MatchEvent> {
    (
        0..ATHLETES.len(),
        0..TARGETS.len(),
        0..FEET.len(),
        0..TECHNIQUES.len(),
        any::<bool>(),
    )
        .prop_map(|(a, t, f, k, success)| MatchEvent {
            athlete: ATHLETES[a].to_string(),
            target: TARGETS[t].to_string(),
            foot: FEET[f].to_string(),
            technique: TECHNIQUES[k].to_string(),
            success,
            style: String::new(),
            signature: String::new(),
            career: String::new(),
        })
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// Every cell lies within 0..=100%.
    #[test]
    fn scores_are_percentages(events in vec(arb_event(), 0..200)) {
        let table = score(&events);
        for (_, cells) in table.iter() {
            for cell in cells.values() {
                prop_assert!(cell.score <= Score::MAX);
                prop_assert!(cell.successes <= cell.attempts);
                prop_assert!(cell.attempts > 0);
            }
        }
    }

    /// Scoring the same events twice yields the same table.
    #[test]
    fn scoring_is_deterministic(events in vec(arb_event(), 0..200)) {
        prop_assert_eq!(score(&events), score(&events));
    }

    /// Row order does not affect the table.
    #[test]
    fn scoring_ignores_row_order(events in vec(arb_event(), 0..100)) {
        let mut reversed = events.clone();
        reversed.reverse();
        prop_assert_eq!(score(&events), score(&reversed));
    }

    /// Attempts across all cells add up to the number of events.
    #[test]
    fn every_event_lands_in_one_group(events in vec(arb_event(), 0..200)) {
        let table = score(&events);
        let total: u32 = table
            .iter()
            .flat_map(|(_, cells)| cells.values())
            .map(|c| c.attempts)
            .sum();
        prop_assert_eq!(total as usize, events.len());
    }

    /// All-success groups score 100.0, all-failure groups 0.0.
    #[test]
    fn uniform_outcomes_hit_the_bounds(n in 1usize..50, success in any::<bool>()) {
        let events: Vec<MatchEvent> = (0..n)
            .map(|_| MatchEvent {
                athlete: "A".to_string(),
                target: "얼굴".to_string(),
                foot: "앞발".to_string(),
                technique: "빠른발".to_string(),
                success,
                style: String::new(),
                signature: String::new(),
                career: String::new(),
            })
            .collect();
        let table = score(&events);
        let expected = if success { Score::MAX } else { Score::ZERO };
        prop_assert_eq!(table.value("A", &"얼굴-앞발-빠른발".into()), expected);
    }

    /// Every trace is closed: first == last for both r and theta.
    #[test]
    fn radar_traces_are_closed(events in vec(arb_event(), 1..100)) {
        let table = score(&events);
        let selected: Vec<String> = table.athletes().map(str::to_string).collect();
        let chart = radar(&table, Taxonomy::standard(), &selected).expect("known athletes");
        prop_assert_eq!(chart.traces.len(), selected.len());
        for trace in &chart.traces {
            prop_assert!(trace.is_closed());
            prop_assert_eq!(trace.r.first(), trace.r.last());
            prop_assert_eq!(trace.theta.first(), trace.theta.last());
        }
    }

    /// Taxonomy flattening is stable across calls.
    #[test]
    fn taxonomy_order_is_stable(_round in 0u8..10) {
        let taxonomy = Taxonomy::standard();
        prop_assert_eq!(taxonomy.axes(), taxonomy.axes());
        prop_assert_eq!(taxonomy.axes().len(), taxonomy.len());
    }
}
