//! Integration tests for the cluster gap-filler
//!
//! Tests the gap-fill contract end to end:
//! - holes strictly inside one bleed episode are inferable
//! - episode boundaries respect the max-gap threshold
//! - filling is idempotent and never invents certainty

use chrono::NaiveDate;
use cyclecast::core::{apply_cluster_fill, suggest_fill_dates, CycleEngine, ScoreOptions};
use cyclecast::types::{parse_calendar_day, ObservationSet, ParsedObservations, ScoreReason};
use cyclecast::DEFAULT_MAX_GAP_DAYS;

fn date(s: &str) -> NaiveDate {
    parse_calendar_day(s).unwrap()
}

fn observations(specs: &[&str]) -> ObservationSet {
    ObservationSet::from_dates(specs.iter().map(|s| date(s)))
}

// =============================================================================
// SCENARIO 1: One sparsely logged episode
// =============================================================================

#[test]
fn test_two_close_observations_suggest_exact_fills() {
    let fills = suggest_fill_dates(
        &observations(&["2024-01-01", "2024-01-04"]).dates(),
        DEFAULT_MAX_GAP_DAYS,
    );
    assert_eq!(fills, vec![date("2024-01-02"), date("2024-01-03")]);
}

#[test]
fn test_complete_episode_needs_no_fills() {
    let fills = suggest_fill_dates(
        &observations(&["2024-01-01", "2024-01-02", "2024-01-03"]).dates(),
        DEFAULT_MAX_GAP_DAYS,
    );
    assert!(fills.is_empty());
}

#[test]
fn test_applying_matches_the_suggestions() {
    let set = observations(&["2024-01-01", "2024-01-03", "2024-01-06"]);
    let suggested = suggest_fill_dates(&set.dates(), DEFAULT_MAX_GAP_DAYS);
    let filled = apply_cluster_fill(&set, DEFAULT_MAX_GAP_DAYS);

    assert_eq!(filled.len(), set.len() + suggested.len());
    for day in &suggested {
        assert!(filled.contains(*day), "suggested fill {} missing", day);
    }
    // Fills carry no certainty; the original entries keep theirs
    assert_eq!(filled.confirmed_count(), set.len());
}

// =============================================================================
// SCENARIO 2: A multi-month history
// =============================================================================

#[test]
fn test_monthly_history_fills_only_inside_episodes() {
    // January has holes, February is a lone onset, March is complete;
    // the month-wide gaps between them are never bridged
    let set = observations(&[
        "2024-01-01",
        "2024-01-04",
        "2024-02-01",
        "2024-03-01",
        "2024-03-02",
    ]);
    let fills = suggest_fill_dates(&set.dates(), DEFAULT_MAX_GAP_DAYS);
    assert_eq!(fills, vec![date("2024-01-02"), date("2024-01-03")]);
}

#[test]
fn test_rejected_strings_never_reach_the_filler() {
    let parsed = ParsedObservations::parse(["2024-01-01", "01/04/2024", "2024-01-04"]);
    assert_eq!(parsed.rejected, vec!["01/04/2024"]);

    let fills = suggest_fill_dates(&parsed.set.dates(), DEFAULT_MAX_GAP_DAYS);
    assert_eq!(fills, vec![date("2024-01-02"), date("2024-01-03")]);
}

// =============================================================================
// SCENARIO 3: Interplay with scoring
// =============================================================================

#[test]
fn test_tighter_gap_changes_the_scoring_row() {
    // A 4-day spacing is one episode at the default gap, two at
    // max_gap_days = 3, and the target in the hole scores differently
    let set = observations(&["2024-01-01", "2024-01-05"]);
    let engine = CycleEngine::default();

    let wide = engine
        .score(&set, date("2024-01-03"), &ScoreOptions::default())
        .unwrap();
    assert_eq!(wide.reason, ScoreReason::CertainObserved);
    assert_eq!(wide.scores.regla, 1.0);

    let tight = engine
        .score(
            &set,
            date("2024-01-03"),
            &ScoreOptions {
                max_gap_days: 3,
                ..ScoreOptions::default()
            },
        )
        .unwrap();
    assert_eq!(tight.reason, ScoreReason::ScoredFromPosterior);
    assert_eq!(tight.used_observations.len(), 2);
}

// =============================================================================
// SCENARIO 4: Idempotency
// =============================================================================

#[test]
fn test_gap_fill_is_idempotent_end_to_end() {
    let set = observations(&[
        "2024-01-01",
        "2024-01-03",
        "2024-01-06",
        "2024-02-01",
        "2024-02-02",
    ]);
    let once = apply_cluster_fill(&set, DEFAULT_MAX_GAP_DAYS);
    let twice = apply_cluster_fill(&once, DEFAULT_MAX_GAP_DAYS);

    assert_eq!(once.dates(), twice.dates());
    // Re-filling neither invents nor upgrades certainty
    assert_eq!(once.confirmed_count(), set.len());
    assert_eq!(twice.confirmed_count(), set.len());
}
