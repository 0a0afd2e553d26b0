//! Integration tests for the prediction engine
//!
//! Tests the full path: date strings → observation set → posterior →
//! category scores → reliability

use chrono::NaiveDate;
use cyclecast::core::{suggest_fill_dates, CycleEngine, ScoreOptions};
use cyclecast::types::{
    parse_calendar_day, Category, ObservationSet, ParsedObservations, ReliabilityBand,
    ScoreReason,
};

fn date(s: &str) -> NaiveDate {
    parse_calendar_day(s).unwrap()
}

fn observations(specs: &[&str]) -> ObservationSet {
    ObservationSet::from_dates(specs.iter().map(|s| date(s)))
}

/// Test the full path from raw strings to a normalized prediction
#[test]
fn test_full_prediction_path() {
    let parsed = ParsedObservations::parse(["2024-01-05", "2024-02-02", "2024-03-01"]);
    assert!(parsed.rejected.is_empty());

    let engine = CycleEngine::default();
    let prediction = engine
        .score(&parsed.set, date("2024-03-20"), &ScoreOptions::default())
        .expect("three valid observations must produce a prediction");

    for (_, mass) in prediction.scores.as_array() {
        assert!((0.0..=1.0).contains(&mass), "share out of range: {}", mass);
    }
    assert!(
        (prediction.scores.sum() - 1.0).abs() < 1e-6,
        "scores must sum to 1.0, got {}",
        prediction.scores.sum()
    );
    assert_eq!(prediction.reference_date, Some(date("2024-03-01")));
    assert!(prediction.reliability.score >= 0.0 && prediction.reliability.score <= 1.0);
}

/// An observed target date always scores as certain regla
#[test]
fn test_observed_target_scores_certain_regla() {
    let engine = CycleEngine::default();
    let prediction = engine
        .score(
            &observations(&["2024-01-01", "2024-02-10"]),
            date("2024-02-10"),
            &ScoreOptions::default(),
        )
        .unwrap();

    assert_eq!(prediction.scores.regla, 1.0);
    assert_eq!(prediction.scores.perrisima, 0.0);
    assert_eq!(prediction.scores.horny, 0.0);
    assert_eq!(prediction.scores.nifunifa, 0.0);
    assert_eq!(prediction.reason, ScoreReason::CertainObserved);
    assert!((prediction.reliability.pct - 100.0).abs() < 1e-9);
}

/// Empty inputs are normal outcomes, not errors
#[test]
fn test_empty_inputs_are_normal_outcomes() {
    let engine = CycleEngine::default();
    assert!(engine
        .score(&ObservationSet::new(), date("2024-01-01"), &ScoreOptions::default())
        .is_none());
    assert!(suggest_fill_dates(&[], 7).is_empty());
}

/// Scenario: a lone observation, scored 14 days later
#[test]
fn test_single_observation_fourteen_days_later() {
    let engine = CycleEngine::default();
    let prediction = engine
        .score(&observations(&["2024-01-01"]), date("2024-01-15"), &ScoreOptions::default())
        .unwrap();

    // Day 15 of any hypothesized cycle is past every bleed window
    assert_eq!(prediction.scores.regla, 0.0);
    // The desire curve peaks in this region, so receptive mass dominates
    assert!(
        prediction.sexual_prob > 0.5,
        "mid-cycle sexual_prob too low: {}",
        prediction.sexual_prob
    );
    assert_eq!(prediction.dominant, Category::Horny);
}

/// Scenario: a lone observation, scored 2 days later, still carries
/// bleed mass from the longer bleed-length hypotheses
#[test]
fn test_single_observation_two_days_later() {
    let engine = CycleEngine::default();
    let prediction = engine
        .score(&observations(&["2024-01-01"]), date("2024-01-03"), &ScoreOptions::default())
        .unwrap();

    assert!(
        prediction.scores.regla > 0.3,
        "regla mass near the reference too low: {}",
        prediction.scores.regla
    );
}

/// Scenario: three observations exactly 28 days apart concentrate the
/// posterior on K=28 and predict a bleed one cycle out
#[test]
fn test_three_observations_on_a_28_day_cadence() {
    let engine = CycleEngine::default();
    let set = observations(&["2024-01-05", "2024-02-02", "2024-03-01"]);
    let options = ScoreOptions::default();

    let posterior = engine.posterior_for(&set, &options).unwrap();
    assert!(
        posterior.cycle_len_mass(28) > 0.8,
        "posterior did not concentrate on K=28: {}",
        posterior.cycle_len_mass(28)
    );

    let prediction = engine.score(&set, date("2024-03-29"), &options).unwrap();
    assert!(
        prediction.scores.regla > 0.7,
        "regla at reference+28 too low: {}",
        prediction.scores.regla
    );
    assert_eq!(prediction.dominant, Category::Regla);
    assert_eq!(prediction.reliability.band, ReliabilityBand::High);
    assert_eq!(prediction.reason, ScoreReason::ScoredFromPosterior);
}

/// Malformed date entries drop individually without aborting the call
#[test]
fn test_malformed_dates_drop_individually() {
    let parsed = ParsedObservations::parse([
        "2024-01-05",
        "not-a-date",
        "2024-02-30",
        "2024-02-02",
    ]);
    assert_eq!(parsed.set.len(), 2);
    assert_eq!(parsed.rejected, vec!["not-a-date", "2024-02-30"]);

    let engine = CycleEngine::default();
    let prediction = engine.score(&parsed.set, date("2024-02-20"), &ScoreOptions::default());
    assert!(prediction.is_some(), "valid subset must still score");
}

/// An explicit certainty claim wins over every other consideration
#[test]
fn test_explicit_certainty_wins() {
    let engine = CycleEngine::default();
    let options = ScoreOptions {
        certain_dates: vec![date("2024-06-15")],
        ..ScoreOptions::default()
    };
    let prediction = engine
        .score(&observations(&["2024-01-01"]), date("2024-06-15"), &options)
        .unwrap();
    assert_eq!(prediction.scores.regla, 1.0);
    assert_eq!(prediction.reason, ScoreReason::CertainExplicit);
}

/// Derived fields stay consistent with the score vector
#[test]
fn test_derived_fields_are_consistent() {
    let engine = CycleEngine::default();
    let prediction = engine
        .score(&observations(&["2024-01-01"]), date("2024-01-20"), &ScoreOptions::default())
        .unwrap();

    let scores = prediction.scores;
    assert!(
        (prediction.sexual_prob - (scores.perrisima + scores.horny)).abs() < 1e-9,
        "sexual_prob drifted from its components"
    );

    let mut masses = [scores.regla, scores.perrisima, scores.horny, scores.nifunifa];
    masses.sort_by(|a, b| b.total_cmp(a));
    assert!((prediction.dominance_gap - (masses[0] - masses[1])).abs() < 1e-9);
    assert_eq!(prediction.dominant, scores.dominant());
}

/// Every day of a forecast window is scoreable and normalized
#[test]
fn test_consecutive_days_all_score() {
    let engine = CycleEngine::default();
    let set = observations(&["2024-01-05", "2024-02-02"]);
    let options = ScoreOptions::default();

    for offset in 0..35i64 {
        let day = date("2024-02-02") + chrono::Days::new(offset as u64);
        let prediction = engine
            .score(&set, day, &options)
            .unwrap_or_else(|| panic!("day {} failed to score", day));
        assert!(
            (prediction.scores.sum() - 1.0).abs() < 1e-6,
            "day {} broke normalization",
            day
        );
    }
}
