//! Target-date scoring engine
//!
//! Ties the pipeline together: observation set in, per-target category
//! distribution out. Three decision rows, checked in order:
//!
//! 1. the caller marked the target as a certain bleed day
//! 2. the target equals a used observation day (after gap-filling)
//! 3. full Bayesian scoring over the hypothesis grid
//!
//! Rows 1 and 2 short-circuit to all mass on regla. Row 3 walks every
//! posterior cell, asks which category the target's cycle day falls
//! into under that hypothesis, and accumulates the cell's weight there.

use chrono::NaiveDate;

use crate::core::cluster::apply_cluster_fill;
use crate::core::curve::curve_for_cycle_len;
use crate::core::likelihood::day_offsets;
use crate::core::posterior::build_posterior;
use crate::core::priors::EngineConfig;
use crate::core::reliability;
use crate::types::{
    Category, CategoryScores, ObservationSet, Posterior, Prediction, ScoreReason,
};
use crate::{DEFAULT_MAX_GAP_DAYS, T_HORNY, T_PERRISIMA};

/// Per-call scoring options
#[derive(Debug, Clone)]
pub struct ScoreOptions {
    /// Dates the caller knows are bleed days, certain-match before
    /// anything else
    pub certain_dates: Vec<NaiveDate>,
    /// Fill in-cluster holes before scoring
    pub auto_fill_clusters: bool,
    /// Widest within-cluster spacing the gap-filler bridges
    pub max_gap_days: i64,
}

impl Default for ScoreOptions {
    fn default() -> Self {
        Self {
            certain_dates: Vec::new(),
            auto_fill_clusters: true,
            max_gap_days: DEFAULT_MAX_GAP_DAYS,
        }
    }
}

/// The scoring engine. Stateless apart from its configuration; one
/// instance serves any number of score calls.
#[derive(Debug, Clone, Default)]
pub struct CycleEngine {
    config: EngineConfig,
}

impl CycleEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Score one target date. Returns None when no valid observations
    /// exist, certainty claims included.
    pub fn score(
        &self,
        observations: &ObservationSet,
        target: NaiveDate,
        options: &ScoreOptions,
    ) -> Option<Prediction> {
        if observations.is_empty() {
            return None;
        }

        let used = self.used_observations(observations, options);

        if options.certain_dates.contains(&target) {
            return Some(Self::certain_prediction(
                target,
                ScoreReason::CertainExplicit,
                &used,
            ));
        }
        if used.contains(target) {
            return Some(Self::certain_prediction(
                target,
                ScoreReason::CertainObserved,
                &used,
            ));
        }

        let reference = used.reference_date()?;
        let offsets = day_offsets(reference, &used.dates());
        let target_offset = target.signed_duration_since(reference).num_days();
        let posterior = build_posterior(&self.config, reference, &offsets);

        let mut raw = CategoryScores::zero();
        let mut expected_day = 0.0;
        for cell in &posterior.cells {
            let cycle_day = cell.cycle_day(target_offset);
            expected_day += cell.weight * cycle_day as f64;
            if cycle_day <= cell.bleed_len {
                raw.add(Category::Regla, cell.weight);
            } else {
                let desire = curve_for_cycle_len(cell.cycle_len).desire_on_day(cycle_day);
                let category = if desire >= T_PERRISIMA {
                    Category::Perrisima
                } else if desire >= T_HORNY {
                    Category::Horny
                } else {
                    Category::Nifunifa
                };
                raw.add(category, cell.weight);
            }
        }

        let scores = raw.normalized().rounded();
        Some(Prediction {
            target,
            scores,
            sexual_prob: round4(scores.sexual_prob()),
            dominance_gap: round4(scores.dominance_gap()),
            dominant_sex_category: scores.dominant_sex_category(),
            dominant: scores.dominant(),
            expected_cycle_day: Some((expected_day * 10.0).round() / 10.0),
            reliability: reliability::estimate(&scores),
            reason: ScoreReason::ScoredFromPosterior,
            reference_date: Some(reference),
            used_observations: used.dates(),
        })
    }

    /// The posterior a score call would use, for diagnostics. None
    /// when no valid observations exist.
    pub fn posterior_for(
        &self,
        observations: &ObservationSet,
        options: &ScoreOptions,
    ) -> Option<Posterior> {
        if observations.is_empty() {
            return None;
        }
        let used = self.used_observations(observations, options);
        let reference = used.reference_date()?;
        let offsets = day_offsets(reference, &used.dates());
        Some(build_posterior(&self.config, reference, &offsets))
    }

    /// The observation set a score call actually scores against
    pub fn used_observations(
        &self,
        observations: &ObservationSet,
        options: &ScoreOptions,
    ) -> ObservationSet {
        if options.auto_fill_clusters {
            apply_cluster_fill(observations, options.max_gap_days)
        } else {
            observations.clone()
        }
    }

    fn certain_prediction(
        target: NaiveDate,
        reason: ScoreReason,
        used: &ObservationSet,
    ) -> Prediction {
        let scores = CategoryScores::certain_bleed();
        Prediction {
            target,
            scores,
            sexual_prob: 0.0,
            dominance_gap: 1.0,
            dominant_sex_category: None,
            dominant: Category::Regla,
            expected_cycle_day: None,
            reliability: reliability::estimate(&scores),
            reason,
            reference_date: used.reference_date(),
            used_observations: used.dates(),
        }
    }
}

fn round4(x: f64) -> f64 {
    (x * 10000.0).round() / 10000.0
}

// =============================================================================
// TESTS
// =============================================================================
