//! Prediction result types
//!
//! `CategoryScores` is the normalized four-way probability vector;
//! `Prediction` is the full per-target output: rounded scores, derived
//! receptivity fields, reliability, and the decision-table row that
//! produced it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{Category, Reliability, ReliabilityBand};

/// Probability mass per category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryScores {
    /// Menstruating
    pub regla: f64,
    /// Highly receptive
    pub perrisima: f64,
    /// Moderately receptive
    pub horny: f64,
    /// Neutral
    pub nifunifa: f64,
}

impl CategoryScores {
    /// All-zero accumulator
    pub fn zero() -> Self {
        Self {
            regla: 0.0,
            perrisima: 0.0,
            horny: 0.0,
            nifunifa: 0.0,
        }
    }

    /// Degenerate fallback: equal mass on every category
    pub fn uniform() -> Self {
        Self {
            regla: 0.25,
            perrisima: 0.25,
            horny: 0.25,
            nifunifa: 0.25,
        }
    }

    /// Certainty short-circuit vector: all mass on regla
    pub fn certain_bleed() -> Self {
        Self {
            regla: 1.0,
            perrisima: 0.0,
            horny: 0.0,
            nifunifa: 0.0,
        }
    }

    /// Mass for one category
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Regla => self.regla,
            Category::Perrisima => self.perrisima,
            Category::Horny => self.horny,
            Category::Nifunifa => self.nifunifa,
        }
    }

    /// Add mass to one category
    pub fn add(&mut self, category: Category, mass: f64) {
        match category {
            Category::Regla => self.regla += mass,
            Category::Perrisima => self.perrisima += mass,
            Category::Horny => self.horny += mass,
            Category::Nifunifa => self.nifunifa += mass,
        }
    }

    /// Total mass
    pub fn sum(&self) -> f64 {
        self.regla + self.perrisima + self.horny + self.nifunifa
    }

    /// (category, mass) pairs in accumulator order
    pub fn as_array(&self) -> [(Category, f64); 4] {
        [
            (Category::Regla, self.regla),
            (Category::Perrisima, self.perrisima),
            (Category::Horny, self.horny),
            (Category::Nifunifa, self.nifunifa),
        ]
    }

    /// Normalize to sum 1.0; a non-positive sum falls back to uniform
    pub fn normalized(&self) -> Self {
        let total = self.sum();
        if total <= 0.0 {
            return Self::uniform();
        }
        Self {
            regla: self.regla / total,
            perrisima: self.perrisima / total,
            horny: self.horny / total,
            nifunifa: self.nifunifa / total,
        }
    }

    /// Round each share to 4 decimal places for output stability,
    /// folding the rounding residual into the largest share so a
    /// normalized vector still sums to exactly 1.0. Call after
    /// `normalized`.
    pub fn rounded(&self) -> Self {
        let round4 = |x: f64| (x * 10000.0).round() / 10000.0;
        let mut out = Self {
            regla: round4(self.regla),
            perrisima: round4(self.perrisima),
            horny: round4(self.horny),
            nifunifa: round4(self.nifunifa),
        };
        let residual = 1.0 - out.sum();
        out.add(out.dominant(), residual);
        out
    }

    /// The highest-mass category (ties resolve in accumulator order)
    pub fn dominant(&self) -> Category {
        let mut best = Category::Regla;
        let mut best_mass = self.regla;
        for (category, mass) in self.as_array() {
            if mass > best_mass {
                best = category;
                best_mass = mass;
            }
        }
        best
    }

    /// Combined receptive mass: horny + perrisima
    pub fn sexual_prob(&self) -> f64 {
        self.horny + self.perrisima
    }

    /// Gap between the top and second probability
    pub fn dominance_gap(&self) -> f64 {
        let mut masses = [self.regla, self.perrisima, self.horny, self.nifunifa];
        masses.sort_by(|a, b| b.total_cmp(a));
        masses[0] - masses[1]
    }

    /// The stronger of the two receptive categories, but only when the
    /// combined receptive mass beats both regla and nifunifa
    pub fn dominant_sex_category(&self) -> Option<Category> {
        if self.sexual_prob() > self.regla.max(self.nifunifa) {
            if self.perrisima >= self.horny {
                Some(Category::Perrisima)
            } else {
                Some(Category::Horny)
            }
        } else {
            None
        }
    }
}

/// Which decision-table row produced a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScoreReason {
    /// Target is listed in the caller's certain dates
    CertainExplicit,
    /// Target equals a used observation day (confirmed or gap-filled)
    CertainObserved,
    /// Full Bayesian scoring over the posterior grid
    ScoredFromPosterior,
}

impl ScoreReason {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::CertainExplicit => "CERTAIN_EXPLICIT",
            Self::CertainObserved => "CERTAIN_OBSERVED",
            Self::ScoredFromPosterior => "SCORED_FROM_POSTERIOR",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::CertainExplicit => "Caller marked this date as a certain bleed day",
            Self::CertainObserved => "Date matches a used observation",
            Self::ScoredFromPosterior => "Scored through the hypothesis grid",
        }
    }

    /// Did this prediction bypass the Bayesian computation?
    pub fn is_short_circuit(&self) -> bool {
        matches!(self, Self::CertainExplicit | Self::CertainObserved)
    }
}

impl std::fmt::Display for ScoreReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}

/// Full scoring result for one target date
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    /// The scored date
    pub target: NaiveDate,
    /// Normalized, rounded category probabilities
    pub scores: CategoryScores,
    /// horny + perrisima
    pub sexual_prob: f64,
    /// Top probability minus second probability
    pub dominance_gap: f64,
    /// Stronger receptive category, when receptivity dominates
    pub dominant_sex_category: Option<Category>,
    /// Highest-probability category overall
    pub dominant: Category,
    /// Posterior-weighted mean cycle day of the target
    /// (None when a certainty row bypassed the posterior)
    pub expected_cycle_day: Option<f64>,
    /// Entropy-derived confidence in the score vector
    pub reliability: Reliability,
    /// Decision-table row that produced this result
    pub reason: ScoreReason,
    /// Most recent observation used as the anchor
    pub reference_date: Option<NaiveDate>,
    /// Observation days actually used, after gap-filling
    pub used_observations: Vec<NaiveDate>,
}

impl Prediction {
    /// Format for terminal display (with colors); the reliability
    /// figure takes its band's color
    pub fn to_terminal_string(&self) -> String {
        let color = self.dominant.color_code();
        let emoji = self.dominant.emoji();

        format!(
            "{}{} {} regla={:.3} perrisima={:.3} horny={:.3} nifunifa={:.3} | {} | {}{}{}",
            color,
            emoji,
            self.target.format("%Y-%m-%d"),
            self.scores.regla,
            self.scores.perrisima,
            self.scores.horny,
            self.scores.nifunifa,
            self.dominant,
            self.reliability.band.color_code(),
            self.reliability.display_value(),
            ReliabilityBand::color_reset()
        )
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "target={} | regla={:.4} | perrisima={:.4} | horny={:.4} | nifunifa={:.4} | dominant={} | reliability={:.1}% | band={} | reason={}",
            self.target.format("%Y-%m-%d"),
            self.scores.regla,
            self.scores.perrisima,
            self.scores.horny,
            self.scores.nifunifa,
            self.dominant,
            self.reliability.pct,
            self.reliability.band,
            self.reason.code()
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================
