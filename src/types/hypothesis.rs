//! Hypothesis grid types for the Bayesian posterior
//!
//! A hypothesis is one candidate generative model of the cycle:
//! cycle length K, bleed length L, and phase offset r meaning "the
//! reference date is day r of the bleed window".

use chrono::NaiveDate;
use serde::Serialize;

/// Cycle day (1..=cycle_len) of a date `offset_days` away from the
/// reference, under phase offset `phase`. The remainder is taken
/// non-negative, so dates before the reference map correctly too.
pub fn cycle_day_of(phase: i64, offset_days: i64, cycle_len: i64) -> i64 {
    (phase + offset_days - 1).rem_euclid(cycle_len) + 1
}

/// One cell of the (K, L, r) hypothesis grid
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Hypothesis {
    /// Cycle length K in days
    pub cycle_len: i64,
    /// Bleed length L in days
    pub bleed_len: i64,
    /// Phase offset r in [1, L]
    pub phase: i64,
    /// P(K) * P(L) * (1/L)
    pub prior: f64,
    /// P(observations | K, L, r)
    pub likelihood: f64,
    /// Normalized posterior mass
    pub weight: f64,
}

impl Hypothesis {
    /// Cycle day of a date `offset_days` from the reference under this cell
    pub fn cycle_day(&self, offset_days: i64) -> i64 {
        cycle_day_of(self.phase, offset_days, self.cycle_len)
    }

    /// Does this cycle day fall inside the hypothesized bleed window?
    pub fn in_bleed_window(&self, cycle_day: i64) -> bool {
        (1..=self.bleed_len).contains(&cycle_day)
    }
}

/// Posterior weight table over the full hypothesis grid
///
/// Weights sum to 1.0 (uniform fallback on likelihood underflow).
/// Rebuilt fresh per scoring call, never persisted.
#[derive(Debug, Clone)]
pub struct Posterior {
    /// All grid cells with normalized weights
    pub cells: Vec<Hypothesis>,
    /// Anchor date: the most recent observation used
    pub reference: NaiveDate,
}

impl Posterior {
    /// Number of grid cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the grid is empty
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The highest-weight cell (MAP estimate)
    pub fn map_estimate(&self) -> Option<&Hypothesis> {
        self.cells
            .iter()
            .max_by(|a, b| a.weight.total_cmp(&b.weight))
    }

    /// Posterior-weighted mean cycle length
    pub fn expected_cycle_len(&self) -> f64 {
        self.cells
            .iter()
            .map(|c| c.cycle_len as f64 * c.weight)
            .sum()
    }

    /// Total posterior mass on one cycle length (diagnostic)
    pub fn cycle_len_mass(&self, cycle_len: i64) -> f64 {
        self.cells
            .iter()
            .filter(|c| c.cycle_len == cycle_len)
            .map(|c| c.weight)
            .sum()
    }
}

// =============================================================================
// TESTS
// =============================================================================
