//! Prior probability tables over the hypothesis grid
//!
//! Cycle length and bleed length carry population-level priors; the
//! phase offset is uniform within each bleed length. A grid cell's
//! prior is the product of the three.

use crate::{BLEED_LEN_MAX, BLEED_LEN_MIN, CYCLE_LEN_MAX, CYCLE_LEN_MIN, P_BLEED, P_FALSE};

/// Prior mass per cycle length and bleed length
#[derive(Debug, Clone, PartialEq)]
pub struct PriorTables {
    /// Indexed by cycle_len - CYCLE_LEN_MIN
    cycle_len: [f64; 7],
    /// Indexed by bleed_len - BLEED_LEN_MIN
    bleed_len: [f64; 6],
}

impl Default for PriorTables {
    fn default() -> Self {
        Self {
            // 26..=32 days, centered on the modal 28
            cycle_len: [0.10, 0.12, 0.30, 0.20, 0.15, 0.08, 0.05],
            // 2..=7 days, centered on 4
            bleed_len: [0.05, 0.30, 0.35, 0.20, 0.07, 0.03],
        }
    }
}

impl PriorTables {
    /// Custom tables, indexed from the range minimums
    pub fn new(cycle_len: [f64; 7], bleed_len: [f64; 6]) -> Self {
        Self {
            cycle_len,
            bleed_len,
        }
    }

    /// Prior mass for a cycle length (0.0 outside the supported range)
    pub fn cycle_len_prior(&self, cycle_len: i64) -> f64 {
        if !(CYCLE_LEN_MIN..=CYCLE_LEN_MAX).contains(&cycle_len) {
            return 0.0;
        }
        self.cycle_len[(cycle_len - CYCLE_LEN_MIN) as usize]
    }

    /// Prior mass for a bleed length (0.0 outside the supported range)
    pub fn bleed_len_prior(&self, bleed_len: i64) -> f64 {
        if !(BLEED_LEN_MIN..=BLEED_LEN_MAX).contains(&bleed_len) {
            return 0.0;
        }
        self.bleed_len[(bleed_len - BLEED_LEN_MIN) as usize]
    }

    /// Uniform phase prior within one bleed length
    pub fn phase_prior(bleed_len: i64) -> f64 {
        1.0 / bleed_len as f64
    }

    /// Joint prior for one (cycle_len, bleed_len, phase) cell
    pub fn cell_prior(&self, cycle_len: i64, bleed_len: i64) -> f64 {
        self.cycle_len_prior(cycle_len)
            * self.bleed_len_prior(bleed_len)
            * Self::phase_prior(bleed_len)
    }
}

/// Tunable model constants for one engine instance
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub priors: PriorTables,
    /// Probability of observing a bleed day inside the bleed window
    pub p_bleed: f64,
    /// Probability of a stray observation outside the window
    pub p_false: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            priors: PriorTables::default(),
            p_bleed: P_BLEED,
            p_false: P_FALSE,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
