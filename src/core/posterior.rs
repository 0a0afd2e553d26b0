//! Posterior construction over the (K, L, r) hypothesis grid
//!
//! Enumerates every cycle length, bleed length, and phase offset in
//! range, weights each cell by prior times likelihood, and normalizes.
//! A degenerate zero total falls back to a uniform posterior rather
//! than failing.

use chrono::NaiveDate;

use crate::core::likelihood::observation_likelihood;
use crate::core::priors::EngineConfig;
use crate::types::{Hypothesis, Posterior};
use crate::{BLEED_LEN_MAX, BLEED_LEN_MIN, CYCLE_LEN_MAX, CYCLE_LEN_MIN};

/// Build the normalized posterior for a set of observation offsets
/// anchored at `reference`
pub fn build_posterior(config: &EngineConfig, reference: NaiveDate, offsets: &[i64]) -> Posterior {
    let mut cells = Vec::new();
    for cycle_len in CYCLE_LEN_MIN..=CYCLE_LEN_MAX {
        for bleed_len in BLEED_LEN_MIN..=BLEED_LEN_MAX {
            for phase in 1..=bleed_len {
                let prior = config.priors.cell_prior(cycle_len, bleed_len);
                let likelihood = observation_likelihood(
                    cycle_len,
                    bleed_len,
                    phase,
                    offsets,
                    config.p_bleed,
                    config.p_false,
                );
                cells.push(Hypothesis {
                    cycle_len,
                    bleed_len,
                    phase,
                    prior,
                    likelihood,
                    weight: prior * likelihood,
                });
            }
        }
    }

    let total: f64 = cells.iter().map(|h| h.weight).sum();
    if total <= 0.0 {
        let uniform = 1.0 / cells.len() as f64;
        for cell in &mut cells {
            cell.weight = uniform;
        }
    } else {
        for cell in &mut cells {
            cell.weight /= total;
        }
    }

    Posterior { cells, reference }
}

// =============================================================================
// TESTS
// =============================================================================
