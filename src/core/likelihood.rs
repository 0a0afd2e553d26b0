//! Observation likelihood under one hypothesis
//!
//! Each observed bleed day either lands inside the hypothesis's bleed
//! window (probability `p_bleed`) or outside it (`p_false`); the
//! likelihood is the product over all observations. Observation dates
//! enter as signed day offsets from the reference date, so past
//! observations are negative.

use chrono::NaiveDate;

use crate::types::cycle_day_of;

/// Signed day offsets of each date relative to the reference
pub fn day_offsets(reference: NaiveDate, dates: &[NaiveDate]) -> Vec<i64> {
    dates
        .iter()
        .map(|d| d.signed_duration_since(reference).num_days())
        .collect()
}

/// Product likelihood of the observed offsets under one grid cell
pub fn observation_likelihood(
    cycle_len: i64,
    bleed_len: i64,
    phase: i64,
    offsets: &[i64],
    p_bleed: f64,
    p_false: f64,
) -> f64 {
    let mut lik = 1.0;
    for &offset in offsets {
        let cycle_day = cycle_day_of(phase, offset, cycle_len);
        lik *= if cycle_day <= bleed_len {
            p_bleed
        } else {
            p_false
        };
    }
    lik
}

// =============================================================================
// TESTS
// =============================================================================
