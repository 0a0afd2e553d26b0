//! Reliability estimation from the category distribution
//!
//! Confidence is one minus the normalized Shannon entropy of the
//! four-way score vector: a single dominant category reads as fully
//! reliable, a uniform spread as not reliable at all.

use crate::types::{Category, CategoryScores, Reliability};

/// Estimate reliability for a score vector. Negative entries are
/// clamped to zero and the vector renormalized before the entropy is
/// taken, so a malformed input degrades instead of producing NaN.
pub fn estimate(scores: &CategoryScores) -> Reliability {
    let cleaned = CategoryScores {
        regla: scores.regla.max(0.0),
        perrisima: scores.perrisima.max(0.0),
        horny: scores.horny.max(0.0),
        nifunifa: scores.nifunifa.max(0.0),
    }
    .normalized();

    let mut entropy = 0.0;
    for (_, p) in cleaned.as_array() {
        if p > 0.0 {
            entropy -= p * p.log2();
        }
    }
    let max_entropy = (Category::ALL.len() as f64).log2();
    Reliability::from_score(1.0 - entropy / max_entropy)
}

// =============================================================================
// TESTS
// =============================================================================
