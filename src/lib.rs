//! Cyclecast: Bayesian cycle-state estimator
//!
//! Turns a sparse history of observed bleeding days into calibrated
//! probabilities that a target date falls into one of four states:
//! regla (menstruating), perrisima (highly receptive), horny
//! (moderately receptive), nifunifa (neutral).
//!
//! The pipeline is pure and stateless: observation dates -> cluster
//! gap-fill -> posterior over the (K, L, r) hypothesis grid -> category
//! scores -> entropy-based reliability.

pub mod core;
pub mod types;

// =============================================================================
// HYPOTHESIS GRID [C]
// =============================================================================

/// Shortest hypothesized cycle length in days
pub const CYCLE_LEN_MIN: i64 = 26;

/// Longest hypothesized cycle length in days
pub const CYCLE_LEN_MAX: i64 = 32;

/// Shortest hypothesized bleed length in days
pub const BLEED_LEN_MIN: i64 = 2;

/// Longest hypothesized bleed length in days
pub const BLEED_LEN_MAX: i64 = 7;

// =============================================================================
// LIKELIHOOD CONSTANTS [C]
// =============================================================================

/// P(observation | date inside the hypothesized bleed window)
pub const P_BLEED: f64 = 0.95;

/// P(observation | date outside the window) - false-positive penalty
pub const P_FALSE: f64 = 0.05;

// =============================================================================
// CATEGORY THRESHOLDS [C] - applied to the interpolated desire curve
// =============================================================================

/// Desire at or above this scores perrisima (highly receptive)
pub const T_PERRISIMA: f64 = 0.75;

/// Desire at or above this (but below T_PERRISIMA) scores horny
pub const T_HORNY: f64 = 0.40;

// =============================================================================
// CLUSTER GAP-FILL
// =============================================================================

/// Default episode span: consecutive observations closer than this many
/// days are treated as one continuous bleed episode
pub const DEFAULT_MAX_GAP_DAYS: i64 = 7;

// =============================================================================
// RELIABILITY BANDS (percent cutoffs)
// =============================================================================

/// Reliability percentage at or above this is the "high" band
pub const RELIABILITY_HIGH_PCT: f64 = 75.0;

/// Reliability percentage at or above this (but below high) is "medium"
pub const RELIABILITY_MEDIUM_PCT: f64 = 50.0;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
