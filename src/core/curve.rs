//! Desire curve template and resampling
//!
//! A fixed 28-day receptivity template gets piecewise-linearly resampled
//! to the cycle length of each hypothesis. The template encodes a flat
//! bleed-week floor, a rise to an ovulation peak around day 14, and a
//! slow luteal decline.

use lazy_static::lazy_static;

use crate::{CYCLE_LEN_MAX, CYCLE_LEN_MIN};

lazy_static! {
    /// 28-day baseline desire template, indexed by cycle day - 1
    pub static ref BASE_CURVE: Vec<f64> = build_base_curve();

    /// One resampled curve per supported cycle length
    static ref CURVES: Vec<DesireCurve> = (CYCLE_LEN_MIN..=CYCLE_LEN_MAX)
        .map(DesireCurve::for_cycle_len)
        .collect();
}

/// Shared curve for a supported cycle length (clamped into range)
pub fn curve_for_cycle_len(cycle_len: i64) -> &'static DesireCurve {
    let idx = (cycle_len.clamp(CYCLE_LEN_MIN, CYCLE_LEN_MAX) - CYCLE_LEN_MIN) as usize;
    &CURVES[idx]
}

/// Receptivity peak values for days 7 through 17
const RISE_AND_PEAK: [f64; 11] = [
    0.12, 0.18, 0.26, 0.34, 0.44, 0.55, 0.64, 0.70, 0.63, 0.52, 0.40,
];

/// Luteal decline endpoints (day 18 down to day 28)
const LUTEAL_START: f64 = 0.22;
const LUTEAL_END: f64 = 0.12;

fn build_base_curve() -> Vec<f64> {
    let mut curve = Vec::with_capacity(28);
    for day in 1i64..=28 {
        if day <= 6 {
            curve.push(0.05);
        } else if day <= 17 {
            curve.push(RISE_AND_PEAK[(day - 7) as usize]);
        } else {
            let t = (day - 18) as f64 / 10.0;
            curve.push(LUTEAL_START + (LUTEAL_END - LUTEAL_START) * t);
        }
    }
    curve
}

/// Resample a curve to `len` points by linear interpolation over the
/// unit interval. Both curves map index i to x = i / (len - 1); a
/// single-point target takes the first element.
fn resample(base: &[f64], len: i64) -> Vec<f64> {
    let n = base.len();
    if len as usize == n {
        return base.to_vec();
    }
    let mut out = Vec::with_capacity(len as usize);
    for i in 0..len {
        let x = if len == 1 {
            0.0
        } else {
            i as f64 / (len - 1) as f64
        };
        let pos = x * (n - 1) as f64;
        let lo = pos.floor() as usize;
        let hi = (lo + 1).min(n - 1);
        let frac = pos - lo as f64;
        out.push(base[lo] * (1.0 - frac) + base[hi] * frac);
    }
    out
}

/// A desire curve stretched to one hypothesis's cycle length
#[derive(Debug, Clone)]
pub struct DesireCurve {
    cycle_len: i64,
    values: Vec<f64>,
}

impl DesireCurve {
    /// Build the curve for a given cycle length
    pub fn for_cycle_len(cycle_len: i64) -> Self {
        Self {
            cycle_len,
            values: resample(&BASE_CURVE, cycle_len),
        }
    }

    pub fn cycle_len(&self) -> i64 {
        self.cycle_len
    }

    /// Desire value on a 1-based cycle day (clamped to the curve)
    pub fn desire_on_day(&self, cycle_day: i64) -> f64 {
        let idx = (cycle_day - 1).clamp(0, self.cycle_len - 1) as usize;
        self.values[idx]
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

// =============================================================================
// TESTS
// =============================================================================
