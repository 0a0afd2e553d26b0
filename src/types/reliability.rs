//! Reliability types: entropy-derived confidence in a score vector

use serde::{Deserialize, Serialize};

use crate::{RELIABILITY_HIGH_PCT, RELIABILITY_MEDIUM_PCT};

/// Qualitative confidence band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReliabilityBand {
    /// Prediction is strongly concentrated on one category
    High,
    /// Usable but spread over more than one category
    Medium,
    /// Close to uniform - treat as a guess
    Low,
}

impl ReliabilityBand {
    /// Band for a reliability percentage
    pub fn from_pct(pct: f64) -> Self {
        if pct >= RELIABILITY_HIGH_PCT {
            ReliabilityBand::High
        } else if pct >= RELIABILITY_MEDIUM_PCT {
            ReliabilityBand::Medium
        } else {
            ReliabilityBand::Low
        }
    }

    /// Get ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            ReliabilityBand::High => "\x1b[32m",   // Green
            ReliabilityBand::Medium => "\x1b[33m", // Yellow
            ReliabilityBand::Low => "\x1b[31m",    // Red
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }
}

impl std::fmt::Display for ReliabilityBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ReliabilityBand::High => "high",
            ReliabilityBand::Medium => "medium",
            ReliabilityBand::Low => "low",
        };
        write!(f, "{}", name)
    }
}

/// Entropy-derived confidence in a category score vector
///
/// 1.0 = all mass on one category, 0.0 = exactly uniform.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Reliability {
    /// Confidence score in [0, 1]
    pub score: f64,
    /// Score as a percentage, rounded to 1 decimal place
    pub pct: f64,
    /// Qualitative band derived from the percentage
    pub band: ReliabilityBand,
}

impl Reliability {
    /// Build from a raw score in [0, 1]
    pub fn from_score(score: f64) -> Self {
        let score = score.clamp(0.0, 1.0);
        let pct = (score * 1000.0).round() / 10.0;
        Self {
            score,
            pct,
            band: ReliabilityBand::from_pct(pct),
        }
    }

    /// Format for display as "87.5% (high)"
    pub fn display_value(&self) -> String {
        format!("{:.1}% ({})", self.pct, self.band)
    }
}

// =============================================================================
// TESTS
// =============================================================================
