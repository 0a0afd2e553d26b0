//! Cycle-state category definitions

use serde::{Deserialize, Serialize};

/// The four mutually exclusive states a target date can score into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Menstruating - target falls inside the hypothesized bleed window
    Regla,
    /// Highly receptive - desire at or above the perrisima threshold
    Perrisima,
    /// Moderately receptive - desire at or above the horny threshold
    Horny,
    /// Neutral - none of the above
    Nifunifa,
}

impl Category {
    /// All categories in accumulator order
    pub const ALL: [Category; 4] = [
        Category::Regla,
        Category::Perrisima,
        Category::Horny,
        Category::Nifunifa,
    ];

    /// Get ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            Category::Regla => "\x1b[31m",     // Red
            Category::Perrisima => "\x1b[35m", // Magenta
            Category::Horny => "\x1b[33m",     // Orange/Yellow
            Category::Nifunifa => "\x1b[90m",  // Gray
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }

    /// Get emoji for category
    pub fn emoji(&self) -> &'static str {
        match self {
            Category::Regla => "🩸",
            Category::Perrisima => "🔥",
            Category::Horny => "😏",
            Category::Nifunifa => "😐",
        }
    }

    /// Is this one of the two receptive categories?
    pub fn is_sexual(&self) -> bool {
        matches!(self, Category::Perrisima | Category::Horny)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Category::Regla => "regla",
            Category::Perrisima => "perrisima",
            Category::Horny => "horny",
            Category::Nifunifa => "nifunifa",
        };
        write!(f, "{}", name)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Category::Regla).unwrap(), "\"regla\"");
        assert_eq!(
            serde_json::to_string(&Category::Perrisima).unwrap(),
            "\"perrisima\""
        );
        let back: Category = serde_json::from_str("\"nifunifa\"").unwrap();
        assert_eq!(back, Category::Nifunifa);
    }

    #[test]
    fn test_sexual_split() {
        assert!(Category::Perrisima.is_sexual());
        assert!(Category::Horny.is_sexual());
        assert!(!Category::Regla.is_sexual());
        assert!(!Category::Nifunifa.is_sexual());
    }

    #[test]
    fn test_display_matches_wire_names() {
        for category in Category::ALL {
            let wire = serde_json::to_string(&category).unwrap();
            assert_eq!(wire, format!("\"{}\"", category));
        }
    }
}
