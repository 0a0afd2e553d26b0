//! Observation model for posterior construction
//!
//! - Observation = one confirmed or inferred bleeding day
//! - ObservationSet = the full history for one individual, kept sorted
//!   ascending with no two entries on the same calendar day

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    // Calendar days cross the wire as strict YYYY-MM-DD; anything looser
    // (time suffixes, single-digit fields) is rejected at ingress.
    static ref RE_CALENDAR_DAY: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
}

/// Parse one strict `YYYY-MM-DD` calendar day
pub fn parse_calendar_day(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if !RE_CALENDAR_DAY.is_match(raw) {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// A single observed bleeding day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// The calendar day (timezone-naive)
    pub date: NaiveDate,
    /// Confirmed by the caller (true) or auto-filled from a cluster (false)
    #[serde(default = "certain_default")]
    pub certain: bool,
}

fn certain_default() -> bool {
    true
}

impl Observation {
    /// Create a caller-confirmed observation
    pub fn confirmed(date: NaiveDate) -> Self {
        Self {
            date,
            certain: true,
        }
    }

    /// Create an auto-filled (inferred) observation
    pub fn inferred(date: NaiveDate) -> Self {
        Self {
            date,
            certain: false,
        }
    }
}

/// Ordered, deduplicated observation history
///
/// Invariant: entries are ascending by date and unique per calendar day.
/// When a confirmed and an inferred entry collide on the same day the
/// confirmed flag wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservationSet {
    entries: Vec<Observation>,
}

impl ObservationSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build a set of confirmed observations from raw dates
    pub fn from_dates<I>(dates: I) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let mut set = Self::new();
        for date in dates {
            set.insert(Observation::confirmed(date));
        }
        set
    }

    /// Insert an observation, keeping the set sorted and deduplicated.
    /// Returns true if the calendar day was not present before.
    pub fn insert(&mut self, obs: Observation) -> bool {
        match self.entries.binary_search_by_key(&obs.date, |e| e.date) {
            Ok(idx) => {
                // Same day already present; a confirmed entry never
                // downgrades to inferred.
                if obs.certain {
                    self.entries[idx].certain = true;
                }
                false
            }
            Err(idx) => {
                self.entries.insert(idx, obs);
                true
            }
        }
    }

    /// Number of observation days
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Observation> {
        self.entries.iter()
    }

    /// Is this calendar day in the set?
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.entries
            .binary_search_by_key(&date, |e| e.date)
            .is_ok()
    }

    /// The most recent observation date - the posterior's anchor
    pub fn reference_date(&self) -> Option<NaiveDate> {
        self.entries.last().map(|e| e.date)
    }

    /// All dates, oldest first
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.entries.iter().map(|e| e.date).collect()
    }

    /// Count of caller-confirmed entries
    pub fn confirmed_count(&self) -> usize {
        self.entries.iter().filter(|e| e.certain).count()
    }
}

/// Outcome of best-effort string parsing: the valid subset proceeds,
/// rejected inputs are reported back rather than failing the call
#[derive(Debug, Clone, Default)]
pub struct ParsedObservations {
    /// Observations built from the parseable entries
    pub set: ObservationSet,
    /// Raw strings that did not parse as strict calendar days
    pub rejected: Vec<String>,
}

impl ParsedObservations {
    /// Parse a list of raw date strings, dropping malformed entries
    pub fn parse<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = Self::default();
        for item in raw {
            match parse_calendar_day(item.as_ref()) {
                Some(date) => {
                    out.set.insert(Observation::confirmed(date));
                }
                None => out.rejected.push(item.as_ref().to_string()),
            }
        }
        out
    }
}

// =============================================================================
// TESTS
// =============================================================================
