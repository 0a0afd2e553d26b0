//! Bleed cluster detection and gap-filling
//!
//! Sparse logging leaves holes inside a single bleed episode. Sorted
//! observation days are grouped into clusters wherever consecutive
//! days are close enough to belong to one episode; every missing day
//! strictly inside a multi-day cluster is then inferred as a bleed day.
//! Lone observations are left alone, and re-running the fill is a
//! no-op.

use chrono::{Days, NaiveDate};

use crate::types::{Observation, ObservationSet};

/// Group sorted dates into clusters. Two consecutive dates share a
/// cluster when they are at most `max_gap_days - 1` apart, so a
/// max gap of 7 tolerates holes of up to 6 days.
fn split_clusters(dates: &[NaiveDate], max_gap_days: i64) -> Vec<Vec<NaiveDate>> {
    let mut clusters: Vec<Vec<NaiveDate>> = Vec::new();
    let mut current: Vec<NaiveDate> = Vec::new();
    for &date in dates {
        match current.last() {
            Some(&prev) if date.signed_duration_since(prev).num_days() <= max_gap_days - 1 => {
                current.push(date);
            }
            Some(_) => {
                clusters.push(std::mem::take(&mut current));
                current.push(date);
            }
            None => current.push(date),
        }
    }
    if !current.is_empty() {
        clusters.push(current);
    }
    clusters
}

/// Missing days strictly inside each multi-member cluster, ascending
pub fn suggest_fill_dates(dates: &[NaiveDate], max_gap_days: i64) -> Vec<NaiveDate> {
    let mut fills = Vec::new();
    for cluster in split_clusters(dates, max_gap_days) {
        if cluster.len() < 2 {
            continue;
        }
        let first = cluster[0];
        let last = cluster[cluster.len() - 1];
        let mut day = first + Days::new(1);
        while day < last {
            if !cluster.contains(&day) {
                fills.push(day);
            }
            day = day + Days::new(1);
        }
    }
    fills
}

/// Extend an observation set with inferred fills for every in-cluster
/// hole. Existing entries keep their certainty.
pub fn apply_cluster_fill(set: &ObservationSet, max_gap_days: i64) -> ObservationSet {
    let mut filled = set.clone();
    for date in suggest_fill_dates(&set.dates(), max_gap_days) {
        filled.insert(Observation::inferred(date));
    }
    filled
}

// =============================================================================
// TESTS
// =============================================================================
