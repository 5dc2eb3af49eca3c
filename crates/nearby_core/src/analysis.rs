//! Radius analysis over a ranked result set.
//!
//! Everything here relies on the ordering of [`SearchResultSet`]: the closest
//! place is the first entry and "within radius" is a prefix of the list.

use serde::Serialize;

use crate::places::RankedPlace;
use crate::ranking::SearchResultSet;

pub const NEAR_RADIUS_M: u64 = 500;
pub const WALKING_RADIUS_M: u64 = 1_000;

/// Number of places whose rounded distance is at most `radius_m`.
pub fn count_within(results: &SearchResultSet, radius_m: u64) -> usize {
    results
        .as_slice()
        .partition_point(|place| place.distance_m() <= radius_m)
}

pub fn closest(results: &SearchResultSet) -> Option<&RankedPlace> {
    results.get(0)
}

/// Sidebar summary of the current result set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QuickAnalysis {
    pub found: usize,
    pub within_500m: usize,
    pub within_1km: usize,
    pub closest_name: Option<String>,
}

impl QuickAnalysis {
    pub fn from_results(results: &SearchResultSet) -> Self {
        Self {
            found: results.len(),
            within_500m: count_within(results, NEAR_RADIUS_M),
            within_1km: count_within(results, WALKING_RADIUS_M),
            closest_name: closest(results).map(|place| place.name().to_string()),
        }
    }
}

/// Count of places in one distance bucket `[lower_m, lower_m + width)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DistanceBucket {
    pub lower_m: u64,
    pub count: usize,
}

/// Group distances into fixed-width buckets from 0 up to the farthest place.
///
/// Empty buckets in between are included so the histogram has no gaps.
/// Returns an empty list for an empty result set or a zero width.
pub fn distance_histogram(results: &SearchResultSet, bucket_width_m: u64) -> Vec<DistanceBucket> {
    if bucket_width_m == 0 {
        return Vec::new();
    }
    let Some(farthest) = results.iter().last() else {
        return Vec::new();
    };
    let bucket_count = (farthest.distance_m() / bucket_width_m) as usize + 1;
    let mut buckets: Vec<DistanceBucket> = (0..bucket_count)
        .map(|idx| DistanceBucket {
            lower_m: idx as u64 * bucket_width_m,
            count: 0,
        })
        .collect();
    for place in results {
        let idx = (place.distance_m() / bucket_width_m) as usize;
        buckets[idx].count += 1;
    }
    buckets
}
