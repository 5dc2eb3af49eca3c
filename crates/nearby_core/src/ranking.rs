//! Distance ranking of provider candidates.

use serde::Serialize;

use crate::geo::{distance_m, Coordinate};
use crate::places::{PlaceCandidate, RankedPlace};

/// Places ordered ascending by `distance_m`, ties kept in provider order.
///
/// The ordering invariant holds because the only non-empty constructor is [`rank`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SearchResultSet(Vec<RankedPlace>);

impl SearchResultSet {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RankedPlace> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[RankedPlace] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<&RankedPlace> {
        self.0.get(index)
    }

    pub fn find(&self, id: &str) -> Option<&RankedPlace> {
        self.0.iter().find(|place| place.id() == id)
    }

    /// 0-based list position of a place, used for its marker label.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.0.iter().position(|place| place.id() == id)
    }

    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.0.iter().map(RankedPlace::coordinate)
    }
}

impl<'a> IntoIterator for &'a SearchResultSet {
    type Item = &'a RankedPlace;
    type IntoIter = std::slice::Iter<'a, RankedPlace>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Rank candidates by great-circle distance to `reference`.
///
/// Distances are rounded to the nearest metre before sorting, and the sort is
/// stable, so candidates at the same rounded distance keep their input order.
pub fn rank<I>(reference: Coordinate, candidates: I) -> SearchResultSet
where
    I: IntoIterator<Item = PlaceCandidate>,
{
    let mut ranked: Vec<RankedPlace> = candidates
        .into_iter()
        .map(|candidate| {
            let distance = distance_m(reference, candidate.coordinate).round() as u64;
            RankedPlace::new(candidate, distance)
        })
        .collect();
    ranked.sort_by_key(RankedPlace::distance_m);
    SearchResultSet(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: &str, lat: f64, lng: f64) -> PlaceCandidate {
        PlaceCandidate::new(id, id.to_uppercase(), Coordinate::new(lat, lng))
    }

    #[test]
    fn rank_orders_closest_first() {
        let reference = Coordinate::new(26.8206, 30.8025);
        let results = rank(
            reference,
            vec![
                candidate("a", 26.8306, 30.8025),
                candidate("b", 26.8206, 30.8125),
            ],
        );
        let ids: Vec<&str> = results.iter().map(RankedPlace::id).collect();
        assert_eq!(ids, ["b", "a"]);
        assert!((1_105..=1_120).contains(&results.get(1).unwrap().distance_m()));
        assert!((985..=1_000).contains(&results.get(0).unwrap().distance_m()));
    }

    #[test]
    fn rank_keeps_input_order_for_equal_distances() {
        let reference = Coordinate::new(0.0, 0.0);
        let results = rank(
            reference,
            vec![
                candidate("north", 0.01, 0.0),
                candidate("south", -0.01, 0.0),
                candidate("here", 0.0, 0.0),
                candidate("north-again", 0.01, 0.0),
            ],
        );
        let ids: Vec<&str> = results.iter().map(RankedPlace::id).collect();
        assert_eq!(ids, ["here", "north", "south", "north-again"]);
    }

    #[test]
    fn rank_of_nothing_is_empty() {
        let results = rank(Coordinate::new(1.0, 2.0), Vec::new());
        assert!(results.is_empty());
        assert_eq!(results, SearchResultSet::empty());
    }

    #[test]
    fn position_and_find_use_place_ids() {
        let reference = Coordinate::new(0.0, 0.0);
        let results = rank(
            reference,
            vec![candidate("far", 0.02, 0.0), candidate("near", 0.01, 0.0)],
        );
        assert_eq!(results.position("far"), Some(1));
        assert_eq!(results.find("near").map(RankedPlace::name), Some("NEAR"));
        assert!(results.find("missing").is_none());
    }
}
