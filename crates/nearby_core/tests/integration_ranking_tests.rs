use nearby_core::analysis::{closest, count_within, QuickAnalysis};
use nearby_core::geo::{distance_m, Coordinate};
use nearby_core::places::{PlaceCandidate, RankedPlace};
use nearby_core::ranking::rank;
use nearby_core::test_helpers::{candidate_at, pharmacies_north, test_reference};

#[test]
fn two_candidate_scenario_orders_east_before_north() {
    let reference = Coordinate::new(26.8206, 30.8025);
    let candidates = vec![
        PlaceCandidate::new("a", "A", Coordinate::new(26.8306, 30.8025)),
        PlaceCandidate::new("b", "B", Coordinate::new(26.8206, 30.8125)),
    ];

    let results = rank(reference, candidates);

    let ids: Vec<&str> = results.iter().map(RankedPlace::id).collect();
    assert_eq!(ids, ["b", "a"]);
    let a = results.find("a").unwrap().distance_m();
    let b = results.find("b").unwrap().distance_m();
    // 0.01 degree of latitude, and 0.01 degree of longitude at ~26.8 N.
    assert!((1_100..=1_125).contains(&a), "a = {a}");
    assert!((980..=1_005).contains(&b), "b = {b}");
    assert_eq!(closest(&results).map(RankedPlace::id), Some("b"));
}

#[test]
fn empty_candidates_scenario() {
    let results = rank(test_reference(), Vec::new());
    assert!(results.is_empty());
    for radius in [0, 500, 1_000, u64::MAX] {
        assert_eq!(count_within(&results, radius), 0);
    }
    assert!(closest(&results).is_none());
    let analysis = QuickAnalysis::from_results(&results);
    assert_eq!(analysis.found, 0);
    assert!(analysis.closest_name.is_none());
}

#[test]
fn ranked_distances_are_rounded_haversine() {
    let candidates = pharmacies_north(5, 0.002);
    let results = rank(test_reference(), candidates.clone());
    for candidate in &candidates {
        let ranked = results.find(&candidate.id).unwrap();
        let exact = distance_m(test_reference(), candidate.coordinate);
        assert_eq!(ranked.distance_m(), exact.round() as u64);
    }
}

#[test]
fn farthest_first_input_is_reversed() {
    let results = rank(test_reference(), pharmacies_north(4, 0.002));
    let ids: Vec<&str> = results.iter().map(RankedPlace::id).collect();
    assert_eq!(ids, ["ph1", "ph2", "ph3", "ph4"]);
}

#[test]
fn quick_analysis_matches_sidebar_counts() {
    // ~111 m, ~333 m, ~667 m, ~1.3 km
    let results = rank(
        test_reference(),
        vec![
            candidate_at("d", 0.012, 0.0),
            candidate_at("a", 0.001, 0.0),
            candidate_at("c", 0.006, 0.0),
            candidate_at("b", 0.003, 0.0),
        ],
    );
    let analysis = QuickAnalysis::from_results(&results);
    assert_eq!(analysis.found, 4);
    assert_eq!(analysis.within_500m, 2);
    assert_eq!(analysis.within_1km, 3);
    assert_eq!(analysis.closest_name.as_deref(), Some("Place a"));
}
