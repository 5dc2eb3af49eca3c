use nearby_core::export::{export_to_csv, export_to_json};
use nearby_core::ranking::rank;
use nearby_core::test_helpers::{pharmacies_north, test_reference};
use tempfile::tempdir;

#[test]
fn exports_ranked_results_to_disk() {
    let results = rank(test_reference(), pharmacies_north(3, 0.001));
    let dir = tempdir().unwrap();

    let csv_path = dir.path().join("results.csv");
    export_to_csv(&results, &csv_path).unwrap();
    let mut reader = csv::Reader::from_path(&csv_path).unwrap();
    let ids: Vec<String> = reader
        .records()
        .map(|record| record.unwrap()[1].to_string())
        .collect();
    assert_eq!(ids, ["ph1", "ph2", "ph3"]);

    let json_path = dir.path().join("results.json");
    export_to_json(&results, &json_path).unwrap();
    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(parsed.as_array().map(Vec::len), Some(3));
    assert_eq!(parsed[2]["name"], "Place ph3");
}
