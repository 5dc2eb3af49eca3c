//! Export a ranked result set to CSV or JSON.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::ExportError;
use crate::ranking::SearchResultSet;

const CSV_HEADER: [&str; 9] = [
    "rank",
    "id",
    "name",
    "vicinity",
    "lat",
    "lng",
    "distance_m",
    "rating",
    "user_ratings_total",
];

/// Write one CSV row per place, in ranking order, with a 1-based `rank` column.
pub fn write_csv<W: Write>(results: &SearchResultSet, writer: W) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADER)?;
    for (idx, place) in results.iter().enumerate() {
        let coordinate = place.coordinate();
        wtr.write_record([
            (idx + 1).to_string(),
            place.id().to_string(),
            place.name().to_string(),
            place.vicinity().to_string(),
            coordinate.lat().to_string(),
            coordinate.lng().to_string(),
            place.distance_m().to_string(),
            place.rating().map(|r| r.to_string()).unwrap_or_default(),
            place.user_ratings_total().to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the result set as a pretty-printed JSON array.
pub fn write_json<W: Write>(results: &SearchResultSet, writer: W) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(writer, results)?;
    Ok(())
}

pub fn export_to_csv(results: &SearchResultSet, path: impl AsRef<Path>) -> Result<(), ExportError> {
    ensure_not_empty(results)?;
    write_csv(results, File::create(path)?)
}

pub fn export_to_json(
    results: &SearchResultSet,
    path: impl AsRef<Path>,
) -> Result<(), ExportError> {
    ensure_not_empty(results)?;
    write_json(results, File::create(path)?)
}

fn ensure_not_empty(results: &SearchResultSet) -> Result<(), ExportError> {
    if results.is_empty() {
        return Err(ExportError::Empty);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinate;
    use crate::places::PlaceCandidate;
    use crate::ranking::rank;

    fn sample() -> SearchResultSet {
        rank(
            Coordinate::new(0.0, 0.0),
            vec![
                PlaceCandidate::new("far", "Far, Inc.", Coordinate::new(0.01, 0.0)),
                PlaceCandidate::new("near", "Near", Coordinate::new(0.001, 0.0))
                    .with_rating(4.5, 10),
            ],
        )
    }

    #[test]
    fn csv_rows_follow_ranking() {
        let mut buf = Vec::new();
        write_csv(&sample(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "rank,id,name,vicinity,lat,lng,distance_m,rating,user_ratings_total"
        );
        assert!(lines[1].starts_with("1,near,Near,"));
        assert!(lines[1].ends_with(",111,4.5,10"));
        assert!(lines[2].starts_with("2,far,\"Far, Inc.\","));
        assert!(lines[2].ends_with(",1112,,0"));
    }

    #[test]
    fn json_is_a_flat_array() {
        let mut buf = Vec::new();
        write_json(&sample(), &mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        let first = &value[0];
        assert_eq!(first["id"], "near");
        assert_eq!(first["distance_m"], 111);
        assert_eq!(first["coordinate"]["lat"], 0.001);
    }

    #[test]
    fn empty_results_are_not_exported() {
        let err = export_to_csv(&SearchResultSet::empty(), "unused.csv").unwrap_err();
        assert!(matches!(err, ExportError::Empty));
    }
}
