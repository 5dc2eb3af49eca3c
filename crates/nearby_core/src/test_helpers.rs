//! Test helpers for common test setup and utilities.
//!
//! This module provides shared fixtures to reduce duplication across test files.

use crate::geo::{Bounds, Coordinate};
use crate::places::{PlaceCandidate, PlaceType};
use crate::providers::{FixtureSearchProvider, MapMarker, MapRenderer};

/// The map's initial center, also used as the standard reference in tests.
pub const TEST_REFERENCE: Coordinate = Coordinate::new(26.8206, 30.8025);

pub fn test_reference() -> Coordinate {
    TEST_REFERENCE
}

/// Candidate offset from [`TEST_REFERENCE`] by the given degrees.
pub fn candidate_at(id: &str, dlat: f64, dlng: f64) -> PlaceCandidate {
    PlaceCandidate::new(
        id,
        format!("Place {id}"),
        Coordinate::new(TEST_REFERENCE.lat() + dlat, TEST_REFERENCE.lng() + dlng),
    )
    .with_vicinity(format!("{id} street"))
}

/// Pharmacies spread north of the reference every `spacing_deg` degrees.
///
/// Returned farthest first, so ranking has to reverse them.
pub fn pharmacies_north(count: usize, spacing_deg: f64) -> Vec<PlaceCandidate> {
    (1..=count)
        .rev()
        .map(|step| candidate_at(&format!("ph{step}"), step as f64 * spacing_deg, 0.0))
        .collect()
}

/// Fixture provider with a small mixed catalogue around the reference.
pub fn sample_provider() -> FixtureSearchProvider {
    FixtureSearchProvider::new()
        .with_place(PlaceType::Pharmacy, candidate_at("a", 0.01, 0.0))
        .with_place(PlaceType::Pharmacy, candidate_at("b", 0.0, 0.01))
        .with_place(
            PlaceType::Pharmacy,
            candidate_at("c", 0.003, 0.0).with_rating(4.2, 31),
        )
        .with_place(PlaceType::Atm, candidate_at("atm1", 0.002, 0.002))
        .with_place(PlaceType::Pharmacy, candidate_at("remote", 0.3, 0.3))
}

/// Map renderer double that records every call.
#[derive(Debug, Default)]
pub struct RecordingMapRenderer {
    pub center: Option<Coordinate>,
    pub zoom: Option<u8>,
    pub markers: Vec<MapMarker>,
    pub fitted: Vec<Bounds>,
    pub focused: Vec<Coordinate>,
    pub pending_clicks: Vec<String>,
    pub marker_replacements: usize,
}

impl MapRenderer for RecordingMapRenderer {
    fn set_view(&mut self, center: Coordinate, zoom: u8) {
        self.center = Some(center);
        self.zoom = Some(zoom);
    }

    fn set_markers(&mut self, markers: Vec<MapMarker>) {
        self.markers = markers;
        self.marker_replacements += 1;
    }

    fn fit_bounds(&mut self, bounds: Bounds) {
        self.fitted.push(bounds);
    }

    fn focus(&mut self, center: Coordinate) {
        self.focused.push(center);
        self.center = Some(center);
    }

    fn drain_clicks(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending_clicks)
    }
}
