//! Place types, search parameters and the place records flowing through a search.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

pub const MIN_RADIUS_M: u32 = 500;
pub const MAX_RADIUS_M: u32 = 5_000;
pub const RADIUS_STEP_M: u32 = 100;
pub const DEFAULT_RADIUS_M: u32 = 2_000;

/// Category passed to the nearby-search provider.
///
/// The six built-in categories are the ones offered in the type selector;
/// [`PlaceType::Custom`] carries any other provider category string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum PlaceType {
    #[default]
    Pharmacy,
    Atm,
    Hospital,
    Restaurant,
    Bank,
    Supermarket,
    Custom(String),
}

impl PlaceType {
    pub const BUILT_IN: [PlaceType; 6] = [
        PlaceType::Pharmacy,
        PlaceType::Atm,
        PlaceType::Hospital,
        PlaceType::Restaurant,
        PlaceType::Bank,
        PlaceType::Supermarket,
    ];

    /// Provider category string (e.g. `"pharmacy"`).
    pub fn as_str(&self) -> &str {
        match self {
            PlaceType::Pharmacy => "pharmacy",
            PlaceType::Atm => "atm",
            PlaceType::Hospital => "hospital",
            PlaceType::Restaurant => "restaurant",
            PlaceType::Bank => "bank",
            PlaceType::Supermarket => "supermarket",
            PlaceType::Custom(category) => category,
        }
    }

    /// Human-readable label for selectors.
    pub fn label(&self) -> &str {
        match self {
            PlaceType::Pharmacy => "Pharmacy",
            PlaceType::Atm => "ATM",
            PlaceType::Hospital => "Hospital",
            PlaceType::Restaurant => "Restaurant",
            PlaceType::Bank => "Bank",
            PlaceType::Supermarket => "Supermarket",
            PlaceType::Custom(category) => category,
        }
    }
}

impl fmt::Display for PlaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlaceType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Ok(PlaceType::BUILT_IN
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .unwrap_or(PlaceType::Custom(normalized)))
    }
}

impl From<String> for PlaceType {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(kind) => kind,
            Err(never) => match never {},
        }
    }
}

impl From<PlaceType> for String {
    fn from(value: PlaceType) -> Self {
        value.as_str().to_string()
    }
}

/// Query parameters for one nearby search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParameters {
    pub place_type: PlaceType,
    pub radius_m: u32,
}

impl Default for SearchParameters {
    fn default() -> Self {
        Self {
            place_type: PlaceType::default(),
            radius_m: DEFAULT_RADIUS_M,
        }
    }
}

impl SearchParameters {
    pub fn new(place_type: PlaceType, radius_m: u32) -> Self {
        Self {
            place_type,
            radius_m,
        }
    }

    /// Snap a radius into the slider range (500–5000 m, 100 m steps).
    pub fn clamp_radius(radius_m: u32) -> u32 {
        let clamped = radius_m.clamp(MIN_RADIUS_M, MAX_RADIUS_M);
        let steps = (clamped - MIN_RADIUS_M + RADIUS_STEP_M / 2) / RADIUS_STEP_M;
        (MIN_RADIUS_M + steps * RADIUS_STEP_M).min(MAX_RADIUS_M)
    }
}

/// Raw place as returned by the nearby-search provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceCandidate {
    pub id: String,
    pub name: String,
    pub coordinate: Coordinate,
    #[serde(default)]
    pub vicinity: String,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: u32,
}

impl PlaceCandidate {
    pub fn new(id: impl Into<String>, name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            coordinate,
            vicinity: String::new(),
            rating: None,
            user_ratings_total: 0,
        }
    }

    pub fn with_vicinity(mut self, vicinity: impl Into<String>) -> Self {
        self.vicinity = vicinity.into();
        self
    }

    pub fn with_rating(mut self, rating: f64, user_ratings_total: u32) -> Self {
        self.rating = Some(rating);
        self.user_ratings_total = user_ratings_total;
        self
    }
}

/// A candidate with its rounded distance to the search reference.
///
/// Only [`crate::ranking::rank`] builds these; the fields are read-only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPlace {
    #[serde(flatten)]
    place: PlaceCandidate,
    distance_m: u64,
}

impl RankedPlace {
    pub(crate) fn new(place: PlaceCandidate, distance_m: u64) -> Self {
        Self { place, distance_m }
    }

    pub fn place(&self) -> &PlaceCandidate {
        &self.place
    }

    pub fn id(&self) -> &str {
        &self.place.id
    }

    pub fn name(&self) -> &str {
        &self.place.name
    }

    pub fn coordinate(&self) -> Coordinate {
        self.place.coordinate
    }

    pub fn vicinity(&self) -> &str {
        &self.place.vicinity
    }

    pub fn rating(&self) -> Option<f64> {
        self.place.rating
    }

    pub fn user_ratings_total(&self) -> u32 {
        self.place.user_ratings_total
    }

    pub fn distance_m(&self) -> u64 {
        self.distance_m
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_types_round_trip_through_strings() {
        for kind in PlaceType::BUILT_IN {
            assert_eq!(kind.as_str().parse::<PlaceType>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_category_becomes_custom() {
        let kind: PlaceType = " Gas_Station ".parse().unwrap();
        assert_eq!(kind, PlaceType::Custom("gas_station".to_string()));
        assert_eq!(kind.as_str(), "gas_station");
    }

    #[test]
    fn clamp_radius_snaps_to_slider_range() {
        assert_eq!(SearchParameters::clamp_radius(0), 500);
        assert_eq!(SearchParameters::clamp_radius(2_000), 2_000);
        assert_eq!(SearchParameters::clamp_radius(2_049), 2_000);
        assert_eq!(SearchParameters::clamp_radius(2_050), 2_100);
        assert_eq!(SearchParameters::clamp_radius(9_999), 5_000);
    }

    #[test]
    fn defaults_match_the_initial_selector_state() {
        let params = SearchParameters::default();
        assert_eq!(params.place_type, PlaceType::Pharmacy);
        assert_eq!(params.radius_m, 2_000);
    }

    #[test]
    fn place_type_serializes_as_category_string() {
        let json = serde_json::to_string(&PlaceType::Atm).unwrap();
        assert_eq!(json, "\"atm\"");
        let back: PlaceType = serde_json::from_str("\"bank\"").unwrap();
        assert_eq!(back, PlaceType::Bank);
    }
}
