//! Geographic primitives: coordinates, great-circle distance and bounds.
//!
//! This module provides:
//!
//! - **Coordinate**: latitude/longitude pair in degrees
//! - **Distance calculations**: Haversine distance in metres
//! - **Bounds**: lat/lng bounding box used for "fit to bounds" map requests
//!
//! Coordinates are not validated on construction. The Haversine formula is
//! defined for any real degree values, so out-of-range input still yields a
//! number; callers that care use [`Coordinate::is_valid`].

use serde::{Deserialize, Serialize};

/// Mean Earth radius used for all distance calculations.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    lat: f64,
    lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    /// True when latitude is within [-90, 90] and longitude within [-180, 180].
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }

    pub fn distance_to(&self, other: Coordinate) -> f64 {
        distance_m(*self, other)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6},{:.6}", self.lat, self.lng)
    }
}

/// Great-circle distance between two coordinates in metres (Haversine).
pub fn distance_m(a: Coordinate, b: Coordinate) -> f64 {
    let (lat1, lon1) = (a.lat.to_radians(), a.lng.to_radians());
    let (lat2, lon2) = (b.lat.to_radians(), b.lng.to_radians());
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let sin_dlat = (dlat * 0.5).sin();
    let sin_dlon = (dlon * 0.5).sin();
    let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;
    // Rounding can push h a hair outside [0, 1] for antipodal points.
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_M * c
}

/// Axis-aligned lat/lng box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lng_min: f64,
    pub lng_max: f64,
}

impl Bounds {
    /// A zero-area box around a single coordinate.
    pub fn around(point: Coordinate) -> Self {
        Self {
            lat_min: point.lat,
            lat_max: point.lat,
            lng_min: point.lng,
            lng_max: point.lng,
        }
    }

    /// Smallest box containing every coordinate, or `None` for an empty input.
    pub fn from_coordinates<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Self::around(first);
        for point in iter {
            bounds.extend(point);
        }
        Some(bounds)
    }

    pub fn extend(&mut self, point: Coordinate) {
        self.lat_min = self.lat_min.min(point.lat);
        self.lat_max = self.lat_max.max(point.lat);
        self.lng_min = self.lng_min.min(point.lng);
        self.lng_max = self.lng_max.max(point.lng);
    }

    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.lat_min + self.lat_max) * 0.5,
            (self.lng_min + self.lng_max) * 0.5,
        )
    }

    pub fn contains(&self, point: Coordinate) -> bool {
        (self.lat_min..=self.lat_max).contains(&point.lat)
            && (self.lng_min..=self.lng_max).contains(&point.lng)
    }

    pub fn lat_span(&self) -> f64 {
        self.lat_max - self.lat_min
    }

    pub fn lng_span(&self) -> f64 {
        self.lng_max - self.lng_min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_to_self_is_zero() {
        let cairo = Coordinate::new(30.0444, 31.2357);
        assert_eq!(distance_m(cairo, cairo), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Coordinate::new(26.8206, 30.8025);
        let b = Coordinate::new(-33.8688, 151.2093);
        let ab = distance_m(a, b);
        let ba = distance_m(b, a);
        assert!((ab - ba).abs() <= ab * 1e-9);
    }

    #[test]
    fn one_degree_latitude_at_equator() {
        let d = distance_m(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 0.0));
        assert!((d - 111_195.0).abs() < 111_195.0 * 0.01, "got {d}");
    }

    #[test]
    fn antipodal_points_are_half_circumference() {
        let d = distance_m(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 180.0));
        let half = std::f64::consts::PI * EARTH_RADIUS_M;
        assert!((d - half).abs() < 1.0);
    }

    #[test]
    fn out_of_range_input_still_produces_a_distance() {
        let bogus = Coordinate::new(120.0, 400.0);
        assert!(!bogus.is_valid());
        let d = distance_m(Coordinate::new(0.0, 0.0), bogus);
        assert!(d.is_finite() && d >= 0.0);
    }

    #[test]
    fn bounds_cover_all_points() {
        let points = [
            Coordinate::new(26.82, 30.80),
            Coordinate::new(26.83, 30.79),
            Coordinate::new(26.81, 30.81),
        ];
        let bounds = Bounds::from_coordinates(points).expect("non-empty");
        assert_eq!(bounds.lat_min, 26.81);
        assert_eq!(bounds.lat_max, 26.83);
        assert_eq!(bounds.lng_min, 30.79);
        assert_eq!(bounds.lng_max, 30.81);
        assert!(points.iter().all(|p| bounds.contains(*p)));
    }

    #[test]
    fn bounds_of_nothing_is_none() {
        assert!(Bounds::from_coordinates(Vec::new()).is_none());
    }
}
