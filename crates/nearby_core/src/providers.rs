//! External collaborators: device location, nearby search and the map renderer.
//!
//! Implementations shipped with the crate:
//!
//! - **`FixedGeolocation`** / **`DeniedGeolocation`** / **`UnsupportedGeolocation`**:
//!   zero-dependency location sources (configured position, or the two refusal modes).
//! - **`IpGeolocation`** (feature `ip-location`): approximate location over HTTP.
//! - **`FixtureSearchProvider`**: in-memory place catalogue, filtered by radius and type.
//! - **`GooglePlacesClient`** (feature `google-places`): Places Nearby Search endpoint.
//!
//! Location and search providers are blocking and `Send + Sync`, so the
//! [`crate::worker::ProviderWorker`] can call them from background threads.

use crate::error::{GeolocationError, ProviderError};
use crate::geo::{distance_m, Bounds, Coordinate};
use crate::places::{PlaceCandidate, PlaceType};

/// Single-shot source of the device's current position.
pub trait GeolocationProvider: Send + Sync {
    fn current_position(&self) -> Result<Coordinate, GeolocationError>;
}

/// Single-shot nearby search.
///
/// `Ok(vec![])` means the query succeeded with zero candidates; a non-OK
/// provider status is reported as [`ProviderError::Status`].
pub trait NearbySearchProvider: Send + Sync {
    fn search_nearby(
        &self,
        center: Coordinate,
        radius_m: u32,
        category: &PlaceType,
    ) -> Result<Vec<PlaceCandidate>, ProviderError>;
}

/// One numbered marker on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub place_id: String,
    pub coordinate: Coordinate,
    pub label: String,
}

/// Map surface driven by the presentation layer.
///
/// The renderer owns its marker collection; `set_markers` replaces it wholesale.
pub trait MapRenderer {
    fn set_view(&mut self, center: Coordinate, zoom: u8);
    fn set_markers(&mut self, markers: Vec<MapMarker>);
    fn fit_bounds(&mut self, bounds: Bounds);
    /// Pan to a coordinate and zoom in close.
    fn focus(&mut self, center: Coordinate);
    /// Marker clicks since the last call, as place ids.
    fn drain_clicks(&mut self) -> Vec<String>;
}

pub const FOCUS_ZOOM: u8 = 16;
pub const DEFAULT_ZOOM: u8 = 12;

// ---------------------------------------------------------------------------
// Location sources
// ---------------------------------------------------------------------------

/// Always reports the same position.
#[derive(Debug, Clone, Copy)]
pub struct FixedGeolocation(pub Coordinate);

impl GeolocationProvider for FixedGeolocation {
    fn current_position(&self) -> Result<Coordinate, GeolocationError> {
        Ok(self.0)
    }
}

/// The user switched location sharing off.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeniedGeolocation;

impl GeolocationProvider for DeniedGeolocation {
    fn current_position(&self) -> Result<Coordinate, GeolocationError> {
        Err(GeolocationError::PermissionDenied)
    }
}

/// No location source is available on this machine.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedGeolocation;

impl GeolocationProvider for UnsupportedGeolocation {
    fn current_position(&self) -> Result<Coordinate, GeolocationError> {
        Err(GeolocationError::Unsupported)
    }
}

// ---------------------------------------------------------------------------
// In-memory search provider
// ---------------------------------------------------------------------------

/// Serves searches from a fixed catalogue of typed places.
///
/// Results come back in catalogue order, like a provider that ranks by its
/// own relevance rather than by distance.
#[derive(Debug, Clone, Default)]
pub struct FixtureSearchProvider {
    places: Vec<(PlaceType, PlaceCandidate)>,
    failure_status: Option<String>,
}

impl FixtureSearchProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_place(mut self, place_type: PlaceType, place: PlaceCandidate) -> Self {
        self.places.push((place_type, place));
        self
    }

    /// Make every search fail with the given provider status.
    pub fn failing_with(mut self, status: impl Into<String>) -> Self {
        self.failure_status = Some(status.into());
        self
    }
}

impl NearbySearchProvider for FixtureSearchProvider {
    fn search_nearby(
        &self,
        center: Coordinate,
        radius_m: u32,
        category: &PlaceType,
    ) -> Result<Vec<PlaceCandidate>, ProviderError> {
        if let Some(status) = &self.failure_status {
            return Err(ProviderError::Status {
                status: status.clone(),
                message: None,
            });
        }
        Ok(self
            .places
            .iter()
            .filter(|(place_type, _)| place_type == category)
            .filter(|(_, place)| distance_m(center, place.coordinate) <= f64::from(radius_m))
            .map(|(_, place)| place.clone())
            .collect())
    }
}
