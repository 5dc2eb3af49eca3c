use std::time::Duration;

use reqwest::{blocking::Client, Url};
use tracing::debug;

use crate::error::ProviderError;
use crate::geo::Coordinate;
use crate::places::{PlaceCandidate, PlaceType};
use crate::providers::NearbySearchProvider;

use super::parser::parse_nearby_response;
use super::response::NearbySearchResponse;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Thin HTTP client for the Places Nearby Search endpoint.
///
/// Only the first result page (up to 20 places) is fetched.
#[derive(Clone)]
pub struct GooglePlacesClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl GooglePlacesClient {
    /// Create a client for the given base endpoint
    /// (e.g. `https://maps.googleapis.com/maps/api/place`).
    ///
    /// Fails when the HTTP client cannot be built, which the session reports
    /// as a provider load failure.
    pub fn new(endpoint: &str, api_key: impl Into<String>) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ProviderError::Http)?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    pub(super) fn nearby_url(
        &self,
        center: Coordinate,
        radius_m: u32,
        category: &PlaceType,
    ) -> Result<Url, ProviderError> {
        let mut url = Url::parse(&format!("{}/nearbysearch/json", self.endpoint)).map_err(
            |err| ProviderError::Unavailable(format!("failed to build places URL: {}", err)),
        )?;
        url.query_pairs_mut()
            .append_pair("location", &format!("{:.6},{:.6}", center.lat(), center.lng()))
            .append_pair("radius", &radius_m.to_string())
            .append_pair("type", category.as_str())
            .append_pair("key", &self.api_key);
        Ok(url)
    }
}

impl NearbySearchProvider for GooglePlacesClient {
    fn search_nearby(
        &self,
        center: Coordinate,
        radius_m: u32,
        category: &PlaceType,
    ) -> Result<Vec<PlaceCandidate>, ProviderError> {
        let url = self.nearby_url(center, radius_m, category)?;
        debug!(%center, radius_m, %category, "places nearby search");

        let response = self.client.get(url).send().map_err(ProviderError::Http)?;
        let parsed: NearbySearchResponse = response.json().map_err(ProviderError::Json)?;
        parse_nearby_response(parsed)
    }
}
