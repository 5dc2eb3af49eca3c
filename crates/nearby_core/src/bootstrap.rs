//! Wire providers from configuration and bring a session to `Locating`.
//!
//! Mirrors the page start-up: without a credential the session reports
//! `ConfigMissing`; if the places provider cannot be constructed it reports
//! `ScriptLoadFailure`; otherwise it becomes ready and asks for a position.

use std::sync::Arc;

use tracing::info;

use crate::config::{LocationSource, NearbyConfig};
use crate::error::SessionError;
use crate::providers::{
    DeniedGeolocation, FixedGeolocation, GeolocationProvider, NearbySearchProvider,
    UnsupportedGeolocation,
};
use crate::session::Session;
use crate::worker::ProviderWorker;

/// Location source for the configured mode.
pub fn geolocation_for(config: &NearbyConfig) -> Arc<dyn GeolocationProvider> {
    match config.location {
        LocationSource::Fixed(position) => Arc::new(FixedGeolocation(position)),
        LocationSource::Off => Arc::new(DeniedGeolocation),
        LocationSource::None => Arc::new(UnsupportedGeolocation),
        LocationSource::Ip => ip_geolocation(),
    }
}

#[cfg(feature = "ip-location")]
fn ip_geolocation() -> Arc<dyn GeolocationProvider> {
    use crate::ip_location::{IpGeolocation, DEFAULT_IP_LOCATION_ENDPOINT};
    match IpGeolocation::new(DEFAULT_IP_LOCATION_ENDPOINT) {
        Ok(provider) => Arc::new(provider),
        Err(err) => {
            tracing::warn!(error = %err, "ip location unavailable");
            Arc::new(UnsupportedGeolocation)
        }
    }
}

#[cfg(not(feature = "ip-location"))]
fn ip_geolocation() -> Arc<dyn GeolocationProvider> {
    Arc::new(UnsupportedGeolocation)
}

/// Places provider for the configured credential.
pub fn search_provider_for(
    config: &NearbyConfig,
) -> Result<Arc<dyn NearbySearchProvider>, SessionError> {
    let api_key = config.api_key.as_deref().ok_or(SessionError::ConfigMissing)?;
    google_places(&config.places_endpoint, api_key)
}

#[cfg(feature = "google-places")]
fn google_places(
    endpoint: &str,
    api_key: &str,
) -> Result<Arc<dyn NearbySearchProvider>, SessionError> {
    crate::places_api::GooglePlacesClient::new(endpoint, api_key)
        .map(|client| Arc::new(client) as Arc<dyn NearbySearchProvider>)
        .map_err(|err| SessionError::ScriptLoadFailure(err.to_string()))
}

#[cfg(not(feature = "google-places"))]
fn google_places(
    _endpoint: &str,
    _api_key: &str,
) -> Result<Arc<dyn NearbySearchProvider>, SessionError> {
    Err(SessionError::ScriptLoadFailure(
        "built without the google-places feature".to_string(),
    ))
}

/// Start a session from configuration.
///
/// Returns the worker when the provider is ready; a location request is
/// already in flight on it.
pub fn start_session(config: &NearbyConfig) -> (Session, Option<ProviderWorker>) {
    match search_provider_for(config) {
        Ok(search) => start_with(config, geolocation_for(config), search),
        Err(err) => {
            let mut session = Session::new(config.search.clone());
            // A fresh session is idle, so both reports are accepted.
            let _ = match err {
                SessionError::ConfigMissing => session.config_missing(),
                other => session.provider_failed(other.to_string()),
            };
            (session, None)
        }
    }
}

/// Start a session with explicit providers (used by tests and fixtures).
pub fn start_with(
    config: &NearbyConfig,
    geolocation: Arc<dyn GeolocationProvider>,
    search: Arc<dyn NearbySearchProvider>,
) -> (Session, Option<ProviderWorker>) {
    let mut session = Session::new(config.search.clone());
    let mut worker = ProviderWorker::new(geolocation, search);
    let _ = session.provider_ready();
    info!(location = %config.location, "provider ready; requesting location");
    worker.request_location();
    (session, Some(worker))
}
