#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use nearby_core::config::{LocationSource, NearbyConfig};
use nearby_core::geo::Coordinate;
use nearby_core::providers::{FixtureSearchProvider, GeolocationProvider, NearbySearchProvider};
use nearby_core::session::Session;
use nearby_core::worker::ProviderWorker;

pub const EVENT_WAIT: Duration = Duration::from_secs(5);

/// Config with a credential and a fixed location, so nothing touches the network.
pub fn fixed_config(position: Coordinate) -> NearbyConfig {
    NearbyConfig {
        api_key: Some("test-key".to_string()),
        location: LocationSource::Fixed(position),
        ..NearbyConfig::default()
    }
}

/// Wait for one worker event and apply it to the session.
pub fn pump_one(worker: &mut ProviderWorker, session: &mut Session) {
    let event = worker
        .wait_event(EVENT_WAIT)
        .expect("worker should answer within the wait window");
    let _ = ProviderWorker::apply(session, event);
}

/// Start a session against the given providers and wait for the location answer.
pub fn located_session(
    geolocation: Arc<dyn GeolocationProvider>,
    search: Arc<dyn NearbySearchProvider>,
) -> (Session, ProviderWorker) {
    let config = NearbyConfig::default();
    let (mut session, worker) = nearby_core::bootstrap::start_with(&config, geolocation, search);
    let mut worker = worker.expect("providers were supplied");
    pump_one(&mut worker, &mut session);
    (session, worker)
}

/// Run one search to completion.
pub fn search_once(session: &mut Session, worker: &mut ProviderWorker) {
    let request = session.begin_search().expect("search should be allowed");
    worker.dispatch_search(request);
    pump_one(worker, session);
}

pub fn fixture(provider: FixtureSearchProvider) -> Arc<dyn NearbySearchProvider> {
    Arc::new(provider)
}
