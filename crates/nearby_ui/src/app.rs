//! Application state for the nearby map screen.

mod map_view;

pub use map_view::MapView;

use tracing::{debug, info, warn};

use nearby_core::bootstrap::start_session;
use nearby_core::config::{Availability, NearbyConfig};
use nearby_core::geo::Coordinate;
use nearby_core::places::PlaceType;
use nearby_core::presentation;
use nearby_core::providers::DEFAULT_ZOOM;
use nearby_core::session::{SearchStatus, Session};
use nearby_core::worker::{ProviderWorker, WorkerEvent};

/// Where the map sits before a position is known.
pub const INITIAL_CENTER: Coordinate = Coordinate::new(26.8206, 30.8025);

pub struct NearbyApp {
    pub session: Session,
    pub worker: Option<ProviderWorker>,
    pub map: MapView,
    pub availability: Availability,
    /// Type currently chosen in the selector; pushed into the session on search.
    pub place_type: PlaceType,
    pub radius_m: u32,
    pub last_error: Option<String>,
}

impl NearbyApp {
    pub fn new(config: &NearbyConfig) -> Self {
        let (session, worker) = start_session(config);
        Self::with_session(config, session, worker)
    }

    pub fn with_session(
        config: &NearbyConfig,
        session: Session,
        worker: Option<ProviderWorker>,
    ) -> Self {
        let availability = config.availability();
        if let Some(warning) = availability.warning() {
            warn!("{warning}");
        }
        let params = session.params().clone();
        Self {
            session,
            worker,
            map: MapView::new(INITIAL_CENTER, DEFAULT_ZOOM),
            availability,
            place_type: params.place_type,
            radius_m: params.radius_m,
            last_error: None,
        }
    }

    pub fn has_pending_work(&self) -> bool {
        self.worker.as_ref().is_some_and(|worker| worker.pending() > 0)
    }

    /// Drain provider answers and marker clicks. Called once per frame.
    pub fn poll(&mut self) {
        if let Some(worker) = self.worker.as_mut() {
            for event in worker.drain_events() {
                let located = matches!(event, WorkerEvent::Located(Ok(_)));
                let completed = matches!(event, WorkerEvent::SearchCompleted { .. });
                if ProviderWorker::apply(&mut self.session, event).is_err() {
                    continue;
                }
                if located {
                    if let Some(reference) = self.session.reference() {
                        self.map.pan_to(reference);
                    }
                }
                if completed {
                    self.on_search_completed();
                }
            }
        }
        presentation::apply_marker_clicks(&mut self.session, &mut self.map);
    }

    fn on_search_completed(&mut self) {
        match self.session.status() {
            SearchStatus::Results => {
                info!(found = self.session.results().len(), "search completed");
                presentation::show_results(&self.session, &mut self.map);
            }
            SearchStatus::NoResults => info!("search returned no places"),
            SearchStatus::Error(err) => warn!(error = %err, "search failed"),
            other => debug!(status = other.name(), "unexpected status after search"),
        }
    }

    pub fn find_nearby(&mut self) {
        self.session.set_place_type(self.place_type.clone());
        self.session.set_radius(self.radius_m);
        self.radius_m = self.session.params().radius_m;

        let Some(worker) = self.worker.as_mut() else {
            self.last_error = Some("No places provider available".to_string());
            return;
        };
        match self.session.begin_search() {
            Ok(request) => {
                self.last_error = None;
                presentation::clear_results(&mut self.map);
                info!(
                    place_type = request.place_type.as_str(),
                    radius_m = request.radius_m,
                    "searching"
                );
                worker.dispatch_search(request);
            }
            Err(err) => {
                debug!(error = %err, "search not started");
                self.last_error = Some(err.to_string());
            }
        }
    }

    pub fn focus_place(&mut self, place_id: &str) {
        if let Err(err) = presentation::focus_place(&mut self.session, &mut self.map, place_id) {
            debug!(error = %err, "focus ignored");
        }
    }

    /// Pan back to the reference location, keeping the zoom.
    pub fn center_on_me(&mut self) {
        if let Some(reference) = self.session.reference() {
            self.map.pan_to(reference);
        }
    }

    /// One-line status for the sidebar.
    pub fn status_line(&self) -> String {
        match self.session.status() {
            SearchStatus::Idle => "Starting…".to_string(),
            SearchStatus::Locating => "Locating you…".to_string(),
            SearchStatus::Located => "Ready".to_string(),
            SearchStatus::Searching => "Searching…".to_string(),
            SearchStatus::Results => format!("{} places found", self.session.results().len()),
            SearchStatus::NoResults => "No places found".to_string(),
            SearchStatus::Error(err) => err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use nearby_core::bootstrap::start_with;
    use nearby_core::config::LocationSource;
    use nearby_core::providers::FOCUS_ZOOM;
    use nearby_core::providers::{FixedGeolocation, FixtureSearchProvider};
    use nearby_core::test_helpers::{candidate_at, sample_provider, test_reference};

    fn fixture_app(search: FixtureSearchProvider) -> NearbyApp {
        let config = NearbyConfig {
            api_key: Some("test-key".to_string()),
            location: LocationSource::Fixed(test_reference()),
            ..NearbyConfig::default()
        };
        let (session, worker) = start_with(
            &config,
            Arc::new(FixedGeolocation(test_reference())),
            Arc::new(search),
        );
        NearbyApp::with_session(&config, session, worker)
    }

    fn poll_until_idle(app: &mut NearbyApp) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while app.has_pending_work() && Instant::now() < deadline {
            app.poll();
            std::thread::sleep(Duration::from_millis(5));
        }
        app.poll();
    }

    #[test]
    fn missing_key_shows_alert_and_disables_search() {
        let mut app = NearbyApp::new(&NearbyConfig::default());
        assert!(!app.availability.is_complete());
        assert!(!app.session.can_search());
        app.find_nearby();
        assert!(app.last_error.is_some());
    }

    #[test]
    fn search_populates_markers_in_rank_order() {
        let mut app = fixture_app(sample_provider());
        poll_until_idle(&mut app);
        assert_eq!(app.session.status(), &SearchStatus::Located);
        assert_eq!(app.map.center(), test_reference());

        app.find_nearby();
        assert_eq!(app.status_line(), "Searching…");
        poll_until_idle(&mut app);

        let labels: Vec<(&str, &str)> = app
            .map
            .markers()
            .iter()
            .map(|m| (m.place_id.as_str(), m.label.as_str()))
            .collect();
        assert_eq!(labels, [("c", "1"), ("b", "2"), ("a", "3")]);
        assert_eq!(app.status_line(), "3 places found");
    }

    #[test]
    fn marker_click_selects_and_list_focus_zooms() {
        let mut app = fixture_app(
            FixtureSearchProvider::new()
                .with_place(PlaceType::Pharmacy, candidate_at("near", 0.001, 0.0))
                .with_place(PlaceType::Pharmacy, candidate_at("far", 0.005, 0.0)),
        );
        poll_until_idle(&mut app);
        app.find_nearby();
        poll_until_idle(&mut app);

        app.map.click_marker("far");
        app.poll();
        assert_eq!(app.session.selection(), Some("far"));

        app.focus_place("near");
        assert_eq!(app.session.selection(), Some("near"));
        assert_eq!(app.map.zoom(), FOCUS_ZOOM);
    }

    #[test]
    fn radius_is_snapped_before_search() {
        let mut app = fixture_app(sample_provider());
        poll_until_idle(&mut app);
        app.radius_m = 12_345;
        app.find_nearby();
        assert_eq!(app.radius_m, 5_000);
        poll_until_idle(&mut app);
    }
}
