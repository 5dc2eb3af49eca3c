//! Presentation state for one map screen.
//!
//! [`Session`] holds the query parameters, the reference location, the current
//! [`SearchResultSet`] and the selection. It only changes through the
//! transition methods below, which mirror the screen's lifecycle:
//!
//! ```text
//! Idle ──provider_ready──▶ Locating ──location_acquired──▶ Located
//!   │                        │                                │
//!   │ config_missing /       │ location_failed                │ begin_search
//!   │ provider_failed        ▼                                ▼
//!   └──────────────────▶   Error  ◀──provider failure──── Searching
//!                                                          │      │
//!                                  Results / NoResults ◀───┘      │
//!                                        │ begin_search           │
//!                                        └───────────────────────▶┘
//! ```
//!
//! Events that are not legal in the current state return a
//! [`TransitionError`] and leave the session untouched.

use serde::Serialize;
use tracing::{debug, warn};

use crate::analysis::QuickAnalysis;
use crate::error::{GeolocationError, ProviderError, SessionError, TransitionError};
use crate::geo::Coordinate;
use crate::places::{PlaceCandidate, PlaceType, RankedPlace, SearchParameters};
use crate::ranking::{rank, SearchResultSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchStatus {
    Idle,
    Locating,
    Located,
    Searching,
    Results,
    NoResults,
    Error(SessionError),
}

impl SearchStatus {
    pub fn name(&self) -> &'static str {
        match self {
            SearchStatus::Idle => "idle",
            SearchStatus::Locating => "locating",
            SearchStatus::Located => "located",
            SearchStatus::Searching => "searching",
            SearchStatus::Results => "results",
            SearchStatus::NoResults => "no_results",
            SearchStatus::Error(_) => "error",
        }
    }
}

/// Identifies one dispatched search so late completions can be recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SearchTicket(pub u64);

/// Everything the nearby-search provider needs for one dispatched search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub ticket: SearchTicket,
    pub center: Coordinate,
    pub radius_m: u32,
    pub place_type: PlaceType,
}

#[derive(Debug, Clone)]
pub struct Session {
    status: SearchStatus,
    params: SearchParameters,
    reference: Option<Coordinate>,
    results: SearchResultSet,
    selection: Option<String>,
    inflight: Option<SearchTicket>,
    next_ticket: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SearchParameters::default())
    }
}

impl Session {
    pub fn new(params: SearchParameters) -> Self {
        Self {
            status: SearchStatus::Idle,
            params,
            reference: None,
            results: SearchResultSet::empty(),
            selection: None,
            inflight: None,
            next_ticket: 1,
        }
    }

    pub fn status(&self) -> &SearchStatus {
        &self.status
    }

    pub fn params(&self) -> &SearchParameters {
        &self.params
    }

    pub fn reference(&self) -> Option<Coordinate> {
        self.reference
    }

    pub fn results(&self) -> &SearchResultSet {
        &self.results
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    pub fn selected_place(&self) -> Option<&RankedPlace> {
        self.selection
            .as_deref()
            .and_then(|id| self.results.find(id))
    }

    pub fn analysis(&self) -> QuickAnalysis {
        QuickAnalysis::from_results(&self.results)
    }

    /// The error behind the current status, if any.
    ///
    /// `NoResults` reports [`SessionError::EmptyResultSet`] so the UI can show
    /// why the list is empty.
    pub fn failure(&self) -> Option<SessionError> {
        match &self.status {
            SearchStatus::Error(err) => Some(err.clone()),
            SearchStatus::NoResults => Some(SessionError::EmptyResultSet),
            _ => None,
        }
    }

    pub fn is_searching(&self) -> bool {
        self.status == SearchStatus::Searching
    }

    /// Whether "Find Nearby" should be enabled.
    pub fn can_search(&self) -> bool {
        self.reference.is_some() && self.accepts_search()
    }

    pub fn set_place_type(&mut self, place_type: PlaceType) {
        self.params.place_type = place_type;
    }

    /// Update the radius, snapped into the slider range.
    pub fn set_radius(&mut self, radius_m: u32) {
        self.params.radius_m = SearchParameters::clamp_radius(radius_m);
    }

    /// No provider credential: stay usable but report the missing configuration.
    pub fn config_missing(&mut self) -> Result<(), TransitionError> {
        self.expect_status(SearchStatus::Idle, "report missing configuration")?;
        warn!("map provider credential missing; nearby search unavailable");
        self.enter(SearchStatus::Error(SessionError::ConfigMissing));
        Ok(())
    }

    pub fn provider_failed(&mut self, reason: impl Into<String>) -> Result<(), TransitionError> {
        self.expect_status(SearchStatus::Idle, "report provider failure")?;
        let reason = reason.into();
        warn!(%reason, "map provider failed to load");
        self.enter(SearchStatus::Error(SessionError::ScriptLoadFailure(reason)));
        Ok(())
    }

    /// The provider integration is ready; the caller should now request a position.
    pub fn provider_ready(&mut self) -> Result<(), TransitionError> {
        self.expect_status(SearchStatus::Idle, "start locating")?;
        self.enter(SearchStatus::Locating);
        Ok(())
    }

    pub fn location_acquired(&mut self, position: Coordinate) -> Result<(), TransitionError> {
        self.expect_status(SearchStatus::Locating, "accept a position")?;
        debug!(%position, "reference location set");
        self.reference = Some(position);
        self.enter(SearchStatus::Located);
        Ok(())
    }

    pub fn location_failed(&mut self, err: GeolocationError) -> Result<(), TransitionError> {
        self.expect_status(SearchStatus::Locating, "report a location failure")?;
        warn!(error = %err, "could not determine location");
        let failure = match err {
            GeolocationError::PermissionDenied => SessionError::LocationDenied,
            other => SessionError::LocationUnavailable(other.to_string()),
        };
        self.enter(SearchStatus::Error(failure));
        Ok(())
    }

    /// Start a search with the current parameters.
    ///
    /// Clears the selection and the previous results before handing back the
    /// request to dispatch.
    pub fn begin_search(&mut self) -> Result<SearchRequest, TransitionError> {
        if self.is_searching() {
            return Err(TransitionError::SearchInFlight);
        }
        if !self.accepts_search() {
            return Err(TransitionError::InvalidTransition {
                state: self.status.name(),
                event: "search",
            });
        }
        let center = self.reference.ok_or(TransitionError::NoReference)?;

        let ticket = SearchTicket(self.next_ticket);
        self.next_ticket += 1;
        self.inflight = Some(ticket);
        self.selection = None;
        self.results = SearchResultSet::empty();
        self.enter(SearchStatus::Searching);

        let request = SearchRequest {
            ticket,
            center,
            radius_m: self.params.radius_m,
            place_type: self.params.place_type.clone(),
        };
        debug!(
            ticket = ticket.0,
            place_type = %request.place_type,
            radius_m = request.radius_m,
            "search dispatched"
        );
        Ok(request)
    }

    /// Apply a provider response for the search identified by `ticket`.
    pub fn complete_search(
        &mut self,
        ticket: SearchTicket,
        outcome: Result<Vec<PlaceCandidate>, ProviderError>,
    ) -> Result<&SearchResultSet, TransitionError> {
        if self.inflight != Some(ticket) {
            debug!(ticket = ticket.0, "dropping response for superseded search");
            return Err(TransitionError::StaleSearch(ticket.0));
        }
        self.expect_status(SearchStatus::Searching, "complete a search")?;
        // Searching is only entered through begin_search, which sets the reference.
        let reference = self.reference.ok_or(TransitionError::NoReference)?;
        self.inflight = None;

        match outcome {
            Ok(candidates) if candidates.is_empty() => {
                self.results = SearchResultSet::empty();
                self.enter(SearchStatus::NoResults);
            }
            Ok(candidates) => {
                self.results = rank(reference, candidates);
                debug!(count = self.results.len(), "search returned places");
                self.enter(SearchStatus::Results);
            }
            Err(err) => {
                warn!(error = %err, "nearby search failed");
                self.results = SearchResultSet::empty();
                self.enter(SearchStatus::Error(SessionError::ProviderQueryFailure {
                    status: err.status(),
                }));
            }
        }
        Ok(&self.results)
    }

    /// Select a place in the current results; returns where to focus the map.
    pub fn select(&mut self, place_id: &str) -> Result<Coordinate, TransitionError> {
        if self.results.is_empty() {
            return Err(TransitionError::EmptySelection);
        }
        let coordinate = self
            .results
            .find(place_id)
            .map(RankedPlace::coordinate)
            .ok_or_else(|| TransitionError::UnknownPlace(place_id.to_string()))?;
        self.selection = Some(place_id.to_string());
        Ok(coordinate)
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    fn accepts_search(&self) -> bool {
        matches!(
            self.status,
            SearchStatus::Located
                | SearchStatus::Results
                | SearchStatus::NoResults
                | SearchStatus::Error(SessionError::ProviderQueryFailure { .. })
        )
    }

    fn expect_status(
        &self,
        expected: SearchStatus,
        event: &'static str,
    ) -> Result<(), TransitionError> {
        if self.status == expected {
            Ok(())
        } else {
            Err(TransitionError::InvalidTransition {
                state: self.status.name(),
                event,
            })
        }
    }

    fn enter(&mut self, next: SearchStatus) {
        debug!(from = self.status.name(), to = next.name(), "session transition");
        self.status = next;
    }
}
