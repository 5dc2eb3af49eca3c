//! Runs blocking provider calls off the UI thread.
//!
//! Each request spawns a short-lived thread that reports back over an mpsc
//! channel. The owner polls [`ProviderWorker::drain_events`] (once per frame in
//! the UI) and feeds the events into the [`Session`] through
//! [`ProviderWorker::apply`].

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{GeolocationError, ProviderError, TransitionError};
use crate::geo::Coordinate;
use crate::places::PlaceCandidate;
use crate::providers::{GeolocationProvider, NearbySearchProvider};
use crate::session::{SearchRequest, SearchTicket, Session};

/// Bounded wait for the first position fix.
pub const GEOLOCATION_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug)]
pub enum WorkerEvent {
    Located(Result<Coordinate, GeolocationError>),
    SearchCompleted {
        ticket: SearchTicket,
        outcome: Result<Vec<PlaceCandidate>, ProviderError>,
    },
}

pub struct ProviderWorker {
    geolocation: Arc<dyn GeolocationProvider>,
    search: Arc<dyn NearbySearchProvider>,
    geolocation_timeout: Duration,
    sender: Sender<WorkerEvent>,
    receiver: Receiver<WorkerEvent>,
    pending: usize,
}

impl ProviderWorker {
    pub fn new(
        geolocation: Arc<dyn GeolocationProvider>,
        search: Arc<dyn NearbySearchProvider>,
    ) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            geolocation,
            search,
            geolocation_timeout: GEOLOCATION_TIMEOUT,
            sender,
            receiver,
            pending: 0,
        }
    }

    pub fn with_geolocation_timeout(mut self, timeout: Duration) -> Self {
        self.geolocation_timeout = timeout;
        self
    }

    /// Number of requests whose events have not been drained yet.
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Ask for the current position; the answer arrives as [`WorkerEvent::Located`].
    ///
    /// A provider that does not answer within the timeout yields
    /// [`GeolocationError::Timeout`]. The lookup thread is left to finish on
    /// its own; its late answer is discarded.
    pub fn request_location(&mut self) {
        self.pending += 1;
        let provider = Arc::clone(&self.geolocation);
        let sender = self.sender.clone();
        let timeout = self.geolocation_timeout;
        std::thread::spawn(move || {
            let (fix_tx, fix_rx) = mpsc::channel();
            std::thread::spawn(move || {
                let _ = fix_tx.send(provider.current_position());
            });
            let result = match fix_rx.recv_timeout(timeout) {
                Ok(result) => result,
                Err(RecvTimeoutError::Timeout) => Err(GeolocationError::Timeout),
                Err(RecvTimeoutError::Disconnected) => Err(GeolocationError::Lookup(
                    "location provider stopped without answering".to_string(),
                )),
            };
            let _ = sender.send(WorkerEvent::Located(result));
        });
    }

    /// Dispatch a search; the answer arrives as [`WorkerEvent::SearchCompleted`].
    pub fn dispatch_search(&mut self, request: SearchRequest) {
        self.pending += 1;
        let provider = Arc::clone(&self.search);
        let sender = self.sender.clone();
        std::thread::spawn(move || {
            let outcome =
                provider.search_nearby(request.center, request.radius_m, &request.place_type);
            let _ = sender.send(WorkerEvent::SearchCompleted {
                ticket: request.ticket,
                outcome,
            });
        });
    }

    pub fn drain_events(&mut self) -> Vec<WorkerEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.receiver.try_recv() {
            self.pending = self.pending.saturating_sub(1);
            events.push(event);
        }
        events
    }

    /// Block until the next event arrives or `timeout` passes.
    pub fn wait_event(&mut self, timeout: Duration) -> Option<WorkerEvent> {
        let event = self.receiver.recv_timeout(timeout).ok()?;
        self.pending = self.pending.saturating_sub(1);
        Some(event)
    }

    /// Feed one event into the session.
    pub fn apply(session: &mut Session, event: WorkerEvent) -> Result<(), TransitionError> {
        let applied = match event {
            WorkerEvent::Located(Ok(position)) => session.location_acquired(position),
            WorkerEvent::Located(Err(err)) => session.location_failed(err),
            WorkerEvent::SearchCompleted { ticket, outcome } => {
                session.complete_search(ticket, outcome).map(|_| ())
            }
        };
        applied.inspect_err(|err| match err {
            TransitionError::StaleSearch(_) => debug!(error = %err, "ignored worker event"),
            _ => warn!(error = %err, "worker event rejected"),
        })
    }
}
