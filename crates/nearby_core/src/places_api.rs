//! Google Places "Nearby Search" adapter.
//!
//! This module wraps a blocking HTTP client for the Places web service and
//! turns its JSON payload into [`PlaceCandidate`](crate::places::PlaceCandidate)s,
//! so the rest of the crate never sees the wire format.

mod client;
mod parser;
mod response;

pub use client::GooglePlacesClient;
