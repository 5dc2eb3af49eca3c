pub mod analysis;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod export;
pub mod geo;
#[cfg(feature = "ip-location")]
pub mod ip_location;
pub mod places;
#[cfg(feature = "google-places")]
pub mod places_api;
pub mod presentation;
pub mod providers;
pub mod ranking;
pub mod session;
#[cfg(feature = "test-helpers")]
pub mod test_helpers;
pub mod worker;
