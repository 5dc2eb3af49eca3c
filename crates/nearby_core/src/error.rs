//! Error taxonomy shared by the session, the providers and the adapters.

use thiserror::Error;

/// Failure states the presentation layer can end up in.
///
/// None of these are fatal. `EmptyResultSet` is not an error state either: it
/// describes the `NoResults` status so the UI can show a message for it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("no map provider credential configured")]
    ConfigMissing,
    #[error("map provider failed to load: {0}")]
    ScriptLoadFailure(String),
    #[error("location unavailable: {0}")]
    LocationUnavailable(String),
    #[error("location permission denied")]
    LocationDenied,
    #[error("nearby search failed with status {status}")]
    ProviderQueryFailure { status: String },
    #[error("no places found")]
    EmptyResultSet,
}

/// An event arrived that the current session state does not accept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("cannot {event} while {state}")]
    InvalidTransition {
        state: &'static str,
        event: &'static str,
    },
    #[error("no reference location yet")]
    NoReference,
    #[error("a search is already in flight")]
    SearchInFlight,
    #[error("search #{0} was superseded")]
    StaleSearch(u64),
    #[error("no place with id {0} in the current results")]
    UnknownPlace(String),
    #[error("there are no results to select from")]
    EmptySelection,
}

/// Device location failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("location permission denied")]
    PermissionDenied,
    #[error("geolocation is not supported")]
    Unsupported,
    #[error("timed out waiting for a position")]
    Timeout,
    #[error("location lookup failed: {0}")]
    Lookup(String),
}

/// Nearby-search provider failures.
///
/// A successful query with zero candidates is `Ok(vec![])`, not an error.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[cfg(feature = "reqwest")]
    #[error("http request failed: {0}")]
    Http(#[source] reqwest::Error),
    #[cfg(feature = "reqwest")]
    #[error("malformed provider response: {0}")]
    Json(#[source] reqwest::Error),
    #[error("provider returned status {status}")]
    Status {
        status: String,
        message: Option<String>,
    },
    #[error("provider unavailable: {0}")]
    Unavailable(String),
}

impl ProviderError {
    /// Status string reported to the session (`"HTTP_ERROR"` for transport failures).
    pub fn status(&self) -> String {
        match self {
            #[cfg(feature = "reqwest")]
            ProviderError::Http(_) => "HTTP_ERROR".to_string(),
            #[cfg(feature = "reqwest")]
            ProviderError::Json(_) => "INVALID_RESPONSE".to_string(),
            ProviderError::Status { status, .. } => status.clone(),
            ProviderError::Unavailable(_) => "UNAVAILABLE".to_string(),
        }
    }
}

/// Invalid configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid location `{0}` (expected `ip`, `off` or `lat,lng`)")]
    InvalidLocation(String),
    #[error("invalid radius `{0}`")]
    InvalidRadius(String),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no results to export")]
    Empty,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_reports_provider_status() {
        let err = ProviderError::Status {
            status: "REQUEST_DENIED".to_string(),
            message: Some("The provided API key is invalid.".to_string()),
        };
        assert_eq!(err.status(), "REQUEST_DENIED");
        assert_eq!(err.to_string(), "provider returned status REQUEST_DENIED");
    }

    #[test]
    fn transition_error_messages() {
        let err = TransitionError::InvalidTransition {
            state: "idle",
            event: "search",
        };
        assert_eq!(err.to_string(), "cannot search while idle");
    }
}
