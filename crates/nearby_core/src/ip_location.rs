//! Approximate device location from the public IP address.
//!
//! Desktop machines rarely expose a position fix, so the default location
//! source asks an IP geolocation service (`ip-api.com` JSON API) instead.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::GeolocationError;
use crate::geo::Coordinate;
use crate::providers::GeolocationProvider;

pub const DEFAULT_IP_LOCATION_ENDPOINT: &str = "http://ip-api.com/json";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(8);

#[derive(Debug, Clone)]
pub struct IpGeolocation {
    client: Client,
    endpoint: String,
}

impl IpGeolocation {
    pub fn new(endpoint: &str) -> Result<Self, GeolocationError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| GeolocationError::Lookup(err.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }
}

impl GeolocationProvider for IpGeolocation {
    fn current_position(&self) -> Result<Coordinate, GeolocationError> {
        let url = format!("{}/?fields=status,message,lat,lon", self.endpoint);
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|err| GeolocationError::Lookup(err.to_string()))?;
        let parsed: IpLocationResponse = response
            .json()
            .map_err(|err| GeolocationError::Lookup(err.to_string()))?;
        let position = parse_ip_location(parsed)?;
        debug!(%position, "ip location resolved");
        Ok(position)
    }
}

#[derive(Deserialize)]
struct IpLocationResponse {
    status: String,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

fn parse_ip_location(resp: IpLocationResponse) -> Result<Coordinate, GeolocationError> {
    if resp.status != "success" {
        let reason = resp.message.unwrap_or(resp.status);
        // Private and reserved ranges have no location at all.
        if reason == "private range" || reason == "reserved range" {
            return Err(GeolocationError::Unsupported);
        }
        return Err(GeolocationError::Lookup(reason));
    }
    match (resp.lat, resp.lon) {
        (Some(lat), Some(lon)) => Ok(Coordinate::new(lat, lon)),
        _ => Err(GeolocationError::Lookup(
            "response missing coordinates".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<Coordinate, GeolocationError> {
        parse_ip_location(serde_json::from_str(json).expect("fixture should deserialize"))
    }

    #[test]
    fn success_yields_coordinate() {
        let position = parse(r#"{"status":"success","lat":30.0444,"lon":31.2357}"#);
        assert_eq!(position, Ok(Coordinate::new(30.0444, 31.2357)));
    }

    #[test]
    fn private_range_is_unsupported() {
        let position = parse(r#"{"status":"fail","message":"private range"}"#);
        assert_eq!(position, Err(GeolocationError::Unsupported));
    }

    #[test]
    fn other_failures_are_lookup_errors() {
        let position = parse(r#"{"status":"fail","message":"invalid query"}"#);
        assert_eq!(
            position,
            Err(GeolocationError::Lookup("invalid query".to_string()))
        );
        let missing = parse(r#"{"status":"success"}"#);
        assert!(matches!(missing, Err(GeolocationError::Lookup(_))));
    }
}
