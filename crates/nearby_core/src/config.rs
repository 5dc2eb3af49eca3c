//! Runtime configuration read from the environment.
//!
//! | variable | meaning |
//! |----------|---------|
//! | `NEARBY_MAPS_API_KEY` (or `GOOGLE_MAPS_API_KEY`) | places provider credential |
//! | `NEARBY_PLACES_ENDPOINT` | override for the nearby-search endpoint |
//! | `NEARBY_LOCATION` | `ip`, `off`, `none` or `lat,lng` |
//! | `NEARBY_DEFAULT_TYPE` | initial place type |
//! | `NEARBY_DEFAULT_RADIUS_M` | initial radius in metres |
//!
//! A missing credential is not an error: the config loads, and
//! [`NearbyConfig::availability`] lists what will not work.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::geo::Coordinate;
use crate::places::{PlaceType, SearchParameters};

pub const API_KEY_VAR: &str = "NEARBY_MAPS_API_KEY";
pub const FALLBACK_API_KEY_VAR: &str = "GOOGLE_MAPS_API_KEY";
pub const PLACES_ENDPOINT_VAR: &str = "NEARBY_PLACES_ENDPOINT";
pub const LOCATION_VAR: &str = "NEARBY_LOCATION";
pub const DEFAULT_TYPE_VAR: &str = "NEARBY_DEFAULT_TYPE";
pub const DEFAULT_RADIUS_VAR: &str = "NEARBY_DEFAULT_RADIUS_M";

pub const DEFAULT_PLACES_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/place";

/// Where the reference location comes from.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LocationSource {
    /// Approximate position from the public IP address.
    #[default]
    Ip,
    /// A fixed position, e.g. `26.8206,30.8025`.
    Fixed(Coordinate),
    /// Location sharing switched off by the user.
    Off,
    /// No location source on this machine.
    None,
}

impl FromStr for LocationSource {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "ip" => return Ok(LocationSource::Ip),
            "off" | "denied" => return Ok(LocationSource::Off),
            "none" => return Ok(LocationSource::None),
            _ => {}
        }
        let invalid = || ConfigError::InvalidLocation(trimmed.to_string());
        let (lat, lng) = trimmed.split_once(',').ok_or_else(invalid)?;
        let lat: f64 = lat.trim().parse().map_err(|_| invalid())?;
        let lng: f64 = lng.trim().parse().map_err(|_| invalid())?;
        let coordinate = Coordinate::new(lat, lng);
        if !coordinate.is_valid() {
            return Err(invalid());
        }
        Ok(LocationSource::Fixed(coordinate))
    }
}

impl fmt::Display for LocationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationSource::Ip => f.write_str("ip"),
            LocationSource::Fixed(coordinate) => write!(f, "{coordinate}"),
            LocationSource::Off => f.write_str("off"),
            LocationSource::None => f.write_str("none"),
        }
    }
}

/// Feature that cannot work with the current configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    NearbySearch,
    PlaceRatings,
}

impl Feature {
    pub fn label(&self) -> &'static str {
        match self {
            Feature::NearbySearch => "nearby search",
            Feature::PlaceRatings => "place ratings",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Availability {
    pub unavailable: Vec<Feature>,
}

impl Availability {
    pub fn is_complete(&self) -> bool {
        self.unavailable.is_empty()
    }

    /// One-line warning for the UI, `None` when everything is available.
    pub fn warning(&self) -> Option<String> {
        if self.is_complete() {
            return None;
        }
        let features: Vec<&str> = self.unavailable.iter().map(Feature::label).collect();
        Some(format!(
            "No API key found. Set {API_KEY_VAR}. Unavailable: {}",
            features.join(", ")
        ))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NearbyConfig {
    pub api_key: Option<String>,
    pub places_endpoint: String,
    pub location: LocationSource,
    pub search: SearchParameters,
}

impl Default for NearbyConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            places_endpoint: DEFAULT_PLACES_ENDPOINT.to_string(),
            location: LocationSource::default(),
            search: SearchParameters::default(),
        }
    }
}

impl NearbyConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key/value source (the environment, a test map).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        config.api_key = non_empty(API_KEY_VAR).or_else(|| non_empty(FALLBACK_API_KEY_VAR));
        if let Some(endpoint) = non_empty(PLACES_ENDPOINT_VAR) {
            config.places_endpoint = endpoint.trim_end_matches('/').to_string();
        }
        if let Some(location) = non_empty(LOCATION_VAR) {
            config.location = location.parse()?;
        }
        if let Some(kind) = non_empty(DEFAULT_TYPE_VAR) {
            config.search.place_type = PlaceType::from(kind);
        }
        if let Some(radius) = non_empty(DEFAULT_RADIUS_VAR) {
            let parsed: u32 = radius
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidRadius(radius.clone()))?;
            if parsed == 0 {
                return Err(ConfigError::InvalidRadius(radius));
            }
            config.search.radius_m = SearchParameters::clamp_radius(parsed);
        }
        Ok(config)
    }

    pub fn availability(&self) -> Availability {
        let unavailable = if self.api_key.is_some() {
            Vec::new()
        } else {
            vec![Feature::NearbySearch, Feature::PlaceRatings]
        };
        Availability { unavailable }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<NearbyConfig, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        NearbyConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults_and_warning() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config, NearbyConfig::default());
        let availability = config.availability();
        assert!(!availability.is_complete());
        assert!(availability.warning().unwrap().contains(API_KEY_VAR));
    }

    #[test]
    fn fallback_key_is_used() {
        let config = config_from(&[(FALLBACK_API_KEY_VAR, "abc")]).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("abc"));
        assert!(config.availability().warning().is_none());
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let config = config_from(&[(API_KEY_VAR, "  ")]).unwrap();
        assert!(config.api_key.is_none());
    }

    #[test]
    fn parses_location_and_defaults() {
        let config = config_from(&[
            (LOCATION_VAR, "26.8206, 30.8025"),
            (DEFAULT_TYPE_VAR, "ATM"),
            (DEFAULT_RADIUS_VAR, "1234"),
            (PLACES_ENDPOINT_VAR, "http://localhost:8080/"),
        ])
        .unwrap();
        assert_eq!(
            config.location,
            LocationSource::Fixed(Coordinate::new(26.8206, 30.8025))
        );
        assert_eq!(config.search.place_type, PlaceType::Atm);
        assert_eq!(config.search.radius_m, 1_200);
        assert_eq!(config.places_endpoint, "http://localhost:8080");
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            config_from(&[(LOCATION_VAR, "north pole")]).unwrap_err(),
            ConfigError::InvalidLocation("north pole".to_string())
        );
        assert_eq!(
            config_from(&[(LOCATION_VAR, "95,10")]).unwrap_err(),
            ConfigError::InvalidLocation("95,10".to_string())
        );
        assert!(matches!(
            config_from(&[(DEFAULT_RADIUS_VAR, "wide")]),
            Err(ConfigError::InvalidRadius(_))
        ));
        assert!(matches!(
            config_from(&[(DEFAULT_RADIUS_VAR, "0")]),
            Err(ConfigError::InvalidRadius(_))
        ));
    }

    #[test]
    fn location_keywords() {
        assert_eq!("IP".parse::<LocationSource>().unwrap(), LocationSource::Ip);
        assert_eq!("off".parse::<LocationSource>().unwrap(), LocationSource::Off);
        assert_eq!("none".parse::<LocationSource>().unwrap(), LocationSource::None);
    }
}
