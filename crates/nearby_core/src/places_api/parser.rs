use crate::error::ProviderError;
use crate::geo::Coordinate;
use crate::places::PlaceCandidate;

use super::response::{NearbyResult, NearbySearchResponse};

const STATUS_OK: &str = "OK";
const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

/// Map a Nearby Search payload to candidates in provider order.
///
/// `ZERO_RESULTS` is a successful empty search; every other non-OK status is
/// an error carrying the provider's message.
pub(super) fn parse_nearby_response(
    resp: NearbySearchResponse,
) -> Result<Vec<PlaceCandidate>, ProviderError> {
    match resp.status.as_str() {
        STATUS_OK => Ok(resp.results.into_iter().map(candidate_from_result).collect()),
        STATUS_ZERO_RESULTS => Ok(Vec::new()),
        _ => Err(ProviderError::Status {
            status: resp.status,
            message: resp.error_message.filter(|msg| !msg.trim().is_empty()),
        }),
    }
}

fn candidate_from_result(result: NearbyResult) -> PlaceCandidate {
    let location = result.geometry.location;
    PlaceCandidate {
        id: result.place_id,
        name: result.name,
        coordinate: Coordinate::new(location.lat, location.lng),
        vicinity: result.vicinity.unwrap_or_default(),
        // The web service reports unrated places as 0 as well as omitting the field.
        rating: result.rating.filter(|rating| *rating > 0.0),
        user_ratings_total: result.user_ratings_total.unwrap_or(0),
    }
}
