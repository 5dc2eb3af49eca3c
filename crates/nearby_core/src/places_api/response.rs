#[derive(serde::Deserialize)]
pub(super) struct NearbySearchResponse {
    pub(super) status: String,
    #[serde(default)]
    pub(super) results: Vec<NearbyResult>,
    pub(super) error_message: Option<String>,
}

#[derive(serde::Deserialize)]
pub(super) struct NearbyResult {
    pub(super) place_id: String,
    #[serde(default)]
    pub(super) name: String,
    pub(super) geometry: NearbyGeometry,
    pub(super) vicinity: Option<String>,
    pub(super) rating: Option<f64>,
    pub(super) user_ratings_total: Option<u32>,
}

#[derive(serde::Deserialize)]
pub(super) struct NearbyGeometry {
    pub(super) location: NearbyLocation,
}

#[derive(serde::Deserialize)]
pub(super) struct NearbyLocation {
    pub(super) lat: f64,
    pub(super) lng: f64,
}
