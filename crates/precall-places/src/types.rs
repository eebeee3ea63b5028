//! Raw response shapes from the Google Places web service and SerpAPI.
//!
//! ## Observed envelope behavior
//!
//! Every Places endpoint wraps its payload with a `status` string.
//! `"OK"` and `"ZERO_RESULTS"` are both success shapes — the latter simply
//! carries an empty `results` array. Anything else (`"REQUEST_DENIED"`,
//! `"OVER_QUERY_LIMIT"`, `"INVALID_REQUEST"`) is an API-level error even
//! though the HTTP status is 200.
//!
//! Text Search results rarely include a `website` field; the authoritative
//! website comes from Place Details. Both shapes are modeled with optional
//! fields and mapped to the shared report types at the client boundary.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct TextSearchResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<PlaceResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlaceResult {
    pub place_id: Option<String>,
    pub name: Option<String>,
    pub formatted_address: Option<String>,
    pub website: Option<String>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DetailsResponse {
    pub status: String,
    pub result: Option<DetailsResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DetailsResult {
    pub formatted_phone_number: Option<String>,
    pub website: Option<String>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u32>,
    #[serde(default)]
    pub reviews: Vec<ReviewItem>,
    pub geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReviewItem {
    /// Unix timestamp of the review.
    pub time: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Geometry {
    pub location: Option<LatLng>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NearbyResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<NearbyResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NearbyResult {
    pub name: Option<String>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u32>,
    /// Truncated neighbourhood-level address, not a full street address.
    pub vicinity: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SerpResponse {
    #[serde(default)]
    pub local_results: Vec<SerpLocalResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SerpLocalResult {
    pub title: Option<String>,
    pub rating: Option<f64>,
    pub reviews: Option<u32>,
    pub address: Option<String>,
}
