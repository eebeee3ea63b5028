//! HTTP client for the Google Places web service.
//!
//! Wraps `reqwest` with provider-specific error handling, API key
//! management, and typed response deserialization. Every endpoint checks
//! both the HTTP status and the JSON envelope `status` field — the provider
//! reports quota and auth failures with HTTP 200.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::{Client, Url};

use precall_core::{CandidateMatch, CompetitorEntry};

use crate::error::PlacesError;
use crate::types::{DetailsResponse, NearbyResponse, TextSearchResponse};

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place/";

/// The panel never carries more than three competitors.
const PANEL_SIZE: usize = 3;

/// Richer fields from a Place Details lookup, overlaid onto the resolved
/// business.
#[derive(Debug, Clone)]
pub struct PlaceDetails {
    pub phone: Option<String>,
    pub website: Option<String>,
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
    /// ISO-8601 timestamp of the most recent review.
    pub last_review_date: Option<String>,
    pub location: Option<(f64, f64)>,
}

/// Client for the Google Places web service.
pub struct PlacesClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl PlacesClient {
    /// Creates a client pointed at the production Places API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("precall/0.1 (pre-call-audit)")
            .build()?;

        // Keep exactly one trailing slash so Url::join appends path segments
        // instead of replacing the last one.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| PlacesError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Text Search: free-text candidates for `"{name} {city}"`.
    ///
    /// `ZERO_RESULTS` is a success with an empty candidate list.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::UnexpectedStatus`] on a non-2xx HTTP status.
    /// - [`PlacesError::Api`] if the envelope status is not OK/ZERO_RESULTS.
    /// - [`PlacesError::Deserialize`] if the body doesn't match the shape.
    pub async fn text_search(
        &self,
        business_name: &str,
        city: &str,
    ) -> Result<Vec<CandidateMatch>, PlacesError> {
        let query = format!("{business_name} {city}");
        let url = self.build_url("textsearch/json", &[("query", query.as_str())])?;
        let body = self.request_json(&url, "textsearch").await?;

        let parsed: TextSearchResponse =
            serde_json::from_value(body).map_err(|e| PlacesError::Deserialize {
                context: format!("textsearch(query={query})"),
                source: e,
            })?;
        check_envelope("textsearch", &parsed.status)?;

        tracing::debug!(
            query,
            result_count = parsed.results.len(),
            "text search completed"
        );

        Ok(parsed
            .results
            .into_iter()
            .map(|r| CandidateMatch {
                place_id: r.place_id,
                name: r.name.unwrap_or_default(),
                address: r.formatted_address.unwrap_or_default(),
                website: r.website,
                rating: r.rating,
                review_count: r.user_ratings_total,
            })
            .collect())
    }

    /// Place Details: phone, website, review stats, last review time, and
    /// coordinates for one place.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`PlacesClient::text_search`]; a missing `result`
    /// object is surfaced as [`PlacesError::Api`].
    pub async fn details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError> {
        let url = self.build_url(
            "details/json",
            &[
                ("place_id", place_id),
                (
                    "fields",
                    "name,formatted_address,formatted_phone_number,website,rating,\
                     user_ratings_total,reviews,geometry",
                ),
            ],
        )?;
        let body = self.request_json(&url, "details").await?;

        let parsed: DetailsResponse =
            serde_json::from_value(body).map_err(|e| PlacesError::Deserialize {
                context: format!("details(place_id={place_id})"),
                source: e,
            })?;
        check_envelope("details", &parsed.status)?;

        let result = parsed.result.ok_or_else(|| PlacesError::Api {
            endpoint: "details".to_owned(),
            status: "missing result object".to_owned(),
        })?;

        let last_review_date = result
            .reviews
            .iter()
            .filter_map(|r| r.time)
            .max()
            .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0))
            .map(|dt| dt.format("%Y-%m-%dT%H:%M:%SZ").to_string());

        let location = result
            .geometry
            .and_then(|g| g.location)
            .map(|l| (l.lat, l.lng));

        Ok(PlaceDetails {
            phone: result.formatted_phone_number,
            website: result.website,
            rating: result.rating,
            review_count: result.user_ratings_total,
            last_review_date,
            location,
        })
    }

    /// Nearby Search: the top-three competitor panel around a coordinate.
    ///
    /// Ranks are assigned from the provider's relevance order, 1..=3.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`PlacesClient::text_search`].
    pub async fn nearby_search(
        &self,
        latitude: f64,
        longitude: f64,
        category: &str,
        radius_meters: u32,
    ) -> Result<Vec<CompetitorEntry>, PlacesError> {
        let location = format!("{latitude},{longitude}");
        let radius = radius_meters.to_string();
        let url = self.build_url(
            "nearbysearch/json",
            &[
                ("location", location.as_str()),
                ("radius", radius.as_str()),
                ("type", place_type_for(category)),
            ],
        )?;
        let body = self.request_json(&url, "nearby_search").await?;

        let parsed: NearbyResponse =
            serde_json::from_value(body).map_err(|e| PlacesError::Deserialize {
                context: format!("nearby_search(location={location})"),
                source: e,
            })?;
        check_envelope("nearby_search", &parsed.status)?;

        Ok(parsed
            .results
            .into_iter()
            .take(PANEL_SIZE)
            .enumerate()
            .map(|(idx, r)| CompetitorEntry {
                rank: rank_from_index(idx),
                name: r.name.unwrap_or_default(),
                rating: r.rating,
                review_count: r.user_ratings_total,
                address: r.vicinity,
            })
            .collect())
    }

    fn build_url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, PlacesError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| PlacesError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
            pairs.append_pair("key", &self.api_key);
        }
        Ok(url)
    }

    async fn request_json(
        &self,
        url: &Url,
        endpoint: &str,
    ) -> Result<serde_json::Value, PlacesError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PlacesError::UnexpectedStatus {
                status: status.as_u16(),
                endpoint: endpoint.to_owned(),
            });
        }
        Ok(response.json().await?)
    }
}

/// Panel index to rank; the panel is at most three entries so this never
/// truncates.
#[allow(clippy::cast_possible_truncation)]
fn rank_from_index(idx: usize) -> u8 {
    (idx + 1) as u8
}

fn check_envelope(endpoint: &str, status: &str) -> Result<(), PlacesError> {
    if status == "OK" || status == "ZERO_RESULTS" {
        return Ok(());
    }
    Err(PlacesError::Api {
        endpoint: endpoint.to_owned(),
        status: status.to_owned(),
    })
}

/// Maps a service slug to the provider's place type. Every slug in the
/// current catalog is a pest-control vertical.
fn place_type_for(_category: &str) -> &'static str {
    "pest_control"
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
