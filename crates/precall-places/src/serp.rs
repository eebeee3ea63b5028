//! SerpAPI local-pack client, used as a fallback panel source when Nearby
//! Search fails.

use std::time::Duration;

use reqwest::{Client, Url};

use precall_core::CompetitorEntry;

use crate::error::PlacesError;
use crate::types::SerpResponse;

const DEFAULT_BASE_URL: &str = "https://serpapi.com/search";

/// A search-engine-derived local pack.
///
/// `available` distinguishes "the query produced no local pack at all" from
/// an error: the caller reports visibility as unavailable in that case.
#[derive(Debug, Clone)]
pub struct LocalPack {
    pub available: bool,
    pub entries: Vec<CompetitorEntry>,
}

/// Client for SerpAPI local-pack queries.
pub struct SerpClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl SerpClient {
    /// Creates a client pointed at production SerpAPI.
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
    /// Returns [`PlacesError::Http`] or [`PlacesError::InvalidBaseUrl`].
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
        let base_url = Url::parse(base_url).map_err(|e| PlacesError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Fetches the local pack for a search query like `"pest control Austin"`.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::UnexpectedStatus`] on a non-2xx HTTP status.
    /// - [`PlacesError::Deserialize`] if the body doesn't match the shape.
    pub async fn local_pack(&self, query: &str) -> Result<LocalPack, PlacesError> {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("engine", "google")
            .append_pair("location", "United States")
            .append_pair("api_key", &self.api_key);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PlacesError::UnexpectedStatus {
                status: status.as_u16(),
                endpoint: "serp_local_pack".to_owned(),
            });
        }

        let body: serde_json::Value = response.json().await?;
        let parsed: SerpResponse =
            serde_json::from_value(body).map_err(|e| PlacesError::Deserialize {
                context: format!("serp_local_pack(query={query})"),
                source: e,
            })?;

        let entries: Vec<CompetitorEntry> = parsed
            .local_results
            .into_iter()
            .take(3)
            .enumerate()
            .map(|(idx, item)| CompetitorEntry {
                rank: u8::try_from(idx + 1).unwrap_or(u8::MAX),
                name: item.title.unwrap_or_default(),
                rating: item.rating,
                review_count: item.reviews,
                address: item.address,
            })
            .collect();

        tracing::debug!(query, result_count = entries.len(), "serp local pack");

        Ok(LocalPack {
            available: !entries.is_empty(),
            entries,
        })
    }
}
