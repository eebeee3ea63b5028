use thiserror::Error;

/// Errors returned by the place-search clients.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx HTTP status from the provider.
    #[error("unexpected HTTP status {status} from {endpoint}")]
    UnexpectedStatus { status: u16, endpoint: String },

    /// The provider's JSON envelope carried a non-success status string.
    #[error("places API error from {endpoint}: {status}")]
    Api { endpoint: String, status: String },

    /// The response body could not be deserialized into the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The base URL passed to `with_base_url` was not parseable.
    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl PlacesError {
    /// Upstream HTTP status for the debug call log, when one exists.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            PlacesError::UnexpectedStatus { status, .. } => Some(*status),
            PlacesError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
