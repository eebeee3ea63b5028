use thiserror::Error;

/// Errors from scanner construction.
///
/// Scanning itself never fails: per-page fetch errors are tolerated and an
/// unreachable site simply yields a `no_data` capture signal.
#[derive(Debug, Error)]
pub enum ScannerError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}
