use reqwest::header::InvalidHeaderValue;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Connection, transport or body-read failure talking to CryptoCompare.
    #[error("Failed to fetch data: {0}")]
    Fetch(#[source] reqwest::Error),
    /// The body arrived but is not JSON.
    #[error("Failed to parse data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid API key: {0}")]
    InvalidApiKey(#[from] InvalidHeaderValue),
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}
