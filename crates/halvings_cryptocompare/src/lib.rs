pub mod error;
pub mod histoday;
pub mod method;

pub use error::UpstreamError;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, ClientBuilder};

pub const BASE_URL: &str = "https://min-api.cryptocompare.com";

#[derive(Debug, Clone)]
pub struct CryptocompareClient {
    reqwest: Client,
    base_url: String,
}

impl CryptocompareClient {
    /// Builds a client for the public API. The key is optional: histoday
    /// answers anonymous calls, only with tighter rate limits.
    pub fn new(api_key: Option<&str>) -> Result<Self, UpstreamError> {
        let mut headers = HeaderMap::new();
        if let Some(api_key) = api_key.filter(|k| !k.is_empty()) {
            headers.insert(
                "Authorization",
                HeaderValue::from_str(format!("Apikey {api_key}").as_str())?,
            );
        }

        let reqwest = ClientBuilder::new()
            .default_headers(headers)
            .build()
            .map_err(UpstreamError::Client)?;

        Ok(Self {
            reqwest,
            base_url: BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Issues exactly one GET and hands back the body as untyped JSON.
    ///
    /// The upstream status code is not inspected: whatever JSON CryptoCompare
    /// answers with (including its own `"Response": "Error"` envelopes) is
    /// returned as-is.
    pub async fn call_raw<M: method::Method>(
        &self,
        params: &M::Params,
    ) -> Result<serde_json::Value, UpstreamError> {
        let url = self.url(M::PATH);
        tracing::debug!(%url, "calling upstream");

        let body = self
            .reqwest
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(UpstreamError::Fetch)?
            .bytes()
            .await
            .map_err(UpstreamError::Fetch)?;

        Ok(serde_json::from_slice(&body)?)
    }
}
