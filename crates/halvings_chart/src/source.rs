use std::future::Future;

use halvings_shared_models::PricePoint;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;

use crate::normalize::normalize_histoday;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network response was not ok: {0}")]
    Status(StatusCode),
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Anything that can hand back a histoday-shaped JSON payload.
pub trait PriceSource {
    fn fetch(&self) -> impl Future<Output = Result<Value, FetchError>> + Send;
}

/// Reads the proxy's `/api/bitcoin` route.
#[derive(Debug, Clone)]
pub struct ProxySource {
    reqwest: Client,
    url: String,
}

impl ProxySource {
    pub fn new(proxy_base: &str) -> Self {
        Self::with_client(Client::new(), proxy_base)
    }

    pub fn with_client(reqwest: Client, proxy_base: &str) -> Self {
        Self {
            reqwest,
            url: format!("{}/api/bitcoin", proxy_base.trim_end_matches('/')),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl PriceSource for ProxySource {
    async fn fetch(&self) -> Result<Value, FetchError> {
        let response = self.reqwest.get(&self.url).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        Ok(response.json::<Value>().await?)
    }
}

/// Fetch-and-normalize. Never fails: any problem is logged and reported as
/// an empty series, which the renderer treats as "nothing to draw".
pub async fn fetch_series<P: PriceSource>(source: &P) -> Vec<PricePoint> {
    let body = match source.fetch().await {
        Ok(body) => body,
        Err(e) => {
            tracing::error!(error = %e, "Error fetching Bitcoin data");
            return Vec::new();
        }
    };

    match normalize_histoday(&body) {
        Ok(series) => {
            tracing::info!(points = series.len(), "Data fetched successfully");
            series
        }
        Err(e) => {
            tracing::error!(error = %e, "Error fetching Bitcoin data");
            Vec::new()
        }
    }
}
