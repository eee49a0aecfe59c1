use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use halvings_cryptocompare::UpstreamError;
use serde_json::json;
use thiserror::Error;

/// Errors surfaced by the proxy to its callers. Both kinds answer with
/// `500 {"error": "<message>"}`.
#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("Failed to fetch data")]
    Fetch,
    #[error("Failed to parse data")]
    Parse,
}

impl From<&UpstreamError> for ProxyError {
    fn from(e: &UpstreamError) -> Self {
        match e {
            UpstreamError::Parse(_) => Self::Parse,
            _ => Self::Fetch,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let body = json!({ "error": self.to_string() });
        (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
    }
}
