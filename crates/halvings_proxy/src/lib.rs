//! Backend half of the halving chart: forwards CryptoCompare's BTC history
//! to the browser so the API key and CORS stay server-side.

pub mod error;
pub mod routes;
pub mod state;

pub use error::ProxyError;
pub use state::AppState;

use axum::Router;
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;

/// Full application router: API routes, `/health`, and, when a directory is
/// given, static files as the fallback.
pub fn app(state: Arc<AppState>, public_dir: Option<&Path>) -> Router {
    let router = Router::new()
        .merge(routes::api_router())
        .route("/health", axum::routing::get(health));

    let router = match public_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir).append_index_html_on_directories(true)),
        None => router,
    };

    router.with_state(state)
}

async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}
