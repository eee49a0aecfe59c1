use std::sync::Arc;

use halvings_cryptocompare::CryptocompareClient;

/// Shared application state, passed to route handlers via `axum::extract::State`.
///
/// Immutable after startup: requests never share anything mutable.
pub struct AppState {
    pub upstream: CryptocompareClient,
}

impl AppState {
    pub fn new(upstream: CryptocompareClient) -> Arc<Self> {
        Arc::new(Self { upstream })
    }
}
