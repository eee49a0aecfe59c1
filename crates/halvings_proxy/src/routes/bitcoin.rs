use axum::{Json, Router, extract::State, routing::get};
use chrono::Utc;
use halvings_cryptocompare::histoday::{Histoday, HistodayParams};
use serde_json::Value;
use std::sync::Arc;

use crate::error::ProxyError;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/bitcoin", get(bitcoin_history))
}

/// GET /api/bitcoin: full BTC/USD daily history, forwarded verbatim.
///
/// Every upstream parameter is fixed here; the window always ends now.
/// One outbound attempt per request.
async fn bitcoin_history(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ProxyError> {
    let params = HistodayParams::btc_usd_full_history(Utc::now().timestamp());

    match state.upstream.call_raw::<Histoday>(&params).await {
        Ok(body) => Ok(Json(body)),
        Err(e) => {
            let err = ProxyError::from(&e);
            tracing::error!(error = %e, "{err}");
            Err(err)
        }
    }
}
