use std::collections::HashMap;

use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use halvings_cryptocompare::histoday::{Histoday, HistodayParams};
use halvings_cryptocompare::{CryptocompareClient, UpstreamError};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::test;

async fn spawn_upstream(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn echo(headers: HeaderMap, Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    Json(json!({
        "Response": "Success",
        "Message": "",
        "HasWarning": false,
        "Type": 100,
        "Echo": { "query": query, "auth": auth },
        "Data": {
            "Aggregated": false,
            "TimeFrom": 1609459200,
            "TimeTo": 1609632000,
            "Data": [
                { "time": 1609459200, "high": 29600.0, "low": 28800.0, "open": 28900.0, "close": 29000.0 },
                { "time": 1609545600, "high": null, "low": null, "open": null, "close": null },
                { "time": 1609632000, "high": 33000.0, "low": 31000.0, "open": 32100.0, "close": 32000.0 }
            ]
        }
    }))
}

#[test]
pub async fn raw_call_returns_body_verbatim() {
    let base = spawn_upstream(Router::new().route("/data/v2/histoday", get(echo))).await;
    let client = CryptocompareClient::new(None).unwrap().with_base_url(base);

    let body = client
        .call_raw::<Histoday>(&HistodayParams::btc_usd_full_history(1_609_632_000))
        .await
        .expect("Failed to fetch histoday");

    let query = &body["Echo"]["query"];
    assert_eq!(query["fsym"], "BTC");
    assert_eq!(query["tsym"], "USD");
    assert_eq!(query["limit"], "2000");
    assert_eq!(query["toTs"], "1609632000");
    assert_eq!(query["aggregate"], "1");
    assert_eq!(query["e"], "CCCAGG");
    assert_eq!(query["allData"], "true");
    assert_eq!(body["Echo"]["auth"], Value::Null);
    assert_eq!(body["Data"]["Data"].as_array().unwrap().len(), 3);
}

#[test]
pub async fn api_key_is_sent_as_authorization_header() {
    let base = spawn_upstream(Router::new().route("/data/v2/histoday", get(echo))).await;
    let client = CryptocompareClient::new(Some("secret")).unwrap().with_base_url(base);

    let body = client
        .call_raw::<Histoday>(&HistodayParams::btc_usd_full_history(0))
        .await
        .unwrap();

    assert_eq!(body["Echo"]["auth"], "Apikey secret");
}

#[test]
pub async fn raw_call_passes_error_status_json_through() {
    let app = Router::new().route(
        "/data/v2/histoday",
        get(|| async {
            (
                StatusCode::TOO_MANY_REQUESTS,
                Json(json!({ "Response": "Error", "Message": "You are over your rate limit" })),
            )
        }),
    );
    let base = spawn_upstream(app).await;
    let client = CryptocompareClient::new(None).unwrap().with_base_url(base);

    let body = client
        .call_raw::<Histoday>(&HistodayParams::btc_usd_full_history(0))
        .await
        .unwrap();

    assert_eq!(body["Response"], "Error");
}

#[test]
pub async fn malformed_body_is_a_parse_failure() {
    let app = Router::new().route("/data/v2/histoday", get(|| async { "<html>oops</html>" }));
    let base = spawn_upstream(app).await;
    let client = CryptocompareClient::new(None).unwrap().with_base_url(base);

    let err = client
        .call_raw::<Histoday>(&HistodayParams::btc_usd_full_history(0))
        .await
        .unwrap_err();

    assert!(matches!(err, UpstreamError::Parse(_)), "got {err:?}");
}

#[test]
pub async fn refused_connection_is_a_fetch_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = CryptocompareClient::new(None)
        .unwrap()
        .with_base_url(format!("http://{addr}"));

    let err = client
        .call_raw::<Histoday>(&HistodayParams::btc_usd_full_history(0))
        .await
        .unwrap_err();

    assert!(matches!(err, UpstreamError::Fetch(_)), "got {err:?}");
}
