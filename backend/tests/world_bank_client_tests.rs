//! `WorldBankClient` against a local server that mimics the indicator API.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use parking_lot::Mutex;
use serde_json::json;

use indicator_dashboard::config::IndicatorSettings;
use indicator_dashboard::services::{FetchError, IndicatorSource, WorldBankClient};

type Seen = Arc<Mutex<Vec<(String, String, HashMap<String, String>)>>>;

async fn indicator(
    State(seen): State<Seen>,
    Path((countries, code)): Path<(String, String)>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    seen.lock().push((countries, code.clone(), query));

    match code.as_str() {
        "SP.POP.GROW" => axum::Json(json!([
            {"page": 1, "pages": 1, "per_page": 1000, "total": 2},
            [
                {"indicator": {"id": "SP.POP.GROW", "value": "Population growth (annual %)"},
                 "country": {"id": "US", "value": "United States"},
                 "countryiso3code": "USA", "date": "2022", "value": 0.38,
                 "unit": "", "obs_status": "", "decimal": 1},
                {"indicator": {"id": "SP.POP.GROW", "value": "Population growth (annual %)"},
                 "country": {"id": "CN", "value": "China"},
                 "countryiso3code": "CHN", "date": "2022", "value": null,
                 "unit": "", "obs_status": "", "decimal": 1}
            ]
        ]))
        .into_response(),
        "EMPTY" => axum::Json(json!([
            {"message": [{"id": "175", "key": "Invalid format", "value": "No data"}]}
        ]))
        .into_response(),
        "HTML" => "<html>maintenance</html>".into_response(),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "upstream broke").into_response(),
    }
}

async fn spawn_source() -> (SocketAddr, Seen) {
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/v2/country/{countries}/indicator/{code}", get(indicator))
        .with_state(seen.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, seen)
}

fn client_for(addr: SocketAddr) -> WorldBankClient {
    WorldBankClient::new(IndicatorSettings {
        base_url: format!("http://{}", addr),
        timeout_secs: 5,
        ..Default::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_fetch_returns_observation_array() {
    let (addr, seen) = spawn_source().await;
    let client = client_for(addr);

    let observations = client.fetch("SP.POP.GROW").await.unwrap();

    assert_eq!(observations.len(), 2);
    assert_eq!(observations[0].country_name(), "United States");
    assert_eq!(observations[0].year(), Some(2022));
    assert_eq!(observations[0].value, Some(0.38));
    assert_eq!(observations[1].value, None);

    let seen = seen.lock();
    let (countries, code, query) = &seen[0];
    assert_eq!(countries, "USA;CHN;IND");
    assert_eq!(code, "SP.POP.GROW");
    assert_eq!(query.get("date").map(String::as_str), Some("2018:2022"));
    assert_eq!(query.get("format").map(String::as_str), Some("json"));
    assert_eq!(query.get("per_page").map(String::as_str), Some("1000"));
}

#[tokio::test]
async fn test_fetch_without_data_element_is_empty() {
    let (addr, _seen) = spawn_source().await;
    let client = client_for(addr);

    let observations = client.fetch("EMPTY").await.unwrap();

    assert!(observations.is_empty());
}

#[tokio::test]
async fn test_fetch_error_status_is_unavailable() {
    let (addr, _seen) = spawn_source().await;
    let client = client_for(addr);

    let err = client.fetch("NY.GDP.PCAP.CD").await.unwrap_err();

    match err {
        FetchError::Status { status, .. } => assert_eq!(status.as_u16(), 500),
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_non_json_body_is_unavailable() {
    let (addr, _seen) = spawn_source().await;
    let client = client_for(addr);

    let err = client.fetch("HTML").await.unwrap_err();

    assert!(matches!(err, FetchError::Decode { .. }));
}

#[tokio::test]
async fn test_fetch_connection_refused_is_unavailable() {
    // Grab a free port and release it so nothing is listening there.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(addr);
    let err = client.fetch("SP.POP.GROW").await.unwrap_err();

    assert!(matches!(err, FetchError::Transport { .. }));
}
