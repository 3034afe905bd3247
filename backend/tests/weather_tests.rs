//! Weather endpoint integration tests
//!
//! Drives the full router in-process against a fake provider:
//! - compact body shape and byte layout
//! - default `units` / `exclude` forwarding
//! - error responses under the `respond` failure policy

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use owm_proxy::{create_app, AppState, Config, FailurePolicy};

fn app_for(upstream: &str, on_failure: FailurePolicy) -> Router {
    let mut config = Config::default();
    config.upstream.base_url = upstream.to_string();
    config.server.on_failure = on_failure;
    create_app(AppState::new(config))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Option<String>, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    (status, content_type, String::from_utf8(body.to_vec()).unwrap())
}

fn one_call_body() -> Value {
    json!({
        "lat": 10,
        "lon": 20,
        "timezone": "Asia/Bangkok",
        "timezone_offset": 25200,
        "current": {
            "dt": 1700000000,
            "temp": 21.5,
            "humidity": 60,
            "wind_deg": 180
        }
    })
}

// ============================================================================
// Happy path
// ============================================================================

#[tokio::test]
async fn test_owm_returns_compact_snapshot() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/onecall"))
        .respond_with(ResponseTemplate::new(200).set_body_json(one_call_body()))
        .expect(1)
        .mount(&upstream)
        .await;

    let app = app_for(&upstream.uri(), FailurePolicy::Respond);
    let (status, content_type, body) = get(app, "/owm?lat=10&lon=20&appid=KEY").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(
        body,
        r#"{"t":21.5,"f":0,"p":0,"h":60,"d":0,"u":0,"c":0,"v":0,"ws":0,"wd":180}"#
    );
}

#[tokio::test]
async fn test_owm_omitted_units_and_exclude_use_defaults() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/onecall"))
        .and(query_param("lat", "10"))
        .and(query_param("lon", "20"))
        .and(query_param("units", "metric"))
        .and(query_param("exclude", "minutely,hourly,daily"))
        .and(query_param("appid", "KEY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(one_call_body()))
        .expect(1)
        .mount(&upstream)
        .await;

    let app = app_for(&upstream.uri(), FailurePolicy::Respond);
    let (status, _, _) = get(app, "/owm?lat=10&lon=20&appid=KEY").await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_owm_explicit_units_and_exclude_are_forwarded() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/onecall"))
        .and(query_param("units", "imperial"))
        .and(query_param("exclude", "hourly"))
        .respond_with(ResponseTemplate::new(200).set_body_json(one_call_body()))
        .expect(1)
        .mount(&upstream)
        .await;

    let app = app_for(&upstream.uri(), FailurePolicy::Respond);
    let (status, _, _) = get(
        app,
        "/owm?lat=10&lon=20&units=imperial&exclude=hourly&appid=KEY",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_owm_repeated_keys_forward_first_value() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/onecall"))
        .and(query_param("lat", "1"))
        .and(query_param("lon", "3"))
        .and(query_param("appid", "K"))
        .respond_with(ResponseTemplate::new(200).set_body_json(one_call_body()))
        .expect(1)
        .mount(&upstream)
        .await;

    let app = app_for(&upstream.uri(), FailurePolicy::Respond);
    let (status, _, body) = get(app, "/owm?lat=1&lat=2&lon=3&appid=K").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with(r#"{"t":21.5,"#));

    let requests = upstream.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let lats: Vec<String> = requests[0]
        .url
        .query_pairs()
        .filter(|(k, _)| k == "lat")
        .map(|(_, v)| v.into_owned())
        .collect();
    assert_eq!(lats, vec!["1".to_string()]);
}

#[tokio::test]
async fn test_owm_missing_coordinates_are_forwarded_empty() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/onecall"))
        .and(query_param("lat", ""))
        .and(query_param("lon", ""))
        .and(query_param("appid", ""))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "cod": "400",
            "message": "Nothing to geocode"
        })))
        .expect(1)
        .mount(&upstream)
        .await;

    let app = app_for(&upstream.uri(), FailurePolicy::Respond);
    let (status, _, body) = get(app, "/owm").await;

    // Provider errors decode leniently into an all-zero snapshot
    assert_eq!(status, StatusCode::OK);
    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["t"], json!(0));
    assert_eq!(value["wd"], json!(0));
}

#[tokio::test]
async fn test_owm_empty_current_is_all_zero() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/onecall"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "lat": 10, "lon": 20, "current": {}
        })))
        .mount(&upstream)
        .await;

    let app = app_for(&upstream.uri(), FailurePolicy::Respond);
    let (status, _, body) = get(app, "/owm?lat=10&lon=20&appid=KEY").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        r#"{"t":0,"f":0,"p":0,"h":0,"d":0,"u":0,"c":0,"v":0,"ws":0,"wd":0}"#
    );
}

#[tokio::test]
async fn test_owm_makes_one_upstream_call_per_request() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/onecall"))
        .respond_with(ResponseTemplate::new(200).set_body_json(one_call_body()))
        .expect(2)
        .mount(&upstream)
        .await;

    let app = app_for(&upstream.uri(), FailurePolicy::Respond);
    get(app.clone(), "/owm?lat=10&lon=20&appid=KEY").await;
    get(app, "/owm?lat=11&lon=21&appid=KEY").await;
}

// ============================================================================
// Failures under the respond policy
// ============================================================================

#[tokio::test]
async fn test_owm_malformed_upstream_body_is_bad_gateway() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/onecall"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&upstream)
        .await;

    let app = app_for(&upstream.uri(), FailurePolicy::Respond);
    let (status, _, body) = get(app, "/owm?lat=10&lon=20&appid=KEY").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["error"]["code"], "UPSTREAM_INVALID_RESPONSE");
}

#[tokio::test]
async fn test_owm_unreachable_upstream_is_bad_gateway() {
    // Bind then release a port so nothing is listening on it
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    let app = app_for(&format!("http://127.0.0.1:{}", port), FailurePolicy::Respond);
    let (status, _, body) = get(app, "/owm?lat=10&lon=20&appid=KEY").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["error"]["code"], "UPSTREAM_UNAVAILABLE");
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_does_not_touch_upstream() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&upstream)
        .await;

    let app = app_for(&upstream.uri(), FailurePolicy::Terminate);
    let (status, _, body) = get(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let app = app_for("http://127.0.0.1:1", FailurePolicy::Terminate);
    let (status, _, _) = get(app, "/weather").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
