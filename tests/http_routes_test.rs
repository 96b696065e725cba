
use std::collections::HashMap;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use devx_mood::api::{build_app, AppState};
use harness::{
    closed_url, pipeline, settings, spawn_truncated_measure, spawn_upstream, TWO_SENSORS,
};
use tower::ServiceExt;

fn app(src: HashMap<String, String>) -> Router {
    build_app(AppState::new(pipeline(), Arc::new(src)))
}

async fn get(app: &Router, path: &str) -> (StatusCode, String) {
    let resp = app
        .clone()
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .expect("request");
    let status = resp.status();
    let body = to_bytes(resp.into_body(), 1 << 20).await.expect("body");
    (status, String::from_utf8_lossy(&body).into_owned())
}

#[tokio::test]
async fn dashboard_renders_sad_report() {
    let upstream = spawn_upstream(TWO_SENSORS).await;
    let app = app(settings(&upstream.activate_url(), &upstream.measure_url(), "60"));

    let (status, body) = get(&app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("DevX Mood Analyzer"));
    assert!(body.contains("happiness is at 50.00 percent"));
    assert!(body.contains("does not meet the 60 percent threshold"));
    assert!(body.contains("All sensors activated successfully"));
    assert!(body.contains("<table border='1'>"));
}

#[tokio::test]
async fn dashboard_renders_header_only_on_bad_threshold() {
    let upstream = spawn_upstream(TWO_SENSORS).await;
    let app = app(settings(&upstream.activate_url(), &upstream.measure_url(), "lots"));

    let (status, body) = get(&app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("DevX Mood Analyzer"));
    assert!(!body.contains("happiness"));
    assert!(!body.contains("<table"));
    assert_eq!(upstream.activate_hits(), 0);
}

#[tokio::test]
async fn dashboard_renders_header_only_on_malformed_body() {
    let upstream = spawn_upstream("{oops").await;
    let app = app(settings(&upstream.activate_url(), &upstream.measure_url(), "40"));

    let (status, body) = get(&app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains("<table"));
}

#[tokio::test]
async fn dashboard_renders_header_only_on_truncated_body() {
    let upstream = spawn_upstream(TWO_SENSORS).await;
    let truncated = spawn_truncated_measure().await;

    for policy in ["strict", "best-effort"] {
        let mut src = settings(&upstream.activate_url(), &truncated, "40");
        src.insert("MOOD_DECODE_POLICY".into(), policy.into());
        let app = app(src);

        let (status, body) = get(&app, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("DevX Mood Analyzer"), "{policy}");
        assert!(!body.contains("happiness"), "{policy}");
        assert!(!body.contains("<table"), "{policy}");

        let (_, body) = get(&app, "/api/snapshot").await;
        let v: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(v["generation"], 0, "{policy}");
    }
}

#[tokio::test]
async fn mood_api_returns_report() {
    let upstream = spawn_upstream(TWO_SENSORS).await;
    let app = app(settings(&upstream.activate_url(), &upstream.measure_url(), "40"));

    let (status, body) = get(&app, "/api/mood").await;
    assert_eq!(status, StatusCode::OK);

    let v: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(v["mood"], "happy");
    assert_eq!(v["happy_percent"]["value"], 50.0);
    assert_eq!(v["rows"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn mood_api_maps_errors_to_status() {
    let upstream = spawn_upstream(TWO_SENSORS).await;

    let broken = app(settings(&closed_url(), &upstream.measure_url(), "40"));
    let (status, body) = get(&broken, "/api/mood").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let v: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(v["stage"], "activation");

    let misconfigured = app(settings(&upstream.activate_url(), &upstream.measure_url(), ""));
    let (status, body) = get(&misconfigured, "/api/mood").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let v: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(v["stage"], "configuration");
}

#[tokio::test]
async fn snapshot_and_health_reflect_last_fetch() {
    let upstream = spawn_upstream(TWO_SENSORS).await;
    let app = app(settings(&upstream.activate_url(), &upstream.measure_url(), "40"));

    let (_, body) = get(&app, "/api/snapshot").await;
    let v: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(v["generation"], 0);
    assert_eq!(v["count"], 0);
    assert!(v["updated_at"].is_null());

    get(&app, "/").await;

    let (status, body) = get(&app, "/api/snapshot").await;
    assert_eq!(status, StatusCode::OK);
    let v: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(v["generation"], 1);
    assert_eq!(v["count"], 2);
    assert_eq!(v["sensors"][0]["mood"], "happy");

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    let v: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(v["status"], "ok");
    assert_eq!(v["sensors"], 2);
}
