use std::fs;
use std::path::PathBuf;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::get;
use serde_json::Value;
use tower::util::ServiceExt;

use fpl_compare::api::build_router;
use fpl_compare::config::Config;

fn test_config(fpl_base: &str, history_base: &str) -> Config {
    Config {
        bind_addr: "127.0.0.1:0".to_string(),
        fpl_base_url: fpl_base.trim_end_matches('/').to_string(),
        history_base_url: history_base.trim_end_matches('/').to_string(),
        history_seasons: vec!["2025-26".to_string(), "2024-25".to_string()],
    }
}

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let resp = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

fn fixture_body(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

/// Local stand-in for both upstreams, serving the fixture corpus.
async fn spawn_mock_upstream() -> String {
    let app = axum::Router::new()
        .route("/bootstrap-static/", get(|| async { fixture_body("bootstrap_static.json") }))
        .route("/fixtures/", get(|| async { fixture_body("fixtures.json") }))
        .route("/2025-26/en.1.json", get(|| async { fixture_body("en1_2025_26.json") }))
        .route("/2024-25/en.1.json", get(|| async { fixture_body("en1_2024_25.json") }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn health_reports_ok_and_disables_caching() {
    let app = build_router(test_config("http://127.0.0.1:9", "http://127.0.0.1:9"));
    let resp = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("cache-control").unwrap(),
        "no-store, no-cache, must-revalidate"
    );
    assert_eq!(resp.headers().get("pragma").unwrap(), "no-cache");

    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn missing_players_parameter_is_400() {
    let app = build_router(test_config("http://127.0.0.1:9", "http://127.0.0.1:9"));
    let (status, json) = get_json(app, "/compare").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Missing 'players' parameter");
}

#[tokio::test]
async fn blank_players_parameter_is_400() {
    let app = build_router(test_config("http://127.0.0.1:9", "http://127.0.0.1:9"));
    let (status, json) = get_json(app, "/compare?players=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Missing 'players' parameter");
}

#[tokio::test]
async fn unreachable_upstream_is_500_with_error_body() {
    // Nothing listens on the discard port, so the bootstrap fetch fails
    // before any report is assembled.
    let app = build_router(test_config("http://127.0.0.1:9", "http://127.0.0.1:9"));
    let (status, json) = get_json(app, "/compare?players=Salah").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json["error"].as_str().is_some_and(|msg| !msg.is_empty()));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn compare_end_to_end_against_mock_upstream() {
    let base = spawn_mock_upstream().await;
    let app = build_router(test_config(&base, &base));

    let (status, json) = get_json(app, "/compare?players=Salah,Salahh").await;
    assert_eq!(status, StatusCode::OK);

    let entries = json.as_array().expect("array body");
    assert_eq!(entries.len(), 2);

    let salah = &entries[0];
    assert_eq!(salah["player"], "Mohamed Salah");
    assert_eq!(salah["team"], "Liverpool");
    assert_eq!(salah["status"], "a");
    assert_eq!(salah["summary"], "2 likely to lose, 1 easy, 1 unknown");

    let fixtures = salah["fixtures"].as_array().expect("fixtures array");
    assert!(!fixtures.is_empty() && fixtures.len() <= 4);
    let first = &fixtures[0];
    assert_eq!(first["opponent"], "Arsenal");
    assert_eq!(first["home"], false);
    assert_eq!(first["label"], "Likely To Lose");
    let difficulty = first["difficulty"].as_u64().expect("difficulty int");
    assert!((1..=5).contains(&difficulty));
    assert_eq!(first["head_to_head"]["summary"], "1 wins, 1 draws, 0 losses");
    assert_eq!(first["head_to_head"]["matches"][0]["result"], "D");
    assert_eq!(first["head_to_head"]["matches"][0]["venue"], "Away");

    let miss = &entries[1];
    assert_eq!(miss["error"], "No match for 'Salahh'");
    assert_eq!(miss["suggestion"], "salah");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn broken_history_upstream_still_returns_reports() {
    let base = spawn_mock_upstream().await;
    // History pointed at the dead port: head-to-head blocks disappear but
    // the report itself still succeeds.
    let app = build_router(test_config(&base, "http://127.0.0.1:9"));

    let (status, json) = get_json(app, "/compare?players=Salah").await;
    assert_eq!(status, StatusCode::OK);
    let fixtures = json[0]["fixtures"].as_array().expect("fixtures array");
    assert!(!fixtures.is_empty());
    assert!(fixtures.iter().all(|f| f.get("head_to_head").is_none()));
}
