mod common;

use std::sync::Arc;

use axum::{
    Router,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde_json::{Value, json};

use sponowd::{
    server::{AppState, widget_router},
    spotify::{auth::Credentials, player::SpotifyClient},
};

use common::{MemoryStore, offline_token_cache, spawn_server, test_credentials};

/// An app whose facade cannot do anything: no credentials, cold cache,
/// unroutable endpoints. Every underlying call fails.
fn broken_app_state() -> Arc<AppState> {
    let creds = Credentials {
        client_id: None,
        client_secret: None,
        refresh_token: None,
    };
    let tokens = offline_token_cache(Arc::new(MemoryStore::new()), creds);
    let spotify =
        SpotifyClient::with_api_base(reqwest::Client::new(), tokens, "http://127.0.0.1:1/me");
    Arc::new(AppState { spotify })
}

#[tokio::test]
async fn snapshot_is_empty_and_ok_when_every_call_fails() {
    let addr = spawn_server(widget_router(broken_app_state())).await;

    let response = reqwest::get(format!("http://{}/api/spotify", addr))
        .await
        .unwrap();

    // Failures are swallowed; the widget always gets a valid snapshot
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"currentTrack": null, "recentTracks": []}));
}

#[tokio::test]
async fn control_surface_reports_failure_with_500() {
    let addr = spawn_server(widget_router(broken_app_state())).await;

    let client = reqwest::Client::new();
    for action in ["play", "pause", "next", "previous"] {
        let response = client
            .post(format!("http://{}/api/spotify/player/{}", addr, action))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!({"success": false}));
    }
}

#[tokio::test]
async fn unknown_action_is_rejected_by_the_extractor() {
    let addr = spawn_server(widget_router(broken_app_state())).await;

    let response = reqwest::Client::new()
        .post(format!("http://{}/api/spotify/player/shuffle", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_reports_ok() {
    let addr = spawn_server(widget_router(broken_app_state())).await;

    let response = reqwest::get(format!("http://{}/health", addr)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn snapshot_and_control_work_against_a_healthy_upstream() {
    // Mock upstream: one playing track, one history item, accepting commands
    let upstream = Router::new()
        .route(
            "/me/player/currently-playing",
            get(|| async {
                Json(json!({
                    "is_playing": true,
                    "progress_ms": 10_000,
                    "item": {
                        "name": "Song",
                        "artists": [{"name": "A"}, {"name": "B"}],
                        "album": {"name": "Album", "images": [
                            {"url": "https://images.test/640", "width": 640, "height": 640},
                        ]},
                        "external_urls": {"spotify": "https://open.spotify.com/track/s"},
                        "duration_ms": 180_000,
                    },
                }))
            }),
        )
        .route(
            "/me/player/recently-played",
            get(|| async {
                Json(json!({
                    "items": [
                        {"track": {
                            "name": "Earlier",
                            "artists": [{"name": "C"}],
                            "album": {"name": "Older", "images": [
                                {"url": "https://images.test/300", "width": 300, "height": 300},
                            ]},
                            "external_urls": {"spotify": "https://open.spotify.com/track/e"},
                            "duration_ms": 120_000,
                        }},
                    ],
                }))
            }),
        )
        .route(
            "/me/player/next",
            post(|| async { StatusCode::NO_CONTENT }),
        );
    let upstream_addr = spawn_server(upstream).await;

    let store = Arc::new(MemoryStore::seeded("access-token"));
    let tokens = offline_token_cache(store, test_credentials());
    let spotify = SpotifyClient::with_api_base(
        reqwest::Client::new(),
        tokens,
        format!("http://{}/me", upstream_addr),
    );
    let addr = spawn_server(widget_router(Arc::new(AppState { spotify }))).await;

    let response = reqwest::get(format!("http://{}/api/spotify", addr))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["currentTrack"]["name"], "Song");
    assert_eq!(body["currentTrack"]["artist"], "A, B");
    assert_eq!(body["currentTrack"]["albumArt"], "https://images.test/640");
    assert_eq!(body["currentTrack"]["isPlaying"], true);
    assert_eq!(body["recentTracks"][0]["name"], "Earlier");
    assert_eq!(body["recentTracks"][0]["progressMs"], 0);
    assert_eq!(body["recentTracks"][0]["isPlaying"], false);

    let response = reqwest::Client::new()
        .post(format!("http://{}/api/spotify/player/next", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"success": true}));
}
