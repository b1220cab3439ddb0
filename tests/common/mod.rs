// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::extract::RawQuery;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use club_dashboard::config::{Config, DEFAULT_TOKEN_LENGTH};
use club_dashboard::routes::create_router;
use club_dashboard::services::vault::encrypt_token;
use club_dashboard::AppState;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const PASSWORD: &str = "club-passphrase";

/// A token of exactly the configured length.
#[allow(dead_code)]
pub fn test_token() -> String {
    let prefix = "sv=2024-01-01&ss=b&srt=o&sp=r&sig=";
    format!("{}{}", prefix, "a".repeat(DEFAULT_TOKEN_LENGTH - prefix.len()))
}

/// The test token encrypted with `PASSWORD`.
#[allow(dead_code)]
pub fn encrypted_test_token() -> String {
    encrypt_token(&test_token(), PASSWORD).expect("Failed to encrypt test token")
}

/// Export payload with three athletes and one malformed entry.
#[allow(dead_code)]
pub fn sample_export() -> String {
    serde_json::json!([
        {
            "athlete": {"firstname": "alice", "lastname": "smith"},
            "name": "Morning Run",
            "distance": 5000.0,
            "elapsed_time": 1800,
            "total_elevation_gain": 25.0,
            "sport_type": "Run",
            "timestamp": "2024-01-01T07:00:00Z"
        },
        {
            "athlete": {"firstname": "alice", "lastname": "smith"},
            "name": "Zwift",
            "distance": 10000.0,
            "elapsed_time": 1200,
            "total_elevation_gain": 80.0,
            "sport_type": "VirtualRide",
            "timestamp": "2024-01-02T18:30:00Z"
        },
        {
            "athlete": {"firstname": "bob", "lastname": "jones"},
            "name": "Five-a-side",
            "distance": 4000.0,
            "elapsed_time": 3600,
            "total_elevation_gain": 0.0,
            "sport_type": "Soccer",
            "timestamp": "2024-01-03T20:00:00Z"
        },
        {
            "athlete": {"firstname": "carol", "lastname": "ng"},
            "name": "Stretch",
            "distance": 0.0,
            "elapsed_time": 0,
            "total_elevation_gain": 0.0,
            "sport_type": "Yoga",
            "timestamp": "2024-01-03T06:00:00Z"
        },
        {
            "athlete": {"firstname": "dave"},
            "name": "Incomplete"
        }
    ])
    .to_string()
}

/// Serve `body` at `/records.json`, only for the exact query string `token`.
/// Returns the records URL.
#[allow(dead_code)]
pub async fn spawn_records_server(token: String, status: StatusCode, body: String) -> String {
    spawn_counting_records_server(token, status, body).await.0
}

/// Like `spawn_records_server`, also returning a count of requests received.
#[allow(dead_code)]
pub async fn spawn_counting_records_server(
    token: String,
    status: StatusCode,
    body: String,
) -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let app = Router::new().route(
        "/records.json",
        get(move |RawQuery(query): RawQuery| {
            counter.fetch_add(1, Ordering::SeqCst);
            let token = token.clone();
            let body = body.clone();
            async move {
                if query.as_deref() != Some(token.as_str()) {
                    return (StatusCode::FORBIDDEN, String::new());
                }
                (status, body)
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind records server");
    let addr = listener.local_addr().expect("No local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Records server failed");
    });

    (format!("http://{}/records.json", addr), hits)
}

/// Test config pointing at `records_url` with the encrypted test token.
#[allow(dead_code)]
pub fn test_config(records_url: String) -> Config {
    Config {
        records_url,
        encrypted_token: encrypted_test_token(),
        challenge_group: vec!["Bob Jones".to_string()],
        ..Config::test_default()
    }
}

/// Create a test app backed by a local records server.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub async fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let url = spawn_records_server(test_token(), StatusCode::OK, sample_export()).await;
    let state = Arc::new(AppState::from_config(test_config(url)));
    (create_router(state.clone()), state)
}
