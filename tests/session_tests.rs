// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session lifecycle: unlock, failed re-unlock, concurrent readers.

use axum::http::StatusCode;
use club_dashboard::error::AppError;
use club_dashboard::models::FilterContext;
use club_dashboard::AppState;
use std::sync::Arc;

mod common;
use common::{sample_export, spawn_records_server, test_config, test_token, PASSWORD};

const NUM_CONCURRENT_READERS: usize = 16;

#[tokio::test]
async fn test_failed_unlock_keeps_previous_records() {
    let url = spawn_records_server(test_token(), StatusCode::OK, sample_export()).await;
    let state = AppState::from_config(test_config(url));

    let summary = state.session.unlock(PASSWORD).await.unwrap();
    assert_eq!(summary.records, 4);

    let err = state.session.unlock("wrong-passphrase").await.unwrap_err();
    assert!(matches!(err, AppError::InvalidPassword));

    let store = state.session.require().await.unwrap();
    assert_eq!(store.len(), 4);
}

#[tokio::test]
async fn test_empty_export_counts_as_not_loaded() {
    let url = spawn_records_server(test_token(), StatusCode::OK, "[]".to_string()).await;
    let state = AppState::from_config(test_config(url));

    let summary = state.session.unlock(PASSWORD).await.unwrap();
    assert_eq!(summary.records, 0);
    assert!(matches!(
        state.session.require().await.unwrap_err(),
        AppError::NotLoaded
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_readers_see_consistent_snapshots() {
    let url = spawn_records_server(test_token(), StatusCode::OK, sample_export()).await;
    let state = Arc::new(AppState::from_config(test_config(url)));
    state.session.unlock(PASSWORD).await.unwrap();

    let mut handles = vec![];
    for i in 0..NUM_CONCURRENT_READERS {
        let state = state.clone();
        handles.push(tokio::spawn(async move {
            if i % 4 == 0 {
                // Re-unlocking swaps in an identical store.
                state.session.unlock(PASSWORD).await.map(|_| None)
            } else {
                let store = state.session.require().await?;
                Ok(Some(store.compute_aggregates(&FilterContext::default())))
            }
        }));
    }

    for handle in handles {
        if let Some(aggregates) = handle.await.unwrap().unwrap() {
            assert_eq!(aggregates.len(), 2);
            assert_eq!(aggregates[0].name, "Alice Smith");
            assert_eq!(aggregates[0].count, 2);
        }
    }
}
