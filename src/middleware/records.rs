// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Gate for routes that need loaded records.

use crate::error::AppError;
use crate::services::RecordStore;
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// Snapshot of the loaded store, inserted as a request extension.
#[derive(Clone)]
pub struct LoadedRecords(pub Arc<RecordStore>);

/// Middleware that rejects requests until the dashboard has been unlocked.
///
/// Handlers behind it read the store from the `LoadedRecords` extension, so
/// one request always sees one consistent snapshot.
pub async fn require_records(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    match state.session.current().await {
        Some(store) => {
            request.extensions_mut().insert(LoadedRecords(store));
            next.run(request).await
        }
        None => AppError::NotLoaded.into_response(),
    }
}
