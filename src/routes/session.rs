// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session routes: unlock with the club passphrase, sign out.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::{AppError, Result};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/api/session",
        post(unlock).get(session_status).delete(sign_out),
    )
}

/// Unlock request body. Bounds match `vault::validate_password`.
#[derive(Deserialize, Validate)]
pub struct UnlockRequest {
    #[validate(length(min = 8, max = 32))]
    pub password: String,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UnlockResponse {
    pub records: usize,
    /// Export entries dropped as malformed
    pub skipped: usize,
}

/// Decrypt the access token, download the records and load them.
async fn unlock(
    State(state): State<Arc<AppState>>,
    Json(body): Json<UnlockRequest>,
) -> Result<Json<UnlockResponse>> {
    body.validate().map_err(|_| AppError::InvalidPassword)?;

    let summary = state.session.unlock(&body.password).await.inspect_err(|err| {
        if err.is_credential_error() {
            tracing::info!("Unlock rejected: wrong passphrase");
        } else {
            tracing::warn!(error = %err, "Unlock failed");
        }
    })?;
    tracing::info!(
        records = summary.records,
        skipped = summary.skipped,
        "Dashboard unlocked"
    );

    Ok(Json(UnlockResponse {
        records: summary.records,
        skipped: summary.skipped,
    }))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SessionStatus {
    pub loaded: bool,
    pub records: usize,
}

async fn session_status(State(state): State<Arc<AppState>>) -> Json<SessionStatus> {
    let records = state.session.current().await.map_or(0, |s| s.len());
    Json(SessionStatus {
        loaded: records > 0,
        records,
    })
}

/// Forget the loaded records.
async fn sign_out(State(state): State<Arc<AppState>>) -> Json<SessionStatus> {
    state.session.sign_out().await;
    Json(SessionStatus {
        loaded: false,
        records: 0,
    })
}
