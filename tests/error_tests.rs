// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::http::StatusCode;
use axum::response::IntoResponse;
use club_dashboard::error::AppError;

#[test]
fn test_credential_errors() {
    assert!(AppError::InvalidPassword.is_credential_error());
    assert!(AppError::NotLoaded.is_credential_error());
    assert!(!AppError::Connection("refused".to_string()).is_credential_error());
    assert!(!AppError::DownloadFailed(500).is_credential_error());
}

#[test]
fn test_status_mapping() {
    let cases = [
        (AppError::InvalidPassword, StatusCode::UNAUTHORIZED),
        (AppError::Connection("refused".into()), StatusCode::BAD_GATEWAY),
        (AppError::DownloadFailed(403), StatusCode::BAD_GATEWAY),
        (AppError::MalformedPayload("eof".into()), StatusCode::BAD_GATEWAY),
        (AppError::NotLoaded, StatusCode::CONFLICT),
        (AppError::BadRequest("page".into()), StatusCode::BAD_REQUEST),
    ];

    for (err, expected) in cases {
        assert_eq!(err.into_response().status(), expected);
    }
}
