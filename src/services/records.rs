// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client for the club records export.
//!
//! The export is a single JSON array behind a pre-signed URL; the decrypted
//! access token is appended verbatim as the query string. One request per
//! unlock, no retries.

use crate::error::AppError;
use crate::services::aggregation::{LoadReport, RecordStore};
use crate::services::vault::TokenVault;

/// Downloads and normalizes the records export.
#[derive(Clone)]
pub struct RecordsClient {
    http: reqwest::Client,
    records_url: String,
    vault: TokenVault,
}

impl RecordsClient {
    pub fn new(records_url: impl Into<String>, vault: TokenVault) -> Self {
        Self {
            http: reqwest::Client::new(),
            records_url: records_url.into(),
            vault,
        }
    }

    /// Unlock the access token with `password` and download the records.
    pub async fn download_records(&self, password: &str) -> Result<LoadReport, AppError> {
        let token = self.vault.unlock(password)?;
        let values = self.fetch_json(&token).await?;
        let report = RecordStore::from_json_values(values);

        tracing::info!(
            records = report.store.len(),
            skipped = report.skipped,
            "Records downloaded"
        );
        Ok(report)
    }

    /// GET the export and decode it as a JSON array.
    async fn fetch_json(&self, token: &str) -> Result<Vec<serde_json::Value>, AppError> {
        let url = format!("{}?{}", self.records_url, token);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::Connection(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Records download rejected");
            return Err(AppError::DownloadFailed(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::Connection(e.without_url().to_string()))?;

        serde_json::from_str::<Vec<serde_json::Value>>(&body)
            .map_err(|e| AppError::MalformedPayload(e.to_string()))
    }
}
