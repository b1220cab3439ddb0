// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard session: the currently loaded record store.
//!
//! The store is replaced wholesale on each successful unlock and cleared on
//! sign-out. Readers take a cheap `Arc` snapshot and never hold the lock
//! while computing.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::AppError;
use crate::services::aggregation::RecordStore;
use crate::services::records::RecordsClient;

/// Shared holder of the loaded record store.
pub struct DashboardSession {
    client: RecordsClient,
    store: RwLock<Option<Arc<RecordStore>>>,
}

/// Result of an unlock attempt.
#[derive(Debug, Clone, Copy)]
pub struct UnlockSummary {
    pub records: usize,
    pub skipped: usize,
}

impl DashboardSession {
    pub fn new(client: RecordsClient) -> Self {
        Self {
            client,
            store: RwLock::new(None),
        }
    }

    /// Download records for `password` and install them.
    ///
    /// On failure the previously loaded store (if any) stays in place.
    pub async fn unlock(&self, password: &str) -> Result<UnlockSummary, AppError> {
        let report = self.client.download_records(password).await?;
        let summary = UnlockSummary {
            records: report.store.len(),
            skipped: report.skipped,
        };

        *self.store.write().await = Some(Arc::new(report.store));
        Ok(summary)
    }

    /// Forget the loaded records.
    pub async fn sign_out(&self) {
        *self.store.write().await = None;
        tracing::info!("Session cleared");
    }

    /// Snapshot of the loaded store, if any records are present.
    pub async fn current(&self) -> Option<Arc<RecordStore>> {
        self.store
            .read()
            .await
            .as_ref()
            .filter(|store| !store.is_empty())
            .cloned()
    }

    /// Snapshot of the loaded store, or `NotLoaded`.
    pub async fn require(&self) -> Result<Arc<RecordStore>, AppError> {
        self.current().await.ok_or(AppError::NotLoaded)
    }
}
