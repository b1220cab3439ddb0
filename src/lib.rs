// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Club activity dashboard
//!
//! Downloads the club's exported activity records with a passphrase-protected
//! access token, and serves activity grids and per-athlete leader boards
//! filtered by activity type, date range and athlete selection.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::{DashboardSession, RecordsClient, TokenVault};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub session: DashboardSession,
}

impl AppState {
    /// Wire the records client and session from configuration.
    pub fn from_config(config: Config) -> Self {
        let vault = TokenVault::new(config.encrypted_token.clone(), config.token_length);
        let client = RecordsClient::new(config.records_url.clone(), vault);
        Self {
            session: DashboardSession::new(client),
            config,
        }
    }
}
