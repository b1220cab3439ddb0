// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod aggregation;
pub mod challenges;
pub mod records;
pub mod session;
pub mod vault;
pub mod views;

pub use aggregation::{pace, RecordStore};
pub use records::RecordsClient;
pub use session::DashboardSession;
pub use vault::TokenVault;
