// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-athlete totals under a filter context.

use serde::{Deserialize, Serialize};

/// Quantity summed by `RecordStore::total_for`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TotalField {
    /// Number of matching records
    Count,
    Distance,
    ElapsedTime,
    TotalElevationGain,
}

/// One athlete's totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregate {
    pub name: String,
    pub count: u32,
    /// Meters
    pub distance: f64,
    /// Seconds
    pub elapsed_time: f64,
    /// Meters
    pub total_elevation_gain: f64,
    /// Minutes per kilometer; zero when time or distance is zero
    pub pace: f64,
}
