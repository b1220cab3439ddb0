// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Record store and the per-athlete aggregation engine.
//!
//! Aggregates are recomputed from scratch for every filter context; the
//! store itself never changes after construction.

use std::collections::BTreeSet;

use crate::models::record::{ActivityRecord, RawRecord, RecordError};
use crate::models::{Aggregate, FilterContext, TotalField};

/// Immutable, ordered collection of normalized records from one fetch.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<ActivityRecord>,
}

/// Outcome of loading an export payload.
#[derive(Debug)]
pub struct LoadReport {
    pub store: RecordStore,
    /// Records dropped because they failed normalization
    pub skipped: usize,
}

impl RecordStore {
    pub fn new(records: Vec<ActivityRecord>) -> Self {
        Self { records }
    }

    /// Normalize a decoded export array.
    ///
    /// Elements that do not match the export shape or fail normalization are
    /// skipped and logged; the rest keep their original order.
    pub fn from_json_values(values: Vec<serde_json::Value>) -> LoadReport {
        let mut records = Vec::with_capacity(values.len());
        let mut skipped = 0;

        for (index, value) in values.into_iter().enumerate() {
            let parsed = serde_json::from_value::<RawRecord>(value)
                .map_err(|e| RecordError::Shape(e.to_string()))
                .and_then(ActivityRecord::from_raw);

            match parsed {
                Ok(record) => records.push(record),
                Err(e) => {
                    skipped += 1;
                    tracing::warn!(index, error = %e, "Skipping malformed record");
                }
            }
        }

        LoadReport {
            store: Self { records },
            skipped,
        }
    }

    pub fn records(&self) -> &[ActivityRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct athlete names, sorted ascending.
    ///
    /// With `exclude_selected`, names already in the filter's athlete
    /// selection are left out (used to offer the remaining athletes).
    pub fn unique_athlete_names(&self, ctx: &FilterContext, exclude_selected: bool) -> Vec<String> {
        let names: BTreeSet<&str> = self.records.iter().map(|r| r.name.as_str()).collect();
        names
            .into_iter()
            .filter(|name| !exclude_selected || !ctx.is_selected(name))
            .map(String::from)
            .collect()
    }

    /// Sum one field over an athlete's records admitted by the filter.
    ///
    /// The athlete-subset part of the filter is not consulted here.
    pub fn total_for(&self, name: &str, field: TotalField, ctx: &FilterContext) -> f64 {
        self.records
            .iter()
            .filter(|r| r.name == name && ctx.admits(r))
            .map(|r| match field {
                TotalField::Count => 1.0,
                TotalField::Distance => r.distance,
                TotalField::ElapsedTime => r.elapsed_time,
                TotalField::TotalElevationGain => r.total_elevation_gain,
            })
            .sum()
    }

    /// Per-athlete totals for every selected athlete with any distance or time.
    ///
    /// Output follows sorted-name order.
    pub fn compute_aggregates(&self, ctx: &FilterContext) -> Vec<Aggregate> {
        self.unique_athlete_names(ctx, false)
            .into_iter()
            .filter(|name| ctx.selects(name))
            .filter_map(|name| {
                let count = self.total_for(&name, TotalField::Count, ctx);
                let distance = self.total_for(&name, TotalField::Distance, ctx);
                let elapsed_time = self.total_for(&name, TotalField::ElapsedTime, ctx);
                let total_elevation_gain =
                    self.total_for(&name, TotalField::TotalElevationGain, ctx);

                if distance > 0.0 || elapsed_time > 0.0 {
                    Some(Aggregate {
                        name,
                        count: count as u32,
                        distance,
                        elapsed_time,
                        total_elevation_gain,
                        pace: pace(elapsed_time, distance),
                    })
                } else {
                    None
                }
            })
            .collect()
    }

    /// Whether the filter's selection covers every athlete in the store.
    pub fn all_athletes_selected(&self, ctx: &FilterContext) -> bool {
        ctx.athletes.len() == self.unique_athlete_names(ctx, false).len()
    }
}

/// Pace in minutes per kilometer; zero if either input is zero.
pub fn pace(elapsed_time_seconds: f64, distance_meters: f64) -> f64 {
    if elapsed_time_seconds == 0.0 || distance_meters == 0.0 {
        return 0.0;
    }
    (elapsed_time_seconds / 60.0) / (distance_meters / 1000.0)
}
