// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Grid rows, sorting, pagination and the activity chart.

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::Serialize;
use std::cmp::Ordering;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::{ActivityRecord, Aggregate, SortDirection, SortField, SortModel};
use crate::services::aggregation::pace;
use crate::time_utils::{day_label, format_date, format_minutes};

/// Page sizes offered by the grids.
pub const PAGE_SIZES: &[usize] = &[10, 25, 50, 100];
const DEFAULT_PAGE_SIZE: usize = 10;

/// Chart window bounds (days).
pub const MIN_CHART_DAYS: u32 = 1;
pub const MAX_CHART_DAYS: u32 = 28;

/// One row of the activities grid.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RecordRow {
    pub name: String,
    /// `YYYY-MM-DD`
    pub date: String,
    #[serde(rename = "type")]
    pub activity_type: String,
    /// Kilometers, rounded to 2 decimals
    pub distance: f64,
    /// Minutes
    pub elapsed_time: f64,
    /// Meters
    pub total_elevation_gain: f64,
    pub description: String,
    /// Minutes per kilometer
    pub pace: f64,
    /// `HH:MM:SS`, absent when zero
    pub elapsed_time_display: Option<String>,
    /// `HH:MM:SS` per km, absent when zero
    pub pace_display: Option<String>,
    #[serde(skip)]
    timestamp: DateTime<Utc>,
}

impl From<&ActivityRecord> for RecordRow {
    fn from(record: &ActivityRecord) -> Self {
        let elapsed_minutes = record.elapsed_time / 60.0;
        let pace = pace(record.elapsed_time, record.distance);
        Self {
            name: record.name.clone(),
            date: format_date(record.date),
            activity_type: record.activity_type.clone(),
            distance: meters_to_km(record.distance),
            elapsed_time: elapsed_minutes,
            total_elevation_gain: record.total_elevation_gain,
            description: record.description.clone(),
            pace,
            elapsed_time_display: display_minutes(elapsed_minutes),
            pace_display: display_minutes(pace),
            timestamp: record.timestamp,
        }
    }
}

/// One row of the leader-board grid.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AggregateRow {
    pub name: String,
    pub count: u32,
    /// Kilometers, rounded to 2 decimals
    pub distance: f64,
    /// Minutes
    pub elapsed_time: f64,
    /// Meters, rounded
    pub total_elevation_gain: f64,
    pub pace: f64,
    pub elapsed_time_display: Option<String>,
    pub pace_display: Option<String>,
}

impl From<&Aggregate> for AggregateRow {
    fn from(aggregate: &Aggregate) -> Self {
        let elapsed_minutes = aggregate.elapsed_time / 60.0;
        Self {
            name: aggregate.name.clone(),
            count: aggregate.count,
            distance: meters_to_km(aggregate.distance),
            elapsed_time: elapsed_minutes,
            total_elevation_gain: aggregate.total_elevation_gain.round(),
            pace: aggregate.pace,
            elapsed_time_display: display_minutes(elapsed_minutes),
            pace_display: display_minutes(aggregate.pace),
        }
    }
}

/// Meters to kilometers, rounded to 10 m.
pub fn meters_to_km(meters: f64) -> f64 {
    (meters / 10.0).round() / 100.0
}

fn display_minutes(minutes: f64) -> Option<String> {
    if minutes == 0.0 {
        None
    } else {
        format_minutes(minutes)
    }
}

fn directed(ordering: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

/// Sort activity rows in place. Pick the sort with `SortModel::for_records`;
/// a count sort leaves the order alone.
pub fn sort_record_rows(rows: &mut [RecordRow], sort: SortModel) {
    rows.sort_by(|a, b| {
        let ordering = match sort.field {
            SortField::Name => a.name.cmp(&b.name),
            SortField::Date => a.timestamp.cmp(&b.timestamp),
            SortField::Type => a.activity_type.cmp(&b.activity_type),
            SortField::Description => a.description.cmp(&b.description),
            SortField::Distance => a.distance.total_cmp(&b.distance),
            SortField::ElapsedTime => a.elapsed_time.total_cmp(&b.elapsed_time),
            SortField::TotalElevationGain => {
                a.total_elevation_gain.total_cmp(&b.total_elevation_gain)
            }
            SortField::Pace => a.pace.total_cmp(&b.pace),
            SortField::Count => Ordering::Equal,
        };
        directed(ordering, sort.direction)
    });
}

/// Sort leader-board rows in place; ties keep name order.
pub fn sort_aggregate_rows(rows: &mut [AggregateRow], sort: SortModel) {
    rows.sort_by(|a, b| {
        let ordering = match sort.field {
            SortField::Name => a.name.cmp(&b.name),
            SortField::Count => a.count.cmp(&b.count),
            SortField::Distance => a.distance.total_cmp(&b.distance),
            SortField::ElapsedTime => a.elapsed_time.total_cmp(&b.elapsed_time),
            SortField::TotalElevationGain => {
                a.total_elevation_gain.total_cmp(&b.total_elevation_gain)
            }
            SortField::Pace => a.pace.total_cmp(&b.pace),
            SortField::Date | SortField::Type | SortField::Description => Ordering::Equal,
        };
        directed(ordering, sort.direction)
    });
}

/// One page of grid rows.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub rows: Vec<T>,
    /// Zero-based page index
    pub page: usize,
    pub page_size: usize,
    /// Total rows before paging
    pub total: usize,
}

/// Snap a requested page size to the offered sizes.
pub fn normalize_page_size(requested: Option<usize>) -> usize {
    requested
        .filter(|size| PAGE_SIZES.contains(size))
        .unwrap_or(DEFAULT_PAGE_SIZE)
}

/// Slice one page out of `rows`. Pages past the end are empty.
pub fn paginate<T>(rows: Vec<T>, page: usize, page_size: usize) -> Page<T> {
    let total = rows.len();
    let start = page.saturating_mul(page_size);
    let rows = rows.into_iter().skip(start).take(page_size).collect();
    Page {
        rows,
        page,
        page_size,
        total,
    }
}

/// Records synced per day over a trailing window ending today.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivityChart {
    pub days: u32,
    pub labels: Vec<String>,
    pub counts: Vec<u32>,
}

/// Parse the chart window like a lenient integer field: leading digits
/// count, anything unparseable becomes 1, and the result is clamped.
pub fn parse_days_count(raw: &str) -> u32 {
    let raw = raw.trim();
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    match digits[..end].parse::<u64>() {
        Ok(_) if negative => MIN_CHART_DAYS,
        Ok(n) => n.clamp(MIN_CHART_DAYS as u64, MAX_CHART_DAYS as u64) as u32,
        Err(_) => MIN_CHART_DAYS,
    }
}

/// Build the per-day chart for the `days` days ending on `today`.
pub fn activity_chart(records: &[ActivityRecord], today: NaiveDate, days: u32) -> ActivityChart {
    let days = days.clamp(MIN_CHART_DAYS, MAX_CHART_DAYS);

    let window: Vec<NaiveDate> = (0..days as u64)
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(offset)))
        .collect();

    let counts = window
        .iter()
        .map(|day| records.iter().filter(|r| r.date == *day).count() as u32)
        .collect();

    let labels = window
        .iter()
        .map(|day| {
            if *day == today {
                "Today".to_string()
            } else {
                day_label(*day)
            }
        })
        .collect();

    ActivityChart {
        days,
        labels,
        counts,
    }
}
