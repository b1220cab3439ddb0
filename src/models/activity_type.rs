// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity type labels and the activity-type filter.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Wildcard filter value.
pub const ALL: &str = "All";

/// Activity types offered as leader-board filters, in menu order.
pub const FILTER_CHOICES: &[&str] = &[
    ALL,
    "Run",
    "Walk",
    "Ride",
    "Virtual Ride",
    "Mountain Bike Ride",
    "Weight Training",
    "Football",
    "Yoga",
    "Trail Run",
];

/// Map a raw sport type code from the export to its display label.
///
/// Unrecognized codes pass through unchanged.
pub fn normalize_sport_type(raw: &str) -> String {
    match raw {
        "VirtualRide" => "Virtual Ride",
        "MountainBikeRide" => "Mountain Bike Ride",
        "WeightTraining" => "Weight Training",
        "Soccer" => "Football",
        "TrailRun" => "Trail Run",
        other => other,
    }
    .to_string()
}

/// Activity-type constraint of a filter context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActivityFilter {
    /// Every activity type matches.
    #[default]
    All,
    /// Only records with exactly this type label match.
    Only(String),
}

impl ActivityFilter {
    /// Check whether a record's type label passes this filter.
    pub fn matches(&self, activity_type: &str) -> bool {
        match self {
            ActivityFilter::All => true,
            ActivityFilter::Only(wanted) => wanted == activity_type,
        }
    }

    /// Leader-board columns that carry no meaning under this filter.
    pub fn hidden_columns(&self) -> &'static [&'static str] {
        match self {
            ActivityFilter::All => &["pace"],
            ActivityFilter::Only(t) => match t.as_str() {
                "Weight Training" | "Yoga" => &["distance", "total_elevation_gain", "pace"],
                "Football" => &["total_elevation_gain"],
                _ => &[],
            },
        }
    }
}

impl From<&str> for ActivityFilter {
    /// Empty input and the wildcard both mean "no constraint".
    fn from(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == ALL {
            ActivityFilter::All
        } else {
            ActivityFilter::Only(value.to_string())
        }
    }
}

impl From<String> for ActivityFilter {
    fn from(value: String) -> Self {
        ActivityFilter::from(value.as_str())
    }
}

impl From<ActivityFilter> for String {
    fn from(value: ActivityFilter) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ActivityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityFilter::All => f.write_str(ALL),
            ActivityFilter::Only(t) => f.write_str(t),
        }
    }
}
