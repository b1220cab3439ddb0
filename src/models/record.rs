// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity records: the raw export shape and the normalized form.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::activity_type::normalize_sport_type;

/// Athlete block of an exported activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawAthlete {
    pub firstname: String,
    pub lastname: String,
}

/// One activity as it appears in the club export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecord {
    pub athlete: RawAthlete,
    /// Activity title chosen by the athlete
    pub name: String,
    /// Distance in meters
    pub distance: f64,
    /// Elapsed time in seconds
    pub elapsed_time: f64,
    /// Elevation gain in meters
    pub total_elevation_gain: f64,
    /// Vendor sport type code (e.g. "VirtualRide")
    pub sport_type: String,
    /// Start time (ISO 8601)
    pub timestamp: String,
}

/// One normalized exercise session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityRecord {
    /// Athlete display name ("First Last")
    pub name: String,
    pub description: String,
    /// Distance in meters
    pub distance: f64,
    /// Elapsed time in seconds
    pub elapsed_time: f64,
    /// Elevation gain in meters
    pub total_elevation_gain: f64,
    /// Display label of the activity type
    pub activity_type: String,
    pub timestamp: DateTime<Utc>,
    /// Calendar day of `timestamp`, used for date filtering
    pub date: NaiveDate,
}

impl ActivityRecord {
    /// Normalize a raw export record.
    pub fn from_raw(raw: RawRecord) -> Result<Self, RecordError> {
        if !(raw.distance >= 0.0 && raw.distance.is_finite()) {
            return Err(RecordError::InvalidNumber("distance", raw.distance));
        }
        if !(raw.elapsed_time >= 0.0 && raw.elapsed_time.is_finite()) {
            return Err(RecordError::InvalidNumber("elapsed_time", raw.elapsed_time));
        }
        if !raw.total_elevation_gain.is_finite() {
            return Err(RecordError::InvalidNumber(
                "total_elevation_gain",
                raw.total_elevation_gain,
            ));
        }

        let timestamp = parse_timestamp(&raw.timestamp)
            .ok_or_else(|| RecordError::InvalidTimestamp(raw.timestamp.clone()))?;

        Ok(Self {
            name: display_name(&raw.athlete.firstname, &raw.athlete.lastname),
            description: raw.name,
            distance: raw.distance,
            elapsed_time: raw.elapsed_time,
            total_elevation_gain: raw.total_elevation_gain,
            activity_type: normalize_sport_type(&raw.sport_type),
            date: timestamp.date_naive(),
            timestamp,
        })
    }
}

/// Build an athlete display name from first and last name.
pub fn display_name(firstname: &str, lastname: &str) -> String {
    format!(
        "{} {}",
        capitalize_first_letter(firstname),
        capitalize_first_letter(lastname)
    )
}

/// Uppercase the first character, leaving the rest untouched.
pub fn capitalize_first_letter(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Parse an export timestamp. Values without an offset are taken as UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Reasons a raw record is rejected during normalization.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("Invalid {0}: {1}")]
    InvalidNumber(&'static str, f64),

    #[error("Invalid timestamp: {0:?}")]
    InvalidTimestamp(String),

    #[error("Unexpected record shape: {0}")]
    Shape(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(first: &str, last: &str, sport: &str, timestamp: &str) -> RawRecord {
        RawRecord {
            athlete: RawAthlete {
                firstname: first.to_string(),
                lastname: last.to_string(),
            },
            name: "Lunch Run".to_string(),
            distance: 5000.0,
            elapsed_time: 1800.0,
            total_elevation_gain: -3.5,
            sport_type: sport.to_string(),
            timestamp: timestamp.to_string(),
        }
    }

    #[test]
    fn test_capitalize_first_letter() {
        assert_eq!(capitalize_first_letter("alice"), "Alice");
        assert_eq!(capitalize_first_letter("mcDonald"), "McDonald");
        assert_eq!(capitalize_first_letter(""), "");
        assert_eq!(capitalize_first_letter("élodie"), "Élodie");
    }

    #[test]
    fn test_from_raw_normalizes_fields() {
        let record =
            ActivityRecord::from_raw(raw("alice", "smith", "TrailRun", "2024-01-15T23:30:00Z"))
                .unwrap();

        assert_eq!(record.name, "Alice Smith");
        assert_eq!(record.description, "Lunch Run");
        assert_eq!(record.activity_type, "Trail Run");
        assert_eq!(record.total_elevation_gain, -3.5);
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn test_from_raw_converts_offsets_to_utc() {
        let record =
            ActivityRecord::from_raw(raw("a", "b", "Run", "2024-01-15T23:30:00-02:00")).unwrap();
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 1, 16).unwrap());
    }

    #[test]
    fn test_from_raw_accepts_naive_timestamp() {
        let record = ActivityRecord::from_raw(raw("a", "b", "Run", "2024-03-02T07:00:00")).unwrap();
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
    }

    #[test]
    fn test_from_raw_rejects_bad_timestamp() {
        let err = ActivityRecord::from_raw(raw("a", "b", "Run", "yesterday")).unwrap_err();
        assert!(matches!(err, RecordError::InvalidTimestamp(_)));
    }

    #[test]
    fn test_from_raw_rejects_negative_distance() {
        let mut r = raw("a", "b", "Run", "2024-01-01T00:00:00Z");
        r.distance = -1.0;
        let err = ActivityRecord::from_raw(r).unwrap_err();
        assert!(matches!(err, RecordError::InvalidNumber("distance", _)));
    }
}
