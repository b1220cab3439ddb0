// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Filter context and sort model for dashboard queries.
//!
//! Both are plain serializable values. The query-string forms accepted here
//! match the dashboard's shareable URLs (`filter`, `startDate`, `endDate`,
//! `selectedAthletes`, `recordsSort`/`aggregatesSort`).

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::activity_type::ActivityFilter;
use crate::models::record::ActivityRecord;

/// Constraints applied to a leader-board query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterContext {
    #[serde(default)]
    pub activity_type: ActivityFilter,
    /// Inclusive first day
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Inclusive last day (through end of day)
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Athlete subset; empty means everyone
    #[serde(default)]
    pub athletes: Vec<String>,
}

impl FilterContext {
    /// Check the type and date constraints (athlete is checked by the caller).
    pub fn admits(&self, record: &ActivityRecord) -> bool {
        self.activity_type.matches(&record.activity_type)
            && self.start_date.is_none_or(|start| record.date >= start)
            && self.end_date.is_none_or(|end| record.date <= end)
    }

    /// Whether an athlete passes the subset constraint.
    pub fn selects(&self, name: &str) -> bool {
        self.athletes.is_empty() || self.athletes.iter().any(|a| a == name)
    }

    /// Whether an athlete is explicitly part of the selection.
    pub fn is_selected(&self, name: &str) -> bool {
        self.athletes.iter().any(|a| a == name)
    }

    /// User-facing complaint when the date range is inverted.
    ///
    /// The range still applies literally (and then matches nothing).
    pub fn date_range_error(&self) -> Option<&'static str> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) if start > end => Some("Start date cannot be after end date"),
            _ => None,
        }
    }

    /// Render as a dashboard query string (without the leading `?`).
    pub fn to_query_string(&self) -> String {
        let mut parts = vec![format!(
            "filter={}",
            urlencoding::encode(&self.activity_type.to_string())
        )];
        if let Some(start) = self.start_date {
            parts.push(format!("startDate={}", start.format("%Y-%m-%d")));
        }
        if let Some(end) = self.end_date {
            parts.push(format!("endDate={}", end.format("%Y-%m-%d")));
        }
        if !self.athletes.is_empty() {
            parts.push(format!(
                "selectedAthletes={}",
                urlencoding::encode(&self.athletes.join(","))
            ));
        }
        parts.join("&")
    }
}

/// Raw filter parameters as they arrive in a query string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterQuery {
    #[serde(default)]
    pub filter: Option<String>,
    #[serde(default, alias = "start_date")]
    pub start_date: Option<String>,
    #[serde(default, alias = "end_date")]
    pub end_date: Option<String>,
    #[serde(default, alias = "selected_athletes")]
    pub selected_athletes: Option<String>,
}

impl From<FilterQuery> for FilterContext {
    /// Unparseable values impose no constraint.
    fn from(query: FilterQuery) -> Self {
        Self {
            activity_type: query
                .filter
                .as_deref()
                .map(ActivityFilter::from)
                .unwrap_or_default(),
            start_date: query.start_date.as_deref().and_then(parse_query_date),
            end_date: query.end_date.as_deref().and_then(parse_query_date),
            athletes: query
                .selected_athletes
                .as_deref()
                .map(parse_athlete_list)
                .unwrap_or_default(),
        }
    }
}

/// Parse a `YYYY-MM-DD` (or full RFC3339) date; anything else yields `None`.
pub fn parse_query_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Split a comma-separated athlete list, dropping blanks and duplicates.
pub fn parse_athlete_list(raw: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for name in raw.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// Sort direction of a grid column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Columns the record and leader-board grids can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Name,
    Date,
    Type,
    Description,
    Count,
    Distance,
    ElapsedTime,
    TotalElevationGain,
    Pace,
}

impl SortField {
    /// Whether the activity grid has this column.
    pub fn on_record_grid(self) -> bool {
        !matches!(self, SortField::Count)
    }

    /// Whether the leader board has this column.
    pub fn on_aggregate_grid(self) -> bool {
        !matches!(
            self,
            SortField::Date | SortField::Type | SortField::Description
        )
    }

    fn as_str(self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Date => "date",
            SortField::Type => "type",
            SortField::Description => "description",
            SortField::Count => "count",
            SortField::Distance => "distance",
            SortField::ElapsedTime => "elapsedTime",
            SortField::TotalElevationGain => "totalElevationGain",
            SortField::Pace => "pace",
        }
    }
}

impl FromStr for SortField {
    type Err = ();

    /// Accepts both the grid's camelCase names and snake_case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortField::Name),
            "date" => Ok(SortField::Date),
            "type" => Ok(SortField::Type),
            "description" => Ok(SortField::Description),
            "count" => Ok(SortField::Count),
            "distance" => Ok(SortField::Distance),
            "elapsedTime" | "elapsed_time" => Ok(SortField::ElapsedTime),
            "totalElevationGain" | "total_elevation_gain" => Ok(SortField::TotalElevationGain),
            "pace" => Ok(SortField::Pace),
            _ => Err(()),
        }
    }
}

/// Single-column sort, serialized as `<field>-<asc|desc>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortModel {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortModel {
    pub const RECORDS_DEFAULT: SortModel = SortModel {
        field: SortField::Date,
        direction: SortDirection::Desc,
    };

    pub const AGGREGATES_DEFAULT: SortModel = SortModel {
        field: SortField::Count,
        direction: SortDirection::Desc,
    };

    pub fn desc(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
        }
    }

    /// This sort if the activity grid can apply it, else the grid default.
    pub fn for_records(self) -> Self {
        if self.field.on_record_grid() {
            self
        } else {
            Self::RECORDS_DEFAULT
        }
    }

    /// This sort if the leader board can apply it, else the board default.
    pub fn for_aggregates(self) -> Self {
        if self.field.on_aggregate_grid() {
            self
        } else {
            Self::AGGREGATES_DEFAULT
        }
    }

    /// Parse `<field>-<asc|desc>`; returns `None` for anything else.
    pub fn parse(raw: &str) -> Option<Self> {
        let (field, direction) = raw.trim().rsplit_once('-')?;
        let direction = match direction {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            _ => return None,
        };
        Some(Self {
            field: field.parse().ok()?,
            direction,
        })
    }
}

impl fmt::Display for SortModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = match self.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        write!(f, "{}-{}", self.field.as_str(), direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_from_query_parses_all_fields() {
        let ctx = FilterContext::from(FilterQuery {
            filter: Some("Run".to_string()),
            start_date: Some("2024-01-01".to_string()),
            end_date: Some("2024-01-31".to_string()),
            selected_athletes: Some("Alice Smith,Bob Jones,Alice Smith".to_string()),
        });

        assert_eq!(ctx.activity_type, ActivityFilter::Only("Run".to_string()));
        assert_eq!(ctx.start_date, Some(date(2024, 1, 1)));
        assert_eq!(ctx.end_date, Some(date(2024, 1, 31)));
        assert_eq!(ctx.athletes, vec!["Alice Smith", "Bob Jones"]);
    }

    #[test]
    fn test_invalid_query_values_impose_no_constraint() {
        let ctx = FilterContext::from(FilterQuery {
            filter: Some(String::new()),
            start_date: Some("not-a-date".to_string()),
            end_date: Some("2024-13-45".to_string()),
            selected_athletes: Some(",,".to_string()),
        });

        assert_eq!(ctx, FilterContext::default());
    }

    #[test]
    fn test_date_range_error() {
        let mut ctx = FilterContext {
            start_date: Some(date(2024, 2, 1)),
            end_date: Some(date(2024, 1, 1)),
            ..Default::default()
        };
        assert_eq!(
            ctx.date_range_error(),
            Some("Start date cannot be after end date")
        );

        ctx.end_date = Some(date(2024, 2, 1));
        assert_eq!(ctx.date_range_error(), None);
    }

    #[test]
    fn test_query_string() {
        let ctx = FilterContext {
            activity_type: ActivityFilter::from("Virtual Ride"),
            start_date: Some(date(2023, 10, 30)),
            end_date: None,
            athletes: vec!["Ann Lee".to_string(), "Joe Bloggs".to_string()],
        };
        assert_eq!(
            ctx.to_query_string(),
            "filter=Virtual%20Ride&startDate=2023-10-30&selectedAthletes=Ann%20Lee%2CJoe%20Bloggs"
        );
    }

    #[test]
    fn test_sort_model_parse() {
        assert_eq!(
            SortModel::parse("elapsedTime-asc"),
            Some(SortModel {
                field: SortField::ElapsedTime,
                direction: SortDirection::Asc,
            })
        );
        assert_eq!(SortModel::parse("date-desc"), Some(SortModel::RECORDS_DEFAULT));
        assert_eq!(SortModel::parse("date"), None);
        assert_eq!(SortModel::parse("bogus-asc"), None);
        assert_eq!(SortModel::parse("count-sideways"), None);
        assert_eq!(SortModel::AGGREGATES_DEFAULT.to_string(), "count-desc");
    }

    #[test]
    fn test_sort_falls_back_when_grid_lacks_column() {
        let count = SortModel::parse("count-asc").unwrap();
        assert_eq!(count.for_records(), SortModel::RECORDS_DEFAULT);
        assert_eq!(count.for_aggregates(), count);

        let date = SortModel::parse("date-asc").unwrap();
        assert_eq!(date.for_records(), date);
        assert_eq!(date.for_aggregates(), SortModel::AGGREGATES_DEFAULT);

        let pace = SortModel::parse("pace-desc").unwrap();
        assert_eq!(pace.for_records(), pace);
        assert_eq!(pace.for_aggregates(), pace);
    }
}
