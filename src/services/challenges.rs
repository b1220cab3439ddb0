// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Club challenge presets.
//!
//! A challenge is a leader board over a fixed date window: either the
//! challenge subgroup's runs, or everyone else's activities of any type.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{ActivityFilter, FilterContext, SortField, SortModel};

/// Which side of the club a preset ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeGroup {
    /// Members of the configured subgroup, runs only
    Members,
    /// Everyone else, any activity type
    Others,
}

/// Static description of a challenge leader board.
#[derive(Debug, Clone, Copy)]
pub struct ChallengePreset {
    pub title: &'static str,
    pub group: ChallengeGroup,
    pub sort_field: SortField,
}

pub const PRESETS: &[ChallengePreset] = &[
    ChallengePreset {
        title: "Subgroup: run count",
        group: ChallengeGroup::Members,
        sort_field: SortField::Count,
    },
    ChallengePreset {
        title: "Subgroup: running distance",
        group: ChallengeGroup::Members,
        sort_field: SortField::Distance,
    },
    ChallengePreset {
        title: "Subgroup: running time",
        group: ChallengeGroup::Members,
        sort_field: SortField::ElapsedTime,
    },
    ChallengePreset {
        title: "Others: activity count",
        group: ChallengeGroup::Others,
        sort_field: SortField::Count,
    },
    ChallengePreset {
        title: "Others: activities distance",
        group: ChallengeGroup::Others,
        sort_field: SortField::Distance,
    },
    ChallengePreset {
        title: "Others: activities time",
        group: ChallengeGroup::Others,
        sort_field: SortField::ElapsedTime,
    },
];

/// A preset resolved against the current athletes.
#[derive(Debug, Clone, Serialize)]
pub struct ChallengeLink {
    pub title: &'static str,
    pub group: ChallengeGroup,
    pub filter: FilterContext,
    /// `<field>-desc`
    pub sort: String,
    /// Dashboard query string selecting this leader board
    pub query: String,
}

/// Resolve every preset.
///
/// Returns nothing when no subgroup is configured.
pub fn challenge_links(
    members: &[String],
    all_names: &[String],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<ChallengeLink> {
    if members.is_empty() {
        return Vec::new();
    }

    PRESETS
        .iter()
        .map(|preset| {
            let (activity_type, athletes) = match preset.group {
                ChallengeGroup::Members => (ActivityFilter::from("Run"), members.to_vec()),
                ChallengeGroup::Others => {
                    let mut others: Vec<String> = all_names
                        .iter()
                        .filter(|name| !members.contains(*name))
                        .cloned()
                        .collect();
                    others.sort();
                    (ActivityFilter::All, others)
                }
            };

            let filter = FilterContext {
                activity_type,
                start_date: Some(start),
                end_date: Some(end),
                athletes,
            };
            let sort = SortModel::desc(preset.sort_field).to_string();
            let query = format!(
                "{}&tab=leaderBoards&aggregatesSort={}",
                filter.to_query_string(),
                sort
            );

            ChallengeLink {
                title: preset.title,
                group: preset.group,
                filter,
                sort,
                query,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_group_no_links() {
        let start = NaiveDate::from_ymd_opt(2023, 10, 30).unwrap();
        let end = NaiveDate::from_ymd_opt(2023, 11, 19).unwrap();
        assert!(challenge_links(&[], &names(&["Ann"]), start, end).is_empty());
    }

    #[test]
    fn test_links_split_members_and_others() {
        let start = NaiveDate::from_ymd_opt(2023, 10, 30).unwrap();
        let end = NaiveDate::from_ymd_opt(2023, 11, 19).unwrap();
        let members = names(&["Joe Bloggs"]);
        let all = names(&["Zed Ray", "Ann Lee", "Joe Bloggs"]);

        let links = challenge_links(&members, &all, start, end);
        assert_eq!(links.len(), PRESETS.len());

        let first = &links[0];
        assert_eq!(first.filter.activity_type, ActivityFilter::from("Run"));
        assert_eq!(first.filter.athletes, members);
        assert_eq!(first.sort, "count-desc");

        let others = &links[4];
        assert_eq!(others.filter.activity_type, ActivityFilter::All);
        assert_eq!(others.filter.athletes, names(&["Ann Lee", "Zed Ray"]));
        assert_eq!(others.sort, "distance-desc");
        assert!(others
            .query
            .starts_with("filter=All&startDate=2023-10-30&endDate=2023-11-19"));
        assert!(others.query.ends_with("aggregatesSort=distance-desc"));
    }
}
