// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard view routes (require loaded records).

use axum::{
    extract::{FromRequestParts, Query, State},
    http::request::Parts,
    routing::get,
    Extension, Json, Router,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::{AppError, Result};
use crate::middleware::records::LoadedRecords;
use crate::models::activity_type::FILTER_CHOICES;
use crate::models::{FilterContext, FilterQuery, SortModel};
use crate::services::challenges::{challenge_links, ChallengeLink};
use crate::services::views::{
    activity_chart, normalize_page_size, paginate, parse_days_count, sort_aggregate_rows,
    sort_record_rows, ActivityChart, AggregateRow, Page, RecordRow,
};
use crate::AppState;

/// View routes. The records gate is applied in routes/mod.rs.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/records", get(get_records))
        .route("/api/athletes", get(get_athletes))
        .route("/api/aggregates", get(get_aggregates))
        .route("/api/chart", get(get_chart))
        .route("/api/challenges", get(get_challenges))
}

/// Routes that work without loaded records.
pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/activity-types", get(get_activity_types))
}

// ─── Grid Parameters ─────────────────────────────────────────

/// Query string extractor that reports rejections as `AppError::BadRequest`.
///
/// Every field the handlers read is an optional string, so this only fails
/// on a query that names the same parameter twice or is not URL-encoded.
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(Self(value))
    }
}

#[derive(Deserialize, Default)]
struct GridQuery {
    /// `<field>-<asc|desc>`
    #[serde(default, alias = "recordsSort", alias = "aggregatesSort")]
    sort: Option<String>,
    /// Zero-based page index
    #[serde(default)]
    page: Option<String>,
    #[serde(default, alias = "pageSize")]
    page_size: Option<String>,
}

impl GridQuery {
    fn sort_or(&self, default: SortModel) -> SortModel {
        self.sort
            .as_deref()
            .and_then(SortModel::parse)
            .unwrap_or(default)
    }

    /// Unparseable pages fall back to the first.
    fn page(&self) -> usize {
        self.page
            .as_deref()
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(0)
    }

    fn page_size(&self) -> usize {
        normalize_page_size(
            self.page_size
                .as_deref()
                .and_then(|raw| raw.trim().parse().ok()),
        )
    }
}

// ─── Activities ──────────────────────────────────────────────

#[derive(Serialize)]
pub struct RecordsResponse {
    pub sort: String,
    #[serde(flatten)]
    pub page: Page<RecordRow>,
}

/// All activities, sorted and paged.
async fn get_records(
    Extension(LoadedRecords(store)): Extension<LoadedRecords>,
    ApiQuery(grid): ApiQuery<GridQuery>,
) -> Result<Json<RecordsResponse>> {
    let sort = grid.sort_or(SortModel::RECORDS_DEFAULT).for_records();

    let mut rows: Vec<RecordRow> = store.records().iter().map(RecordRow::from).collect();
    sort_record_rows(&mut rows, sort);

    Ok(Json(RecordsResponse {
        sort: sort.to_string(),
        page: paginate(rows, grid.page(), grid.page_size()),
    }))
}

// ─── Athletes ────────────────────────────────────────────────

#[derive(Deserialize, Default)]
struct AthletesQuery {
    /// Leave out athletes already in the selection (`true` or `1`)
    #[serde(default)]
    exclude_selected: Option<String>,
}

impl AthletesQuery {
    fn exclude_selected(&self) -> bool {
        self.exclude_selected
            .as_deref()
            .is_some_and(|raw| matches!(raw.trim(), "true" | "1"))
    }
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AthletesResponse {
    pub names: Vec<String>,
    pub selected: Vec<String>,
    pub all_selected: bool,
}

/// Distinct athlete names for the athlete picker.
async fn get_athletes(
    Extension(LoadedRecords(store)): Extension<LoadedRecords>,
    ApiQuery(filter): ApiQuery<FilterQuery>,
    ApiQuery(params): ApiQuery<AthletesQuery>,
) -> Result<Json<AthletesResponse>> {
    let ctx = FilterContext::from(filter);
    let names = store.unique_athlete_names(&ctx, params.exclude_selected());
    let all_selected = store.all_athletes_selected(&ctx);

    Ok(Json(AthletesResponse {
        names,
        selected: ctx.athletes,
        all_selected,
    }))
}

// ─── Leader Boards ───────────────────────────────────────────

#[derive(Serialize)]
pub struct AggregatesResponse {
    /// The filter as understood (invalid inputs dropped)
    pub filter: FilterContext,
    pub date_error: Option<&'static str>,
    /// Columns meaningless under the current activity type
    pub hidden_columns: &'static [&'static str],
    pub sort: String,
    #[serde(flatten)]
    pub page: Page<AggregateRow>,
}

/// Per-athlete totals under the requested filter.
async fn get_aggregates(
    Extension(LoadedRecords(store)): Extension<LoadedRecords>,
    ApiQuery(filter): ApiQuery<FilterQuery>,
    ApiQuery(grid): ApiQuery<GridQuery>,
) -> Result<Json<AggregatesResponse>> {
    let ctx = FilterContext::from(filter);
    let sort = grid.sort_or(SortModel::AGGREGATES_DEFAULT).for_aggregates();

    tracing::debug!(
        filter = %ctx.activity_type,
        start = ?ctx.start_date,
        end = ?ctx.end_date,
        athletes = ctx.athletes.len(),
        "Computing aggregates"
    );

    let aggregates = store.compute_aggregates(&ctx);
    let mut rows: Vec<AggregateRow> = aggregates.iter().map(AggregateRow::from).collect();
    sort_aggregate_rows(&mut rows, sort);

    Ok(Json(AggregatesResponse {
        date_error: ctx.date_range_error(),
        hidden_columns: ctx.activity_type.hidden_columns(),
        filter: ctx,
        sort: sort.to_string(),
        page: paginate(rows, grid.page(), grid.page_size()),
    }))
}

// ─── Chart ───────────────────────────────────────────────────

#[derive(Deserialize, Default)]
struct ChartQuery {
    #[serde(default)]
    days: Option<String>,
}

/// Activities per day over the trailing window.
async fn get_chart(
    Extension(LoadedRecords(store)): Extension<LoadedRecords>,
    ApiQuery(params): ApiQuery<ChartQuery>,
) -> Result<Json<ActivityChart>> {
    let days = params.days.as_deref().map_or(7, parse_days_count);
    let today = chrono::Utc::now().date_naive();
    Ok(Json(activity_chart(store.records(), today, days)))
}

// ─── Challenges ──────────────────────────────────────────────

/// Challenge leader-board presets.
async fn get_challenges(
    State(state): State<Arc<AppState>>,
    Extension(LoadedRecords(store)): Extension<LoadedRecords>,
) -> Result<Json<Vec<ChallengeLink>>> {
    let all_names = store.unique_athlete_names(&FilterContext::default(), false);
    Ok(Json(challenge_links(
        &state.config.challenge_group,
        &all_names,
        state.config.challenge_start,
        state.config.challenge_end,
    )))
}

// ─── Activity Types ──────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivityTypesResponse {
    pub types: Vec<String>,
}

async fn get_activity_types() -> Json<ActivityTypesResponse> {
    Json(ActivityTypesResponse {
        types: FILTER_CHOICES.iter().map(|t| t.to_string()).collect(),
    })
}
