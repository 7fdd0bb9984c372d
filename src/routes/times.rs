// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Time entry routes: recording, bulk import, history and exports.

use crate::db::{EntryScope, TimeEntryQuery};
use crate::error::{AppError, Result};
use crate::models::{TimeEntry, User};
use crate::routes::load_user;
use crate::services::export::{export_to_csv, generate_performance_report, ReportRow};
use crate::services::performance::{annotate_history, summarize, EventSummary, HistoryEntry};
use crate::services::recording::{build_entry, record_import};
use crate::services::{parse_bulk, validate_entry, validate_update, EntryForm, EntryUpdateForm};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use uuid::Uuid;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/users/{user_id}/times",
            post(add_time).get(get_time_history),
        )
        .route("/api/users/{user_id}/times/import", post(import_times))
        .route("/api/users/{user_id}/times/export", get(export_times))
        .route("/api/users/{user_id}/performance", get(get_performance))
        .route("/api/users/{user_id}/report", get(get_report))
        .route(
            "/api/times/{entry_id}",
            put(update_time).delete(delete_time),
        )
}

/// Pick the entries a request covers: a team the user belongs to, or the
/// user's own times.
fn resolve_scope(state: &AppState, user: &User, team_id: Option<Uuid>) -> Result<EntryScope> {
    match team_id {
        Some(team_id) => {
            state.team_service.require_access(user, team_id)?;
            Ok(EntryScope::Team(team_id))
        }
        None => Ok(EntryScope::Swimmer(user.id)),
    }
}

// ─── Recording ───────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AddTimeRequest {
    #[serde(flatten)]
    pub form: EntryForm,
    pub team_id: Option<Uuid>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/generated/")
)]
pub struct AddTimeResponse {
    pub entry: TimeEntry,
    /// Time as stored, `MM:SS.ss`
    pub formatted_time: String,
}

/// Record a single time from the entry form.
async fn add_time(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
    Json(req): Json<AddTimeRequest>,
) -> Result<(StatusCode, Json<AddTimeResponse>)> {
    let user = load_user(&state, user_id)?;
    let new_entry = validate_entry(&req.form)?;
    if let Some(team_id) = req.team_id {
        state.team_service.require_access(&user, team_id)?;
    }

    let entry = build_entry(user.id, req.team_id, new_entry, Utc::now());
    state.db.add_time_entry(&entry);

    tracing::info!(
        user_id = %user.id,
        entry_id = %entry.id,
        stroke = %entry.stroke,
        distance = entry.distance,
        time = %entry.time,
        "Time recorded"
    );

    Ok((
        StatusCode::CREATED,
        Json(AddTimeResponse {
            formatted_time: entry.time.to_string(),
            entry,
        }),
    ))
}

#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    #[serde(default)]
    pub data: String,
    pub team_id: Option<Uuid>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/generated/")
)]
pub struct ImportResponse {
    pub count: usize,
    pub skipped: usize,
    pub matched_members: usize,
}

/// Bulk import pasted comma-separated results.
async fn import_times(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
    Json(req): Json<ImportRequest>,
) -> Result<Json<ImportResponse>> {
    let user = load_user(&state, user_id)?;
    let roster = match req.team_id {
        Some(team_id) => {
            state.team_service.require_access(&user, team_id)?;
            state.team_service.roster(team_id)
        }
        None => Vec::new(),
    };

    let batch = parse_bulk(&req.data)?;
    tracing::debug!(
        user_id = %user.id,
        lines = batch.lines_read,
        parsed = batch.count(),
        "Parsed import data"
    );

    let summary = record_import(
        &state.db,
        user.id,
        req.team_id,
        &roster,
        batch,
        Utc::now(),
    );

    Ok(Json(ImportResponse {
        count: summary.count,
        skipped: summary.skipped,
        matched_members: summary.matched_members,
    }))
}

// ─── History ─────────────────────────────────────────────────

#[derive(Deserialize)]
struct HistoryQuery {
    /// List a team's times instead of the user's own
    team_id: Option<Uuid>,
    stroke: Option<String>,
    distance: Option<u32>,
    /// Cursor for forward pagination (opaque token).
    cursor: Option<String>,
    #[serde(default = "default_per_page")]
    per_page: u32,
}

fn default_per_page() -> u32 {
    50
}

const MAX_PER_PAGE: u32 = 100;
const CURSOR_PARTS: usize = 3;

/// Position of the last entry on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HistoryCursor {
    created_at: DateTime<Utc>,
    entry_id: Uuid,
}

impl HistoryCursor {
    fn of(entry: &TimeEntry) -> Self {
        Self {
            created_at: entry.created_at,
            entry_id: entry.id,
        }
    }

    /// Whether `entry` sorts after this position in newest-first order.
    fn precedes(&self, entry: &TimeEntry) -> bool {
        (entry.created_at, entry.id) < (self.created_at, self.entry_id)
    }
}

fn parse_cursor(cursor: Option<&str>) -> Result<Option<HistoryCursor>> {
    cursor
        .map(|raw| {
            let invalid_cursor = || AppError::BadRequest("Invalid 'cursor' parameter".to_string());

            let decoded = URL_SAFE_NO_PAD.decode(raw).map_err(|_| invalid_cursor())?;
            let decoded_str = std::str::from_utf8(&decoded).map_err(|_| invalid_cursor())?;

            let parts: Vec<&str> = decoded_str.split(':').collect();
            if parts.len() != CURSOR_PARTS {
                return Err(invalid_cursor());
            }

            let seconds = parts[0].parse::<i64>().map_err(|_| invalid_cursor())?;
            let nanos = parts[1].parse::<u32>().map_err(|_| invalid_cursor())?;
            let entry_id = parts[2].parse::<Uuid>().map_err(|_| invalid_cursor())?;
            let created_at = DateTime::from_timestamp(seconds, nanos).ok_or_else(invalid_cursor)?;

            Ok(HistoryCursor {
                created_at,
                entry_id,
            })
        })
        .transpose()
}

fn encode_cursor(cursor: HistoryCursor) -> String {
    let payload = format!(
        "{}:{}:{}",
        cursor.created_at.timestamp(),
        cursor.created_at.timestamp_subsec_nanos(),
        cursor.entry_id
    );
    URL_SAFE_NO_PAD.encode(payload)
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/generated/")
)]
pub struct TimeHistoryResponse {
    pub entries: Vec<HistoryEntry>,
    pub per_page: u32,
    /// Total number of entries matching the filters.
    pub total: usize,
    pub next_cursor: Option<String>,
}

/// Time history, newest first, annotated with improvements.
async fn get_time_history(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<TimeHistoryResponse>> {
    tracing::debug!(
        user_id = %user_id,
        team_id = ?params.team_id,
        stroke = ?params.stroke,
        distance = ?params.distance,
        cursor = ?params.cursor,
        "Fetching time history"
    );

    let limit = params.per_page.clamp(1, MAX_PER_PAGE);
    let cursor = parse_cursor(params.cursor.as_deref())?;

    let user = load_user(&state, user_id)?;
    let query = TimeEntryQuery {
        scope: resolve_scope(&state, &user, params.team_id)?,
        stroke: params.stroke.filter(|s| !s.trim().is_empty()),
        distance: params.distance,
    };

    // Annotations depend on earlier swims, so the whole history is
    // annotated before paging.
    let history = annotate_history(state.db.query_time_entries(&query));
    let total = history.len();

    let mut page: Vec<HistoryEntry> = history
        .into_iter()
        .filter(|h| cursor.is_none_or(|c| c.precedes(&h.entry)))
        .take(limit as usize + 1)
        .collect();

    let has_more = page.len() > limit as usize;
    page.truncate(limit as usize);
    let next_cursor = if has_more {
        page.last()
            .map(|h| encode_cursor(HistoryCursor::of(&h.entry)))
    } else {
        None
    };

    Ok(Json(TimeHistoryResponse {
        entries: page,
        per_page: limit,
        total,
        next_cursor,
    }))
}

#[derive(Deserialize)]
struct ScopeQuery {
    team_id: Option<Uuid>,
}

/// Personal bests and improvement per event.
async fn get_performance(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
    Query(params): Query<ScopeQuery>,
) -> Result<Json<Vec<EventSummary>>> {
    let user = load_user(&state, user_id)?;
    let scope = resolve_scope(&state, &user, params.team_id)?;
    let entries = state.db.query_time_entries(&TimeEntryQuery::new(scope));
    Ok(Json(summarize(&entries)))
}

// ─── Exports ─────────────────────────────────────────────────

/// Display names for the swimmers in `entries`.
fn swimmer_names(state: &AppState, entries: &[TimeEntry]) -> HashMap<Uuid, String> {
    let mut names = HashMap::new();
    for entry in entries {
        names.entry(entry.swimmer_id).or_insert_with(|| {
            state
                .db
                .get_user(entry.swimmer_id)
                .map(|u| u.name)
                .unwrap_or_else(|| "Unknown".to_string())
        });
    }
    names
}

fn report_rows<'a>(entries: &'a [TimeEntry], names: &'a HashMap<Uuid, String>) -> Vec<ReportRow<'a>> {
    entries
        .iter()
        .map(|entry| ReportRow {
            entry,
            swimmer_name: names
                .get(&entry.swimmer_id)
                .map(String::as_str)
                .unwrap_or("Unknown"),
        })
        .collect()
}

/// CSV export of the user's (or a team's) times.
async fn export_times(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
    Query(params): Query<ScopeQuery>,
) -> Result<impl IntoResponse> {
    let user = load_user(&state, user_id)?;
    let scope = resolve_scope(&state, &user, params.team_id)?;
    let entries = state.db.query_time_entries(&TimeEntryQuery::new(scope));
    let names = swimmer_names(&state, &entries);

    let csv = export_to_csv(&report_rows(&entries, &names));
    tracing::debug!(user_id = %user_id, rows = entries.len(), "Exported times");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"swim_times.csv\"",
            ),
        ],
        csv,
    ))
}

#[derive(Deserialize)]
struct ReportQuery {
    team_id: Option<Uuid>,
    /// Limit the report to one swimmer by display name
    swimmer: Option<String>,
}

/// Plain-text performance report.
async fn get_report(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
    Query(params): Query<ReportQuery>,
) -> Result<impl IntoResponse> {
    let user = load_user(&state, user_id)?;
    let scope = resolve_scope(&state, &user, params.team_id)?;
    let entries = state.db.query_time_entries(&TimeEntryQuery::new(scope));
    let names = swimmer_names(&state, &entries);

    let report = generate_performance_report(
        &report_rows(&entries, &names),
        params.swimmer.as_deref().filter(|s| !s.is_empty()),
        Utc::now().date_naive(),
    );

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        report,
    ))
}

// ─── Editing ─────────────────────────────────────────────────

/// Update an entry's fields.
async fn update_time(
    State(state): State<Arc<AppState>>,
    Path(entry_id): Path<Uuid>,
    Json(form): Json<EntryUpdateForm>,
) -> Result<Json<TimeEntry>> {
    let changes = validate_update(&form)?;
    let entry = state
        .db
        .update_time_entry(entry_id, changes, Utc::now())
        .ok_or_else(|| AppError::NotFound(format!("Time entry {} not found", entry_id)))?;

    tracing::info!(entry_id = %entry_id, time = %entry.time, "Time entry updated");
    Ok(Json(entry))
}

/// Delete an entry.
async fn delete_time(
    State(state): State<Arc<AppState>>,
    Path(entry_id): Path<Uuid>,
) -> Result<StatusCode> {
    if !state.db.delete_time_entry(entry_id) {
        return Err(AppError::NotFound(format!(
            "Time entry {} not found",
            entry_id
        )));
    }

    tracing::info!(entry_id = %entry_id, "Time entry deleted");
    Ok(StatusCode::NO_CONTENT)
}
