// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Team routes: creation, joining by code, rosters.

use crate::error::{AppError, Result};
use crate::models::{MemberProfile, Team};
use crate::routes::load_user;
use crate::services::NewTeam;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/teams", post(create_team))
        .route("/api/teams/join", post(join_team))
        .route("/api/teams/{team_id}/members", get(get_members))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTeamRequest {
    pub coach_id: Uuid,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[validate(url)]
    pub logo_url: Option<String>,
}

/// Create a team for a coach.
async fn create_team(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateTeamRequest>,
) -> Result<(StatusCode, Json<Team>)> {
    req.validate()?;
    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest("Please enter a team name".to_string()));
    }

    let coach = load_user(&state, req.coach_id)?;
    let team = state.team_service.create_team(
        &coach,
        NewTeam {
            name: req.name,
            description: req.description,
            logo_url: req.logo_url,
        },
    )?;

    Ok((StatusCode::CREATED, Json(team)))
}

#[derive(Debug, Deserialize, Validate)]
pub struct JoinTeamRequest {
    pub user_id: Uuid,
    #[validate(length(min = 1, max = 32))]
    pub team_code: String,
}

/// Join a team by its code.
async fn join_team(
    State(state): State<Arc<AppState>>,
    Json(req): Json<JoinTeamRequest>,
) -> Result<Json<Team>> {
    req.validate()?;
    if req.team_code.trim().is_empty() {
        return Err(AppError::BadRequest("Please enter a team code".to_string()));
    }

    let user = load_user(&state, req.user_id)?;
    let team = state.team_service.join_by_code(&user, &req.team_code)?;
    Ok(Json(team))
}

/// Team roster.
async fn get_members(
    State(state): State<Arc<AppState>>,
    Path(team_id): Path<Uuid>,
) -> Result<Json<Vec<MemberProfile>>> {
    if state.db.get_team(team_id).is_none() {
        return Err(AppError::NotFound(format!("Team {} not found", team_id)));
    }
    Ok(Json(state.team_service.roster(team_id)))
}
