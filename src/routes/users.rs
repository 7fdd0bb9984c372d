// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User profile routes.

use crate::error::Result;
use crate::models::{Role, TeamWithMembers, User};
use crate::routes::load_user;
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
        .route("/api/users", post(create_user))
        .route("/api/users/{user_id}", get(get_user).put(update_user))
        .route("/api/users/{user_id}/teams", get(get_user_teams))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Identity provider id; generated when absent
    pub id: Option<Uuid>,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub role: Role,
    #[validate(url)]
    pub avatar_url: Option<String>,
}

/// Create a user profile.
async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>)> {
    req.validate()?;

    let now = chrono::Utc::now();
    let user = User {
        id: req.id.unwrap_or_else(Uuid::new_v4),
        email: req.email.trim().to_string(),
        name: req.name.trim().to_string(),
        role: req.role,
        avatar_url: req.avatar_url,
        created_at: now,
        updated_at: now,
    };
    state.db.create_user(&user)?;

    tracing::info!(user_id = %user.id, role = ?user.role, "User profile created");
    Ok((StatusCode::CREATED, Json(user)))
}

/// Get a user profile.
async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<User>> {
    Ok(Json(load_user(&state, user_id)?))
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub role: Option<Role>,
    #[validate(url)]
    pub avatar_url: Option<String>,
}

/// Update name, role or avatar.
async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<User>> {
    req.validate()?;

    let mut user = load_user(&state, user_id)?;
    if let Some(name) = req.name {
        user.name = name.trim().to_string();
    }
    if let Some(role) = req.role {
        if role != user.role {
            tracing::info!(user_id = %user_id, from = ?user.role, to = ?role, "Role changed");
        }
        user.role = role;
    }
    if let Some(avatar_url) = req.avatar_url {
        user.avatar_url = Some(avatar_url);
    }
    user.updated_at = chrono::Utc::now();
    state.db.upsert_user(&user);

    Ok(Json(user))
}

/// Teams the user coaches (coach) or has joined (swimmer).
async fn get_user_teams(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<TeamWithMembers>>> {
    let user = load_user(&state, user_id)?;
    Ok(Json(state.team_service.teams_for_user(&user)))
}
