// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Swim-Tracker: record and review swimming practice times
//!
//! This crate provides the backend API for swimmers, coaches and teams:
//! time entry with normalization to `MM:SS.ss`, bulk import of pasted
//! results, and improvement/personal-best tracking.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::MemoryDb;
use services::TeamService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: MemoryDb,
    pub team_service: TeamService,
}

impl AppState {
    /// Build state around a store.
    pub fn new(config: Config, db: MemoryDb) -> Self {
        Self {
            team_service: TeamService::new(db.clone()),
            config,
            db,
        }
    }
}
