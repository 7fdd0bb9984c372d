// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory store with typed operations.
//!
//! Provides high-level operations for:
//! - Users (profiles)
//! - Teams (with unique join codes)
//! - Team members (team <-> user join records)
//! - Time entries
//!
//! Cloning the handle shares the underlying tables.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Team, TeamMember, TimeEntry, TimeEntryChanges, User};

/// Which entries a listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryScope {
    /// A swimmer's own times
    Swimmer(Uuid),
    /// All times recorded against a team
    Team(Uuid),
}

/// Time entry listing filters.
#[derive(Debug, Clone)]
pub struct TimeEntryQuery {
    pub scope: EntryScope,
    /// Case-insensitive stroke label
    pub stroke: Option<String>,
    pub distance: Option<u32>,
}

impl TimeEntryQuery {
    pub fn new(scope: EntryScope) -> Self {
        Self {
            scope,
            stroke: None,
            distance: None,
        }
    }

    fn matches(&self, entry: &TimeEntry) -> bool {
        let in_scope = match self.scope {
            EntryScope::Swimmer(id) => entry.swimmer_id == id,
            EntryScope::Team(id) => entry.team_id == Some(id),
        };

        in_scope
            && self
                .stroke
                .as_deref()
                .is_none_or(|s| entry.stroke.eq_ignore_ascii_case(s))
            && self.distance.is_none_or(|d| entry.distance == d)
    }
}

#[derive(Default)]
struct Tables {
    users: DashMap<Uuid, User>,
    teams: DashMap<Uuid, Team>,
    /// team_code -> team id
    team_codes: DashMap<String, Uuid>,
    members: DashMap<Uuid, TeamMember>,
    /// (team id, user id) -> membership id
    memberships: DashMap<(Uuid, Uuid), Uuid>,
    time_entries: DashMap<Uuid, TimeEntry>,
}

/// In-memory database handle.
#[derive(Clone, Default)]
pub struct MemoryDb {
    tables: Arc<Tables>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Create a user profile. Fails if the id or email is taken.
    pub fn create_user(&self, user: &User) -> Result<(), AppError> {
        if self
            .tables
            .users
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(AppError::Conflict(format!(
                "Email {} is already registered",
                user.email
            )));
        }

        match self.tables.users.entry(user.id) {
            Entry::Occupied(_) => Err(AppError::Conflict(format!(
                "User {} already exists",
                user.id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(user.clone());
                Ok(())
            }
        }
    }

    pub fn get_user(&self, user_id: Uuid) -> Option<User> {
        self.tables.users.get(&user_id).map(|u| u.clone())
    }

    /// Create or replace a user profile.
    pub fn upsert_user(&self, user: &User) {
        self.tables.users.insert(user.id, user.clone());
    }

    // ─── Team Operations ─────────────────────────────────────────

    /// Create a team. Fails if its join code is already in use.
    pub fn create_team(&self, team: &Team) -> Result<(), AppError> {
        match self.tables.team_codes.entry(team.team_code.clone()) {
            Entry::Occupied(_) => Err(AppError::Conflict(format!(
                "Team code {} is already in use",
                team.team_code
            ))),
            Entry::Vacant(slot) => {
                slot.insert(team.id);
                self.tables.teams.insert(team.id, team.clone());
                Ok(())
            }
        }
    }

    pub fn get_team(&self, team_id: Uuid) -> Option<Team> {
        self.tables.teams.get(&team_id).map(|t| t.clone())
    }

    /// Look up a team by its (already normalized) join code.
    pub fn get_team_by_code(&self, team_code: &str) -> Option<Team> {
        let team_id = *self.tables.team_codes.get(team_code)?;
        self.get_team(team_id)
    }

    /// Teams run by a coach, oldest first.
    pub fn get_teams_by_coach(&self, coach_id: Uuid) -> Vec<Team> {
        let mut teams: Vec<Team> = self
            .tables
            .teams
            .iter()
            .filter(|t| t.coach_id == coach_id)
            .map(|t| t.clone())
            .collect();
        teams.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        teams
    }

    // ─── Membership Operations ───────────────────────────────────

    /// Add a user to a team. Fails if they are already a member.
    pub fn join_team(&self, member: &TeamMember) -> Result<(), AppError> {
        match self
            .tables
            .memberships
            .entry((member.team_id, member.user_id))
        {
            Entry::Occupied(_) => Err(AppError::Conflict(
                "Already a member of this team".to_string(),
            )),
            Entry::Vacant(slot) => {
                slot.insert(member.id);
                self.tables.members.insert(member.id, member.clone());
                Ok(())
            }
        }
    }

    pub fn is_member(&self, team_id: Uuid, user_id: Uuid) -> bool {
        self.tables.memberships.contains_key(&(team_id, user_id))
    }

    /// Memberships of a team, earliest joiner first.
    pub fn get_team_members(&self, team_id: Uuid) -> Vec<TeamMember> {
        let mut members: Vec<TeamMember> = self
            .tables
            .members
            .iter()
            .filter(|m| m.team_id == team_id)
            .map(|m| m.clone())
            .collect();
        members.sort_by(|a, b| a.joined_at.cmp(&b.joined_at).then(a.id.cmp(&b.id)));
        members
    }

    /// Teams a user has joined.
    pub fn get_member_teams(&self, user_id: Uuid) -> Vec<Team> {
        let mut memberships: Vec<TeamMember> = self
            .tables
            .members
            .iter()
            .filter(|m| m.user_id == user_id)
            .map(|m| m.clone())
            .collect();
        memberships.sort_by(|a, b| a.joined_at.cmp(&b.joined_at));

        memberships
            .into_iter()
            .filter_map(|m| self.get_team(m.team_id))
            .collect()
    }

    // ─── Time Entry Operations ───────────────────────────────────

    pub fn add_time_entry(&self, entry: &TimeEntry) {
        self.tables.time_entries.insert(entry.id, entry.clone());
    }

    /// Store a batch of entries. Returns how many were stored.
    pub fn add_time_entries(&self, entries: &[TimeEntry]) -> usize {
        for entry in entries {
            self.add_time_entry(entry);
        }
        tracing::debug!(count = entries.len(), "Stored time entries");
        entries.len()
    }

    pub fn get_time_entry(&self, entry_id: Uuid) -> Option<TimeEntry> {
        self.tables.time_entries.get(&entry_id).map(|e| e.clone())
    }

    /// Apply changes to an entry. Returns the updated entry, or `None` if
    /// it does not exist.
    pub fn update_time_entry(
        &self,
        entry_id: Uuid,
        changes: TimeEntryChanges,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Option<TimeEntry> {
        let mut entry = self.tables.time_entries.get_mut(&entry_id)?;
        changes.apply(&mut entry);
        entry.updated_at = now;
        Some(entry.clone())
    }

    /// Delete an entry. Returns whether it existed.
    pub fn delete_time_entry(&self, entry_id: Uuid) -> bool {
        self.tables.time_entries.remove(&entry_id).is_some()
    }

    /// Entries matching a query, newest first.
    pub fn query_time_entries(&self, query: &TimeEntryQuery) -> Vec<TimeEntry> {
        let mut entries: Vec<TimeEntry> = self
            .tables
            .time_entries
            .iter()
            .filter(|e| query.matches(e))
            .map(|e| e.clone())
            .collect();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        entries
    }
}
