// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Team creation, join codes and rosters.

use chrono::Utc;
use ring::rand::SystemRandom;
use uuid::Uuid;

use crate::db::MemoryDb;
use crate::error::{AppError, Result};
use crate::models::{MemberProfile, Role, Team, TeamMember, TeamWithMembers, User};
use crate::services::team_code::{generate_team_code, normalize_team_code};

/// Fresh codes to try before giving up on a collision streak.
const MAX_CODE_ATTEMPTS: usize = 8;

/// Fields for a new team.
#[derive(Debug, Clone)]
pub struct NewTeam {
    pub name: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
}

/// Service for team management.
#[derive(Clone)]
pub struct TeamService {
    db: MemoryDb,
    rng: SystemRandom,
}

impl TeamService {
    pub fn new(db: MemoryDb) -> Self {
        Self {
            db,
            rng: SystemRandom::new(),
        }
    }

    /// Create a team coached by `coach` with a freshly generated join code.
    pub fn create_team(&self, coach: &User, new_team: NewTeam) -> Result<Team> {
        if coach.role != Role::Coach {
            return Err(AppError::BadRequest(
                "Only coaches can create teams".to_string(),
            ));
        }

        let now = Utc::now();
        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let team = Team {
                id: Uuid::new_v4(),
                name: new_team.name.trim().to_string(),
                description: new_team.description.clone(),
                logo_url: new_team.logo_url.clone(),
                team_code: generate_team_code(&self.rng)?,
                coach_id: coach.id,
                created_at: now,
                updated_at: now,
            };

            match self.db.create_team(&team) {
                Ok(()) => {
                    tracing::info!(
                        team_id = %team.id,
                        coach_id = %coach.id,
                        "Team created"
                    );
                    return Ok(team);
                }
                Err(AppError::Conflict(_)) => {
                    tracing::debug!(attempt, "Team code collision, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::Internal(anyhow::anyhow!(
            "Could not allocate a unique team code"
        )))
    }

    /// Join the team identified by `team_code`.
    pub fn join_by_code(&self, user: &User, team_code: &str) -> Result<Team> {
        let code = normalize_team_code(team_code);
        let team = self
            .db
            .get_team_by_code(&code)
            .ok_or_else(|| AppError::NotFound("Invalid team code".to_string()))?;

        self.db.join_team(&TeamMember {
            id: Uuid::new_v4(),
            team_id: team.id,
            user_id: user.id,
            joined_at: Utc::now(),
        })?;

        tracing::info!(team_id = %team.id, user_id = %user.id, "User joined team");
        Ok(team)
    }

    /// Teams relevant to a user: those they coach, or those they joined.
    pub fn teams_for_user(&self, user: &User) -> Vec<TeamWithMembers> {
        let teams = match user.role {
            Role::Coach => self.db.get_teams_by_coach(user.id),
            Role::Swimmer => self.db.get_member_teams(user.id),
        };

        teams
            .into_iter()
            .map(|team| TeamWithMembers {
                members: self.roster(team.id),
                team,
            })
            .collect()
    }

    /// Members of a team with their profiles.
    pub fn roster(&self, team_id: Uuid) -> Vec<MemberProfile> {
        self.db
            .get_team_members(team_id)
            .into_iter()
            .filter_map(|m| {
                let user = self.db.get_user(m.user_id)?;
                Some(MemberProfile {
                    membership_id: m.id,
                    joined_at: m.joined_at,
                    user,
                })
            })
            .collect()
    }

    /// Load a team the user coaches or belongs to.
    pub fn require_access(&self, user: &User, team_id: Uuid) -> Result<Team> {
        let team = self
            .db
            .get_team(team_id)
            .ok_or_else(|| AppError::NotFound(format!("Team {} not found", team_id)))?;

        if team.coach_id != user.id && !self.db.is_member(team_id, user.id) {
            return Err(AppError::BadRequest(format!(
                "User {} is not part of team {}",
                user.id, team_id
            )));
        }

        Ok(team)
    }
}
