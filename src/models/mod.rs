// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod stroke;
pub mod team;
pub mod time_entry;
pub mod user;

pub use stroke::Stroke;
pub use team::{MemberProfile, Team, TeamMember, TeamWithMembers};
pub use time_entry::{NewTimeEntry, TimeEntry, TimeEntryChanges};
pub use user::{Role, User};
