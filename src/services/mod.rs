// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod entry;
pub mod export;
pub mod import;
pub mod performance;
pub mod recording;
pub mod team_code;
pub mod teams;
pub mod time_format;

pub use entry::{validate_entry, validate_update, EntryError, EntryForm, EntryUpdateForm};
pub use import::{parse_bulk, ImportBatch, ImportError, ImportRecord};
pub use teams::{NewTeam, TeamService};
pub use time_format::{
    calculate_improvement, format_time, is_personal_best, parse_time,
    parse_time_to_standard_format, validate_time_input, CanonicalTime, TimeFormatError,
};
