// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Turning validated form and import data into stored time entries.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use uuid::Uuid;

use crate::db::MemoryDb;
use crate::models::{MemberProfile, NewTimeEntry, TimeEntry};
use crate::services::import::ImportBatch;

/// Outcome of a stored bulk import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    /// Entries stored
    pub count: usize,
    /// Lines dropped while parsing
    pub skipped: usize,
    /// Entries recorded for a team member rather than the importer
    pub matched_members: usize,
}

/// Build a stored entry from validated form data.
pub fn build_entry(
    swimmer_id: Uuid,
    team_id: Option<Uuid>,
    new_entry: NewTimeEntry,
    now: DateTime<Utc>,
) -> TimeEntry {
    TimeEntry {
        id: Uuid::new_v4(),
        swimmer_id,
        stroke: new_entry.stroke,
        distance: new_entry.distance,
        time: new_entry.time,
        test_set: new_entry.test_set,
        notes: new_entry.notes,
        team_id,
        created_at: now,
        updated_at: now,
    }
}

/// Store a parsed import batch.
///
/// Rows naming a member of `roster` (case-insensitive) are recorded for that
/// member; all other rows are recorded for `importer_id`.
pub fn record_import(
    db: &MemoryDb,
    importer_id: Uuid,
    team_id: Option<Uuid>,
    roster: &[MemberProfile],
    batch: ImportBatch,
    now: DateTime<Utc>,
) -> ImportSummary {
    let members_by_name: HashMap<String, Uuid> = roster
        .iter()
        .map(|m| (m.user.name.trim().to_lowercase(), m.user.id))
        .collect();

    let skipped = batch.skipped();
    let mut matched_members = 0;

    let entries: Vec<TimeEntry> = batch
        .records
        .into_iter()
        .enumerate()
        .map(|(line, record)| {
            let swimmer_id = match members_by_name.get(&record.swimmer_name.to_lowercase()) {
                Some(&member_id) => {
                    matched_members += 1;
                    member_id
                }
                None => importer_id,
            };

            let new_entry = NewTimeEntry {
                stroke: record.stroke,
                distance: record.distance,
                time: record.time,
                test_set: record.test_set,
                notes: (!record.notes.is_empty()).then_some(record.notes),
            };
            // Keep file order when listing newest-first.
            let recorded_at = now + Duration::nanoseconds(line as i64);
            build_entry(swimmer_id, team_id, new_entry, recorded_at)
        })
        .collect();

    let count = db.add_time_entries(&entries);

    tracing::info!(
        importer_id = %importer_id,
        count,
        skipped,
        matched_members,
        "Bulk import stored"
    );

    ImportSummary {
        count,
        skipped,
        matched_members,
    }
}
