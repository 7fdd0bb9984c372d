// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recorded swim time model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use uuid::Uuid;

use crate::services::time_format::CanonicalTime;

/// A stored time entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/generated/")
)]
pub struct TimeEntry {
    pub id: Uuid,
    /// Swimmer the time belongs to
    pub swimmer_id: Uuid,
    /// Stroke label (Freestyle, Backstroke, ...); not restricted
    pub stroke: String,
    /// Distance in meters
    pub distance: u32,
    /// Canonical `MM:SS.ss` time
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub time: CanonicalTime,
    /// Practice/workout label
    pub test_set: String,
    pub notes: Option<String>,
    pub team_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated entry ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTimeEntry {
    pub stroke: String,
    pub distance: u32,
    pub time: CanonicalTime,
    pub test_set: String,
    pub notes: Option<String>,
}

/// Validated partial update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeEntryChanges {
    pub stroke: Option<String>,
    pub distance: Option<u32>,
    pub time: Option<CanonicalTime>,
    pub test_set: Option<String>,
    pub notes: Option<String>,
}

impl TimeEntryChanges {
    pub fn apply(self, entry: &mut TimeEntry) {
        if let Some(stroke) = self.stroke {
            entry.stroke = stroke;
        }
        if let Some(distance) = self.distance {
            entry.distance = distance;
        }
        if let Some(time) = self.time {
            entry.time = time;
        }
        if let Some(test_set) = self.test_set {
            entry.test_set = test_set;
        }
        if let Some(notes) = self.notes {
            entry.notes = (!notes.is_empty()).then_some(notes);
        }
    }
}
