// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Single time entry form validation.

use serde::Deserialize;

use crate::models::{NewTimeEntry, Stroke, TimeEntryChanges};
use crate::services::import::parse_distance;
use crate::services::time_format::{CanonicalTime, TIME_INPUT_HINT};

/// Raw form values as typed by the user.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryForm {
    #[serde(default)]
    pub stroke: String,
    #[serde(default)]
    pub distance: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub test_set: String,
    #[serde(default)]
    pub notes: String,
}

/// Raw values for a partial update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryUpdateForm {
    pub stroke: Option<String>,
    pub distance: Option<String>,
    pub time: Option<String>,
    pub test_set: Option<String>,
    pub notes: Option<String>,
}

/// Form rejections, worded for display.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntryError {
    #[error("Please fill in all required fields")]
    MissingFields,

    #[error("{}", TIME_INPUT_HINT)]
    InvalidTime,

    #[error("Please enter a distance in meters (e.g., 50, 100, 200)")]
    InvalidDistance,
}

/// Validate a single-entry form and normalize its time.
pub fn validate_entry(form: &EntryForm) -> Result<NewTimeEntry, EntryError> {
    let distance = form.distance.trim();
    let test_set = form.test_set.trim();

    if distance.is_empty() || form.time.trim().is_empty() || test_set.is_empty() {
        return Err(EntryError::MissingFields);
    }

    let time = CanonicalTime::parse(&form.time).map_err(|_| EntryError::InvalidTime)?;
    let distance = parse_distance(distance).ok_or(EntryError::InvalidDistance)?;

    let stroke = match form.stroke.trim() {
        "" => Stroke::default().to_string(),
        s => Stroke::normalize_label(s),
    };
    let notes = form.notes.trim();

    Ok(NewTimeEntry {
        stroke,
        distance,
        time,
        test_set: test_set.to_string(),
        notes: (!notes.is_empty()).then(|| notes.to_string()),
    })
}

/// Validate a partial update. Supplied values must be non-empty (except
/// notes, where empty clears them).
pub fn validate_update(form: &EntryUpdateForm) -> Result<TimeEntryChanges, EntryError> {
    let required = |value: &Option<String>| -> Result<Option<String>, EntryError> {
        match value.as_deref().map(str::trim) {
            Some("") => Err(EntryError::MissingFields),
            other => Ok(other.map(String::from)),
        }
    };

    let time = required(&form.time)?
        .map(|t| CanonicalTime::parse(&t).map_err(|_| EntryError::InvalidTime))
        .transpose()?;
    let distance = required(&form.distance)?
        .map(|d| parse_distance(&d).ok_or(EntryError::InvalidDistance))
        .transpose()?;

    Ok(TimeEntryChanges {
        stroke: required(&form.stroke)?.map(|s| Stroke::normalize_label(&s)),
        distance,
        time,
        test_set: required(&form.test_set)?,
        notes: form.notes.as_deref().map(|n| n.trim().to_string()),
    })
}
