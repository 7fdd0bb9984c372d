// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bulk time import from pasted comma-separated text.
//!
//! Each line is `name, stroke, distance, time, test set[, notes]`. Lines that
//! don't parse are dropped without individual errors; only an empty result
//! fails the batch.

use crate::models::Stroke;
use crate::services::time_format::{leading_integer, CanonicalTime};
use serde::Serialize;

const FIELD_DELIMITER: char = ',';

/// One accepted row of a bulk import.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportRecord {
    pub swimmer_name: String,
    pub stroke: String,
    pub distance: u32,
    pub time: CanonicalTime,
    pub test_set: String,
    pub notes: String,
}

/// Result of parsing a bulk import blob.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportBatch {
    pub records: Vec<ImportRecord>,
    /// Number of lines examined
    pub lines_read: usize,
}

impl ImportBatch {
    /// Number of accepted records.
    pub fn count(&self) -> usize {
        self.records.len()
    }

    /// Number of lines dropped.
    pub fn skipped(&self) -> usize {
        self.lines_read - self.records.len()
    }
}

/// Batch-level import failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImportError {
    #[error("Please enter data to import")]
    EmptyInput,

    #[error("No valid entries found. Please check the format.")]
    NoValidEntries,
}

/// Parse a multi-line blob into validated import records.
pub fn parse_bulk(blob: &str) -> Result<ImportBatch, ImportError> {
    let blob = blob.trim();
    if blob.is_empty() {
        return Err(ImportError::EmptyInput);
    }

    let mut records = Vec::new();
    let mut lines_read = 0;

    for (index, line) in blob.lines().enumerate() {
        lines_read += 1;
        match parse_line(line) {
            Some(record) => records.push(record),
            None => tracing::debug!(line = index + 1, "Skipping invalid import line"),
        }
    }

    if records.is_empty() {
        tracing::info!(lines = lines_read, "Bulk import found no valid entries");
        return Err(ImportError::NoValidEntries);
    }

    tracing::debug!(
        accepted = records.len(),
        lines = lines_read,
        "Parsed bulk import"
    );

    Ok(ImportBatch {
        records,
        lines_read,
    })
}

/// Parse one line, or `None` if it should be dropped.
fn parse_line(line: &str) -> Option<ImportRecord> {
    let fields: Vec<&str> = line.split(FIELD_DELIMITER).map(clean_field).collect();

    let [swimmer_name, stroke, distance, time, test_set, rest @ ..] = fields.as_slice() else {
        return None;
    };
    let notes = rest.first().copied().unwrap_or_default();

    if [swimmer_name, stroke, distance, time, test_set]
        .iter()
        .any(|field| field.is_empty())
    {
        return None;
    }

    let time = CanonicalTime::parse(time).ok()?;
    let distance = parse_distance(distance)?;

    Some(ImportRecord {
        swimmer_name: swimmer_name.to_string(),
        stroke: Stroke::normalize_label(stroke),
        distance,
        time,
        test_set: test_set.to_string(),
        notes: notes.to_string(),
    })
}

fn clean_field(field: &str) -> &str {
    field.trim().trim_matches('"')
}

/// Coerce a distance field ("100", "100m") to a positive whole number of meters.
pub(crate) fn parse_distance(distance: &str) -> Option<u32> {
    leading_integer(distance)
        .and_then(|d| u32::try_from(d).ok())
        .filter(|d| *d > 0)
}
