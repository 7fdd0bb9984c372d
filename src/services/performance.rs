// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Derived performance metrics: improvements and personal bests.
//!
//! Entries are compared only within the same event (swimmer, stroke and
//! distance). Nothing here is stored; it is recomputed from history.

use serde::Serialize;
use std::collections::HashMap;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use uuid::Uuid;

use crate::models::TimeEntry;
use crate::services::time_format::{calculate_improvement, format_time, is_personal_best};

/// A history row with its comparison to earlier swims.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/generated/")
)]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub entry: TimeEntry,
    /// Seconds gained on the previous swim of this event (positive = faster)
    pub improvement_seconds: Option<f64>,
    /// Change for display, `-` meaning faster (e.g. "-0.32", "+1:02.10")
    pub improvement: Option<String>,
    /// Whether this was the fastest time of the event when recorded
    pub personal_best: bool,
}

/// Best and trend for one event.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/generated/")
)]
pub struct EventSummary {
    pub swimmer_id: Uuid,
    pub stroke: String,
    pub distance: u32,
    pub attempts: usize,
    pub personal_best: TimeEntry,
    /// First recorded time minus latest (positive = faster)
    pub improvement_seconds: f64,
}

#[derive(Hash, PartialEq, Eq)]
struct EventKey {
    swimmer_id: Uuid,
    stroke: String,
    distance: u32,
}

impl EventKey {
    fn of(entry: &TimeEntry) -> Self {
        Self {
            swimmer_id: entry.swimmer_id,
            stroke: entry.stroke.to_lowercase(),
            distance: entry.distance,
        }
    }
}

/// Annotate a newest-first history with improvements and personal bests.
///
/// The result keeps the input order.
pub fn annotate_history(entries: Vec<TimeEntry>) -> Vec<HistoryEntry> {
    // (previous time, best time) per event, walking oldest to newest
    let mut seen: HashMap<EventKey, (String, String)> = HashMap::new();
    let mut annotated = Vec::with_capacity(entries.len());

    for entry in entries.into_iter().rev() {
        let current = entry.time.as_str();
        let prior = seen.get(&EventKey::of(&entry));

        let improvement_seconds =
            prior.map(|(previous, _)| calculate_improvement(current, previous));
        let personal_best = is_personal_best(current, prior.map(|(_, best)| best.as_str()));

        let best = match prior {
            Some((_, best)) if !personal_best => best.clone(),
            _ => current.to_string(),
        };
        seen.insert(EventKey::of(&entry), (current.to_string(), best));

        annotated.push(HistoryEntry {
            improvement: improvement_seconds.map(format_delta),
            improvement_seconds,
            personal_best,
            entry,
        });
    }

    annotated.reverse();
    annotated
}

/// Per-event personal bests and overall improvement, sorted by swimmer,
/// stroke and distance.
pub fn summarize(entries: &[TimeEntry]) -> Vec<EventSummary> {
    let mut events: HashMap<EventKey, Vec<&TimeEntry>> = HashMap::new();
    for entry in entries {
        events.entry(EventKey::of(entry)).or_default().push(entry);
    }

    let mut summaries: Vec<EventSummary> = events
        .into_values()
        .filter_map(|mut swims| {
            swims.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

            let first = *swims.first()?;
            let latest = *swims.last()?;
            let best = swims
                .iter()
                .copied()
                .reduce(|best, swim| {
                    if is_personal_best(swim.time.as_str(), Some(best.time.as_str())) {
                        swim
                    } else {
                        best
                    }
                })?;

            Some(EventSummary {
                swimmer_id: first.swimmer_id,
                stroke: first.stroke.clone(),
                distance: first.distance,
                attempts: swims.len(),
                personal_best: best.clone(),
                improvement_seconds: calculate_improvement(
                    latest.time.as_str(),
                    first.time.as_str(),
                ),
            })
        })
        .collect();

    summaries.sort_by(|a, b| {
        a.swimmer_id
            .cmp(&b.swimmer_id)
            .then_with(|| a.stroke.cmp(&b.stroke))
            .then(a.distance.cmp(&b.distance))
    });
    summaries
}

/// Render an improvement as a signed display change (`-` = faster).
fn format_delta(improvement_seconds: f64) -> String {
    let sign = if improvement_seconds > 0.0 { '-' } else { '+' };
    format!("{}{}", sign, format_time(improvement_seconds.abs()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::time_format::CanonicalTime;
    use chrono::{Duration, TimeZone, Utc};

    fn make_entry(swimmer: Uuid, stroke: &str, distance: u32, time: &str, day: i64) -> TimeEntry {
        let created_at = Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap() + Duration::days(day);
        TimeEntry {
            id: Uuid::new_v4(),
            swimmer_id: swimmer,
            stroke: stroke.to_string(),
            distance,
            time: CanonicalTime::parse(time).unwrap(),
            test_set: "Main Set".to_string(),
            notes: None,
            team_id: None,
            created_at,
            updated_at: created_at,
        }
    }

    #[test]
    fn test_annotate_history_newest_first() {
        let swimmer = Uuid::new_v4();
        // Newest first, as listed
        let entries = vec![
            make_entry(swimmer, "Freestyle", 100, "1:01.50", 3),
            make_entry(swimmer, "Freestyle", 100, "1:03.00", 2),
            make_entry(swimmer, "Backstroke", 50, "35.0", 1),
            make_entry(swimmer, "Freestyle", 100, "1:02.00", 0),
        ];

        let history = annotate_history(entries);

        assert_eq!(history[0].entry.time.as_str(), "01:01.50");
        assert!(history[0].personal_best);
        assert_eq!(history[0].improvement.as_deref(), Some("-1.50"));
        assert!((history[0].improvement_seconds.unwrap() - 1.5).abs() < 1e-9);

        assert!(!history[1].personal_best);
        assert_eq!(history[1].improvement.as_deref(), Some("+1.00"));

        // First swim of an event: no comparison, always a best
        assert!(history[2].personal_best);
        assert!(history[2].improvement.is_none());
        assert!(history[3].personal_best);
        assert!(history[3].improvement.is_none());
    }

    #[test]
    fn test_events_are_separated_by_swimmer() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let entries = vec![
            make_entry(b, "Freestyle", 50, "40.0", 1),
            make_entry(a, "Freestyle", 50, "30.0", 0),
        ];

        let history = annotate_history(entries);

        assert!(history[0].personal_best);
        assert!(history[0].improvement.is_none());
    }

    #[test]
    fn test_summarize_personal_bests() {
        let swimmer = Uuid::new_v4();
        let entries = vec![
            make_entry(swimmer, "Freestyle", 100, "1:05.00", 0),
            make_entry(swimmer, "freestyle", 100, "1:01.00", 1),
            make_entry(swimmer, "Freestyle", 100, "1:02.00", 2),
            make_entry(swimmer, "Butterfly", 50, "32.10", 0),
        ];

        let summary = summarize(&entries);

        assert_eq!(summary.len(), 2);
        let free = summary.iter().find(|s| s.distance == 100).unwrap();
        assert_eq!(free.attempts, 3);
        assert_eq!(free.personal_best.time.as_str(), "01:01.00");
        assert!((free.improvement_seconds - 3.0).abs() < 1e-9);

        let fly = summary.iter().find(|s| s.distance == 50).unwrap();
        assert_eq!(fly.attempts, 1);
        assert_eq!(fly.improvement_seconds, 0.0);
    }

    #[test]
    fn test_format_delta() {
        assert_eq!(format_delta(0.32), "-0.32");
        assert_eq!(format_delta(-1.15), "+1.15");
        assert_eq!(format_delta(-65.3), "+1:05.30");
    }
}
