// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! CSV export and plain-text performance reports.

use chrono::NaiveDate;

use crate::models::TimeEntry;

const CSV_HEADERS: [&str; 7] = [
    "Date",
    "Swimmer",
    "Stroke",
    "Distance (m)",
    "Time",
    "Test Set",
    "Notes",
];

/// A time entry paired with the swimmer's display name.
#[derive(Debug, Clone, Copy)]
pub struct ReportRow<'a> {
    pub entry: &'a TimeEntry,
    pub swimmer_name: &'a str,
}

impl ReportRow<'_> {
    fn date(&self) -> String {
        self.entry.created_at.format("%Y-%m-%d").to_string()
    }
}

/// Render entries as CSV text (header line first, `\n` separated).
pub fn export_to_csv(rows: &[ReportRow<'_>]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(CSV_HEADERS.join(","));

    for row in rows {
        let entry = row.entry;
        lines.push(
            [
                row.date(),
                quoted(row.swimmer_name),
                entry.stroke.clone(),
                entry.distance.to_string(),
                entry.time.to_string(),
                quoted(&entry.test_set),
                quoted(entry.notes.as_deref().unwrap_or_default()),
            ]
            .join(","),
        );
    }

    lines.join("\n")
}

fn quoted(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Build a plain-text report, optionally limited to one swimmer by name.
pub fn generate_performance_report(
    rows: &[ReportRow<'_>],
    swimmer_name: Option<&str>,
    generated_on: NaiveDate,
) -> String {
    let rows: Vec<&ReportRow<'_>> = rows
        .iter()
        .filter(|row| swimmer_name.is_none_or(|name| row.swimmer_name == name))
        .collect();

    let mut strokes: Vec<&str> = Vec::new();
    let mut distances: Vec<u32> = Vec::new();
    for row in &rows {
        if !strokes.contains(&row.entry.stroke.as_str()) {
            strokes.push(&row.entry.stroke);
        }
        if !distances.contains(&row.entry.distance) {
            distances.push(row.entry.distance);
        }
    }

    let mut report = String::from("Swimming Performance Report\n");
    report.push_str(&format!("Generated: {}\n\n", generated_on.format("%Y-%m-%d")));

    if let Some(name) = swimmer_name {
        report.push_str(&format!("Swimmer: {}\n", name));
    }

    report.push_str(&format!("Total Times Recorded: {}\n", rows.len()));
    report.push_str(&format!("Strokes: {}\n", strokes.join(", ")));
    let distances: Vec<String> = distances.iter().map(|d| format!("{}m", d)).collect();
    report.push_str(&format!("Distances: {}\n\n", distances.join(", ")));

    report.push_str("Detailed Times:\n");
    for row in rows {
        let entry = row.entry;
        report.push_str(&format!(
            "{} - {} - {}m {} - {} ({})\n",
            row.date(),
            row.swimmer_name,
            entry.distance,
            entry.stroke,
            entry.time,
            entry.test_set
        ));
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::time_format::CanonicalTime;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn make_entry(stroke: &str, distance: u32, time: &str, notes: Option<&str>) -> TimeEntry {
        let created_at = Utc.with_ymd_and_hms(2025, 3, 14, 7, 30, 0).unwrap();
        TimeEntry {
            id: Uuid::new_v4(),
            swimmer_id: Uuid::new_v4(),
            stroke: stroke.to_string(),
            distance,
            time: CanonicalTime::parse(time).unwrap(),
            test_set: "Time Trial".to_string(),
            notes: notes.map(String::from),
            team_id: None,
            created_at,
            updated_at: created_at,
        }
    }

    #[test]
    fn test_export_to_csv() {
        let free = make_entry("Freestyle", 100, "1:02.45", Some("Great \"turns\""));
        let back = make_entry("Backstroke", 50, "31.2", None);
        let rows = [
            ReportRow {
                entry: &free,
                swimmer_name: "John Doe",
            },
            ReportRow {
                entry: &back,
                swimmer_name: "Jane Roe",
            },
        ];

        let csv = export_to_csv(&rows);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Date,Swimmer,Stroke,Distance (m),Time,Test Set,Notes");
        assert_eq!(
            lines[1],
            "2025-03-14,\"John Doe\",Freestyle,100,01:02.45,\"Time Trial\",\"Great \"\"turns\"\"\""
        );
        assert_eq!(
            lines[2],
            "2025-03-14,\"Jane Roe\",Backstroke,50,00:31.20,\"Time Trial\",\"\""
        );
    }

    #[test]
    fn test_export_empty_has_header_only() {
        assert_eq!(
            export_to_csv(&[]),
            "Date,Swimmer,Stroke,Distance (m),Time,Test Set,Notes"
        );
    }

    #[test]
    fn test_report_filters_by_swimmer() {
        let a = make_entry("Freestyle", 100, "1:02.45", None);
        let b = make_entry("Butterfly", 50, "29.9", None);
        let c = make_entry("Freestyle", 50, "27.0", None);
        let rows = [
            ReportRow {
                entry: &a,
                swimmer_name: "John Doe",
            },
            ReportRow {
                entry: &b,
                swimmer_name: "Jane Roe",
            },
            ReportRow {
                entry: &c,
                swimmer_name: "John Doe",
            },
        ];
        let day = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();

        let report = generate_performance_report(&rows, Some("John Doe"), day);

        assert_eq!(
            report,
            "Swimming Performance Report\n\
             Generated: 2025-03-15\n\
             \n\
             Swimmer: John Doe\n\
             Total Times Recorded: 2\n\
             Strokes: Freestyle\n\
             Distances: 100m, 50m\n\
             \n\
             Detailed Times:\n\
             2025-03-14 - John Doe - 100m Freestyle - 01:02.45 (Time Trial)\n\
             2025-03-14 - John Doe - 50m Freestyle - 00:27.00 (Time Trial)\n"
        );

        let everyone = generate_performance_report(&rows, None, day);
        assert!(everyone.contains("Total Times Recorded: 3\n"));
        assert!(everyone.contains("Strokes: Freestyle, Butterfly\n"));
        assert!(!everyone.contains("Swimmer:"));
    }
}
