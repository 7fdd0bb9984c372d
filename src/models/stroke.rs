// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Swim stroke labels.
//!
//! Strokes are stored as free text; this list drives defaults and labels
//! but never rejects a stored value.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stroke {
    #[default]
    Freestyle,
    Backstroke,
    Breaststroke,
    Butterfly,
    #[serde(rename = "IM")]
    Im,
}

impl Stroke {
    pub const ALL: [Stroke; 5] = [
        Stroke::Freestyle,
        Stroke::Backstroke,
        Stroke::Breaststroke,
        Stroke::Butterfly,
        Stroke::Im,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stroke::Freestyle => "Freestyle",
            Stroke::Backstroke => "Backstroke",
            Stroke::Breaststroke => "Breaststroke",
            Stroke::Butterfly => "Butterfly",
            Stroke::Im => "IM",
        }
    }

    /// Match a label case-insensitively ("freestyle", "im").
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(label))
    }

    /// Canonical casing for known strokes; other labels are kept as typed.
    pub fn normalize_label(label: &str) -> String {
        match Self::from_label(label) {
            Some(stroke) => stroke.to_string(),
            None => label.trim().to_string(),
        }
    }
}

impl fmt::Display for Stroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
