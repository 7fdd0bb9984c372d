// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Swim time parsing, validation and normalization.
//!
//! Times are entered free-form ("1:35.6", "24.5", "12:40.98") and stored in
//! the canonical `MM:SS.ss` shape. Numeric seconds are derived on demand for
//! comparisons (improvements, personal bests) and never stored.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Accepted raw input: optional `m:` or `mm:`, one or two whole-second
/// digits, optional one or two fractional digits.
static TIME_INPUT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2}:)?\d{1,2}(\.\d{1,2})?$").expect("time input pattern is valid")
});

/// Example shown to users whose input is rejected.
pub const TIME_INPUT_HINT: &str = "Please enter a valid time (e.g., 1:35.6, 24.5, or 12:40.98)";

/// Check that a raw time string has an accepted shape.
///
/// This is a syntactic gate only: `"1:75"` passes even though 75 seconds is
/// out of range.
pub fn validate_time_input(raw: &str) -> bool {
    let input = raw.trim();
    !input.is_empty() && TIME_INPUT.is_match(input)
}

/// Normalize a raw time string to `MM:SS.ss`.
///
/// Never fails: unparseable numeric parts are treated as zero, so callers
/// should gate on [`validate_time_input`] first. Seconds are not carried into
/// minutes (`"1:75"` becomes `"01:75.00"`).
pub fn parse_time_to_standard_format(raw: &str) -> String {
    let input = raw.trim();

    match input.split_once(':') {
        Some((minutes_part, seconds_part)) => {
            let minutes = leading_integer(minutes_part).unwrap_or(0);
            let seconds = or_zero(leading_decimal(seconds_part));
            format!("{:0>2}:{}", minutes, pad_seconds(seconds))
        }
        None => format!("00:{}", pad_seconds(or_zero(leading_decimal(input)))),
    }
}

/// Convert a canonical (or raw) time string to seconds.
///
/// Returns NaN when a component is not numeric.
pub fn parse_time(time: &str) -> f64 {
    let parts: Vec<&str> = time.split(':').collect();

    if let [minutes, seconds] = parts.as_slice() {
        let minutes = leading_integer(minutes).map_or(f64::NAN, |m| m as f64);
        let seconds = leading_decimal(seconds).unwrap_or(f64::NAN);
        minutes * 60.0 + seconds
    } else {
        leading_decimal(time).unwrap_or(f64::NAN)
    }
}

/// Seconds gained between two swims: `previous - current`.
///
/// Positive means the current swim was faster.
pub fn calculate_improvement(current_time: &str, previous_time: &str) -> f64 {
    parse_time(previous_time) - parse_time(current_time)
}

/// Whether `current_time` beats the best time so far (lower is better).
///
/// With no prior best every time is a personal best.
pub fn is_personal_best(current_time: &str, best_time: Option<&str>) -> bool {
    match best_time {
        Some(best) if !best.is_empty() => parse_time(current_time) < parse_time(best),
        _ => true,
    }
}

/// Format a number of seconds for display: `S.ss` under a minute,
/// `M:SS.ss` otherwise.
pub fn format_time(seconds: f64) -> String {
    let minutes = (seconds / 60.0).floor();
    let remaining = seconds % 60.0;

    if minutes > 0.0 {
        format!("{}:{}", minutes as i64, pad_seconds(remaining))
    } else {
        format!("{:.2}", remaining)
    }
}

fn pad_seconds(seconds: f64) -> String {
    format!("{:0>5}", format!("{:.2}", seconds))
}

// Maps -0.0 to 0.0 so it never renders as "-0.00".
fn or_zero(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v != 0.0 => v,
        _ => 0.0,
    }
}

/// Longest numeric prefix of `s` after leading whitespace.
///
/// Integers are an optional sign followed by digits. Decimals may also carry
/// a fraction and an exponent. Returns `None` when no digit is found.
fn numeric_prefix(s: &str, decimal: bool) -> Option<&str> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let count_digits = |from: usize| bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let mut digits = count_digits(end);
    end += digits;

    if decimal {
        if bytes.get(end) == Some(&b'.') {
            let fraction = count_digits(end + 1);
            if digits + fraction > 0 {
                end += 1 + fraction;
                digits += fraction;
            }
        }

        if digits > 0 && matches!(bytes.get(end), Some(b'e' | b'E')) {
            let mut exp_end = end + 1;
            if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
                exp_end += 1;
            }
            let exponent = count_digits(exp_end);
            if exponent > 0 {
                end = exp_end + exponent;
            }
        }
    }

    (digits > 0).then(|| &s[..end])
}

pub(crate) fn leading_integer(s: &str) -> Option<i64> {
    numeric_prefix(s, false)?.parse().ok()
}

pub(crate) fn leading_decimal(s: &str) -> Option<f64> {
    numeric_prefix(s, true)?.parse().ok()
}

// ─── Canonical Time ──────────────────────────────────────────

/// Errors from time validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeFormatError {
    #[error("Invalid time '{input}': {hint}", hint = TIME_INPUT_HINT)]
    Invalid { input: String },
}

/// A validated time in canonical `MM:SS.ss` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CanonicalTime(String);

impl CanonicalTime {
    /// Validate and normalize a raw time string.
    pub fn parse(raw: &str) -> Result<Self, TimeFormatError> {
        if !validate_time_input(raw) {
            return Err(TimeFormatError::Invalid {
                input: raw.trim().to_string(),
            });
        }
        Ok(Self(parse_time_to_standard_format(raw)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Elapsed time in seconds.
    pub fn seconds(&self) -> f64 {
        parse_time(&self.0)
    }
}

impl FromStr for CanonicalTime {
    type Err = TimeFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CanonicalTime {
    type Error = TimeFormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CanonicalTime> for String {
    fn from(time: CanonicalTime) -> Self {
        time.0
    }
}

impl AsRef<str> for CanonicalTime {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
