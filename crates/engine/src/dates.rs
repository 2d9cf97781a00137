use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::EngineError;

// ---------------------------------------------------------------------------
// Day normalization
// ---------------------------------------------------------------------------

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Strip a trailing `Z` or `±HH:MM` offset so the remainder parses as a
/// naive datetime. The wall-clock date is kept as written.
fn strip_offset(s: &str) -> &str {
    let s = s.trim_end_matches('Z');
    if s.len() > 19 {
        if let Some(pos) = s.rfind(['+', '-']) {
            if pos >= 19 {
                return &s[..pos];
            }
        }
    }
    s
}

/// Truncate a date or datetime string to its calendar day.
///
/// This is the only place time-of-day is discarded; every booking date enters
/// the engine through here.
pub fn normalize_to_day(input: &str) -> Result<NaiveDate, EngineError> {
    let trimmed = input.trim();
    if let Ok(d) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(d);
    }
    let s = strip_offset(trimmed);
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.date());
        }
    }
    Err(EngineError::InvalidDate(input.to_string()))
}

/// Serde adapter: deserialize any accepted date/datetime string as a day.
pub fn deserialize_day<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    normalize_to_day(&raw).map_err(serde::de::Error::custom)
}

/// Format a day as `MMM D, YYYY` (e.g. `Jun 1, 2025`).
pub fn format_day(day: NaiveDate) -> String {
    day.format("%b %-d, %Y").to_string()
}

// ---------------------------------------------------------------------------
// Half-open day interval
// ---------------------------------------------------------------------------

/// Half-open stay `[start, end)`: the guest sleeps the nights from `start` up
/// to but not including `end`, so a check-out day is free for the next arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StayRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl StayRange {
    /// Build a range, rejecting zero-length and inverted stays.
    pub fn new(start: NaiveDate, end: NaiveDate, label: &str) -> Result<Self, EngineError> {
        if start >= end {
            return Err(EngineError::InvalidRange {
                label: label.to_string(),
                start,
                end,
            });
        }
        Ok(Self {
            start_date: start,
            end_date: end,
        })
    }

    pub fn nights(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }

    pub fn overlaps(&self, other: &StayRange) -> bool {
        dates_overlap(self.start_date, self.end_date, other.start_date, other.end_date)
    }

    pub fn overlap_days(&self, other: &StayRange) -> i64 {
        calculate_overlap_days(self.start_date, self.end_date, other.start_date, other.end_date)
    }
}

/// `[start1, end1)` and `[start2, end2)` share at least one night.
pub fn dates_overlap(start1: NaiveDate, end1: NaiveDate, start2: NaiveDate, end2: NaiveDate) -> bool {
    start1 < end2 && start2 < end1
}

/// Number of shared nights; 0 when the ranges do not overlap.
pub fn calculate_overlap_days(
    start1: NaiveDate,
    end1: NaiveDate,
    start2: NaiveDate,
    end2: NaiveDate,
) -> i64 {
    if !dates_overlap(start1, end1, start2, end2) {
        return 0;
    }
    let overlap_start = start1.max(start2);
    let overlap_end = end1.min(end2);
    (overlap_end - overlap_start).num_days()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
