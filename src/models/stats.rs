//! Attendance statistics derived from a user's records.
//!
//! Nothing here is persisted; stats are recomputed on every read from the
//! list of attendance records for one user.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::AttendanceRecord;

/// Derived statistics for one user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AttendanceStats {
    /// Consecutive attended days counting back from the most recent record
    pub current_streak: u32,
    /// Longest run of consecutive attended records
    pub longest_streak: u32,
    pub attended_days: u32,
    pub total_days: u32,
    /// Percentage of attended days, rounded half up (0 when there is no data)
    pub attendance_rate: u32,
}

impl AttendanceStats {
    /// Compute stats from an unordered list of records for a single user.
    ///
    /// Records with unparseable dates are ignored. If a date appears more
    /// than once, the record with the newest `updated_at` is used, with
    /// later list entries winning ties.
    pub fn from_records(records: &[AttendanceRecord]) -> Self {
        let days = latest_per_day(records);
        if days.is_empty() {
            return Self::default();
        }

        let total_days = days.len() as u32;
        let attended_days = days.values().filter(|d| d.attended).count() as u32;

        // Most recent first; stop at the first missed day.
        let current_streak = days.values().rev().take_while(|d| d.attended).count() as u32;

        let mut longest_streak = 0;
        let mut run = 0;
        for day in days.values() {
            if day.attended {
                run += 1;
                longest_streak = longest_streak.max(run);
            } else {
                run = 0;
            }
        }

        Self {
            current_streak,
            longest_streak,
            attended_days,
            total_days,
            attendance_rate: rounded_percent(attended_days, total_days),
        }
    }
}

struct DayEntry {
    attended: bool,
    updated_at: Option<DateTime<FixedOffset>>,
}

/// Collapse records to one entry per valid calendar date, ordered by date.
fn latest_per_day(records: &[AttendanceRecord]) -> BTreeMap<NaiveDate, DayEntry> {
    let mut days: BTreeMap<NaiveDate, DayEntry> = BTreeMap::new();

    for record in records {
        let Some(date) = record.parsed_date() else {
            tracing::debug!(date = %record.date, "Skipping record with invalid date");
            continue;
        };

        let entry = DayEntry {
            attended: record.attended,
            updated_at: DateTime::parse_from_rfc3339(&record.updated_at).ok(),
        };

        match days.get(&date) {
            Some(existing) if existing.updated_at > entry.updated_at => {}
            _ => {
                days.insert(date, entry);
            }
        }
    }

    days
}

/// `round(part / whole * 100)` with halves rounded up, 0 for an empty whole.
fn rounded_percent(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    let part = part as u64;
    let whole = whole as u64;
    ((part * 200 + whole) / (whole * 2)) as u32
}
