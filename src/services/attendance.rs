// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Attendance workflows on top of the document store.

use std::collections::HashMap;

use crate::db::FirestoreDb;
use crate::error::Result;
use crate::models::{AttendanceRecord, AttendanceStats, GymStatusUpdate};
use crate::time_utils::{now_rfc3339, today_utc};

/// Number of most recent records used for history and stats by default.
pub const DEFAULT_HISTORY_LIMIT: u32 = 30;
/// Upper bound for a caller-supplied history limit.
pub const MAX_HISTORY_LIMIT: u32 = 366;

/// Reads and writes gym attendance.
#[derive(Clone)]
pub struct AttendanceService {
    db: FirestoreDb,
}

impl AttendanceService {
    pub fn new(db: FirestoreDb) -> Self {
        Self { db }
    }

    /// Store a status update for any user and date.
    ///
    /// Dates are not range checked; missing fields are rejected before the
    /// write reaches the store.
    pub async fn record_status(&self, update: GymStatusUpdate) -> Result<AttendanceRecord> {
        let record = update.into_record(now_rfc3339())?;
        self.db.upsert_attendance(&record).await?;
        Ok(record)
    }

    /// Store the caller's status for the current UTC day.
    pub async fn mark_today(&self, user_id: &str, attended: bool) -> Result<AttendanceRecord> {
        let record = AttendanceRecord::new(user_id, &today_utc(), attended, now_rfc3339())?;
        self.db.upsert_attendance(&record).await?;

        tracing::info!(user_id, date = %record.date, attended, "Marked today's attendance");
        Ok(record)
    }

    /// Who went to the gym on `date`. Users without a record are absent.
    pub async fn statuses_for_date(&self, date: &str) -> Result<HashMap<String, bool>> {
        self.db.get_statuses_for_date(date).await
    }

    /// Most recent records for a user, newest first.
    pub async fn history(&self, user_id: &str, limit: Option<u32>) -> Result<Vec<AttendanceRecord>> {
        let limit = clamp_limit(limit);
        self.db.get_records_for_user(user_id, Some(limit)).await
    }

    /// Streak statistics over the same window as [`AttendanceService::history`].
    pub async fn stats(&self, user_id: &str, limit: Option<u32>) -> Result<AttendanceStats> {
        let records = self.history(user_id, limit).await?;
        Ok(AttendanceStats::from_records(&records))
    }
}

/// Apply the default and the upper bound to a history limit.
pub fn clamp_limit(limit: Option<u32>) -> u32 {
    limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT)
}
