// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Attendance record model for storage and API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Calendar date format used for record dates and document IDs.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One user's gym attendance for one calendar date.
///
/// Stored at `gymStatuses/{userId}_{date}`, so there is at most one
/// record per user and date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    /// Owner of the record
    pub user_id: String,
    /// Calendar date (YYYY-MM-DD)
    pub date: String,
    pub attended: bool,
    /// Server-assigned write timestamp (RFC3339)
    #[serde(default)]
    pub updated_at: String,
}

impl AttendanceRecord {
    /// Build a record, rejecting blank keys before anything is persisted.
    pub fn new(
        user_id: &str,
        date: &str,
        attended: bool,
        updated_at: String,
    ) -> Result<Self, SchemaError> {
        if user_id.trim().is_empty() {
            return Err(SchemaError::MissingField("userId"));
        }
        if date.trim().is_empty() {
            return Err(SchemaError::MissingField("date"));
        }

        Ok(Self {
            user_id: user_id.to_string(),
            date: date.to_string(),
            attended,
            updated_at,
        })
    }

    /// Firestore document ID for this record.
    pub fn document_id(&self) -> String {
        record_id(&self.user_id, &self.date)
    }

    /// Parse the record date, `None` unless it is a canonical `YYYY-MM-DD`
    /// calendar date.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date_key(&self.date)
    }
}

/// Parse a date key, rejecting anything that does not format back to itself.
///
/// chrono alone accepts `2025-1-5`, `+2025-01-06` and leading whitespace,
/// which would sort and key differently from the canonical form.
pub fn parse_date_key(date: &str) -> Option<NaiveDate> {
    if date.len() != 10 {
        return None;
    }
    let parsed = NaiveDate::parse_from_str(date, DATE_FORMAT).ok()?;
    (parsed.format(DATE_FORMAT).to_string() == date).then_some(parsed)
}

/// Composite document ID: `{userId}_{date}`.
pub fn record_id(user_id: &str, date: &str) -> String {
    format!("{}_{}", user_id, date)
}

/// Loosely-typed status update as received over HTTP.
///
/// All fields are optional so that a missing field is reported by
/// [`GymStatusUpdate::into_record`] instead of by the JSON extractor.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GymStatusUpdate {
    pub user_id: Option<String>,
    pub date: Option<String>,
    pub attended: Option<bool>,
}

impl GymStatusUpdate {
    /// Validate required fields and produce the record to persist.
    pub fn into_record(self, updated_at: String) -> Result<AttendanceRecord, SchemaError> {
        let user_id = self.user_id.ok_or(SchemaError::MissingField("userId"))?;
        let date = self.date.ok_or(SchemaError::MissingField("date"))?;
        let attended = self.attended.ok_or(SchemaError::MissingField("attended"))?;

        AttendanceRecord::new(&user_id, &date, attended, updated_at)
    }
}

/// Rejections raised at the persistence boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

impl From<SchemaError> for AppError {
    fn from(err: SchemaError) -> Self {
        // Surfaced like a store rejection.
        AppError::Database(err.to_string())
    }
}
