// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::models::attendance::DATE_FORMAT;

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Current write timestamp.
pub fn now_rfc3339() -> String {
    format_utc_rfc3339(Utc::now())
}

/// Calendar date (YYYY-MM-DD) of a UTC timestamp.
pub fn date_key(date: DateTime<Utc>) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Today's date key in UTC.
pub fn today_utc() -> String {
    date_key(Utc::now())
}
