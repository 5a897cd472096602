// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod attendance;
pub mod stats;
pub mod user;

pub use attendance::{AttendanceRecord, GymStatusUpdate, SchemaError};
pub use stats::AttendanceStats;
pub use user::UserProfile;
