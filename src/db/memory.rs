// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process document store with Firestore-like semantics.
//!
//! Documents are keyed exactly as in Firestore, writes replace the whole
//! document, and reads see the latest write. Used for local development
//! (`STORE_BACKEND=memory`) and for HTTP tests that need working storage.

use dashmap::DashMap;
use std::collections::HashMap;

use crate::models::{AttendanceRecord, UserProfile};

/// Concurrent in-memory collections.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: DashMap<String, UserProfile>,
    gym_statuses: DashMap<String, AttendanceRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_user(&self, user_id: &str) -> Option<UserProfile> {
        self.users.get(user_id).map(|entry| entry.value().clone())
    }

    /// All users, ordered by ID like a Firestore collection scan.
    pub fn list_users(&self) -> Vec<UserProfile> {
        let mut users: Vec<UserProfile> =
            self.users.iter().map(|entry| entry.value().clone()).collect();
        users.sort_by(|a, b| a.id.cmp(&b.id));
        users
    }

    pub fn upsert_user(&self, user: &UserProfile) {
        self.users.insert(user.id.clone(), user.clone());
    }

    pub fn upsert_attendance(&self, record: &AttendanceRecord) {
        self.gym_statuses
            .insert(record.document_id(), record.clone());
    }

    /// Attendance flag per user for one date.
    pub fn statuses_for_date(&self, date: &str) -> HashMap<String, bool> {
        self.gym_statuses
            .iter()
            .filter(|entry| entry.value().date == date)
            .map(|entry| (entry.value().user_id.clone(), entry.value().attended))
            .collect()
    }

    /// Records for one user, newest date first.
    pub fn records_for_user(&self, user_id: &str, limit: Option<u32>) -> Vec<AttendanceRecord> {
        let mut records: Vec<AttendanceRecord> = self
            .gym_statuses
            .iter()
            .filter(|entry| entry.value().user_id == user_id)
            .map(|entry| entry.value().clone())
            .collect();

        records.sort_by(|a, b| b.date.cmp(&a.date));
        if let Some(limit) = limit {
            records.truncate(limit as usize);
        }
        records
    }
}
