// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (profile storage)
//! - Gym statuses (one attendance record per user and date)

use std::collections::HashMap;
use std::sync::Arc;

use crate::db::collections;
use crate::db::memory::MemoryStore;
use crate::error::AppError;
use crate::models::{AttendanceRecord, UserProfile};

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    backend: Backend,
}

#[derive(Clone)]
enum Backend {
    Firestore(firestore::FirestoreDb),
    Memory(Arc<MemoryStore>),
    Offline,
}

/// Borrowed view of a connected backend.
enum Client<'a> {
    Firestore(&'a firestore::FirestoreDb),
    Memory(&'a MemoryStore),
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            backend: Backend::Firestore(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            backend: Backend::Firestore(client),
        })
    }

    /// Create a database backed by a process-local store.
    pub fn new_in_memory() -> Self {
        tracing::info!("Using in-memory document store");
        Self {
            backend: Backend::Memory(Arc::new(MemoryStore::new())),
        }
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self {
            backend: Backend::Offline,
        }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<Client<'_>, AppError> {
        match &self.backend {
            Backend::Firestore(db) => Ok(Client::Firestore(db)),
            Backend::Memory(store) => Ok(Client::Memory(store)),
            Backend::Offline => Err(AppError::Database(
                "Database not connected (offline mode)".to_string(),
            )),
        }
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user profile by ID.
    pub async fn get_user(&self, user_id: &str) -> Result<Option<UserProfile>, AppError> {
        let user: Option<UserProfile> = match self.get_client()? {
            Client::Memory(store) => store.get_user(user_id),
            Client::Firestore(db) => db
                .fluent()
                .select()
                .by_id_in(collections::USERS)
                .obj()
                .one(user_id)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?,
        };

        Ok(user.map(|mut user| {
            user.id = user_id.to_string();
            user
        }))
    }

    /// List every user profile (unbounded).
    pub async fn list_users(&self) -> Result<Vec<UserProfile>, AppError> {
        match self.get_client()? {
            Client::Memory(store) => Ok(store.list_users()),
            Client::Firestore(db) => db
                .fluent()
                .select()
                .from(collections::USERS)
                .obj()
                .query()
                .await
                .map_err(|e| AppError::Database(e.to_string())),
        }
    }

    /// Create or update a user profile.
    pub async fn upsert_user(&self, user: &UserProfile) -> Result<(), AppError> {
        match self.get_client()? {
            Client::Memory(store) => store.upsert_user(user),
            Client::Firestore(db) => {
                let _: () = db
                    .fluent()
                    .update()
                    .in_col(collections::USERS)
                    .document_id(&user.id)
                    .object(user)
                    .execute()
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
            }
        }
        Ok(())
    }

    // ─── Gym Status Operations ───────────────────────────────────

    /// Create or overwrite the attendance record for `(user_id, date)`.
    ///
    /// Concurrent writes to the same key are last-write-wins.
    pub async fn upsert_attendance(&self, record: &AttendanceRecord) -> Result<(), AppError> {
        match self.get_client()? {
            Client::Memory(store) => store.upsert_attendance(record),
            Client::Firestore(db) => {
                let _: () = db
                    .fluent()
                    .update()
                    .in_col(collections::GYM_STATUSES)
                    .document_id(record.document_id())
                    .object(record)
                    .execute()
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
            }
        }

        tracing::debug!(
            user_id = %record.user_id,
            date = %record.date,
            attended = record.attended,
            "Gym status stored"
        );
        Ok(())
    }

    /// Attendance flag per user for one date.
    ///
    /// Users without a record for the date are absent from the map.
    pub async fn get_statuses_for_date(
        &self,
        date: &str,
    ) -> Result<HashMap<String, bool>, AppError> {
        match self.get_client()? {
            Client::Memory(store) => Ok(store.statuses_for_date(date)),
            Client::Firestore(db) => {
                let records: Vec<AttendanceRecord> = db
                    .fluent()
                    .select()
                    .from(collections::GYM_STATUSES)
                    .filter(|q| q.for_all([q.field("date").eq(date)]))
                    .obj()
                    .query()
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;

                Ok(records
                    .into_iter()
                    .map(|record| (record.user_id, record.attended))
                    .collect())
            }
        }
    }

    /// Attendance records for one user, newest date first.
    pub async fn get_records_for_user(
        &self,
        user_id: &str,
        limit: Option<u32>,
    ) -> Result<Vec<AttendanceRecord>, AppError> {
        match self.get_client()? {
            Client::Memory(store) => Ok(store.records_for_user(user_id, limit)),
            Client::Firestore(db) => {
                let query = db
                    .fluent()
                    .select()
                    .from(collections::GYM_STATUSES)
                    .filter(|q| q.for_all([q.field("userId").eq(user_id)]))
                    .order_by([("date", firestore::FirestoreQueryDirection::Descending)]);

                let query = match limit {
                    Some(limit) => query.limit(limit),
                    None => query,
                };

                query
                    .obj()
                    .query()
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))
            }
        }
    }
}
