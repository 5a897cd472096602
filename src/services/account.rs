// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account sign-up and sign-in.
//!
//! Credentials are checked by the identity provider; this service keeps the
//! matching profile document in the `users` collection.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::db::FirestoreDb;
use crate::error::Result;
use crate::models::UserProfile;
use crate::services::IdentityClient;
use crate::time_utils::now_rfc3339;

/// Username reported when a signed-in account has no profile document.
const FALLBACK_USERNAME: &str = "User";

/// User returned to the client after sign-in or sign-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    pub username: String,
}

#[derive(Clone)]
pub struct AccountService {
    identity: IdentityClient,
    db: FirestoreDb,
}

impl AccountService {
    pub fn new(identity: IdentityClient, db: FirestoreDb) -> Self {
        Self { identity, db }
    }

    /// Create a provider account and its profile document.
    pub async fn sign_up(&self, username: &str, email: &str, password: &str) -> Result<SessionUser> {
        let account = self.identity.sign_up(email, password).await?;

        let now = now_rfc3339();
        let profile = UserProfile {
            id: account.user_id.clone(),
            username: username.to_string(),
            email: account.email.clone(),
            created_at: now.clone(),
            updated_at: now,
        };
        self.db.upsert_user(&profile).await?;

        tracing::info!(user_id = %profile.id, "Account created");

        Ok(SessionUser {
            id: profile.id,
            email: profile.email,
            username: profile.username,
        })
    }

    /// Check credentials and look up the profile's username.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<SessionUser> {
        let account = self.identity.sign_in(email, password).await?;

        let username = match self.db.get_user(&account.user_id).await {
            Ok(Some(profile)) => profile.username,
            Ok(None) => FALLBACK_USERNAME.to_string(),
            Err(e) => {
                tracing::warn!(user_id = %account.user_id, error = %e, "Profile lookup failed during sign-in");
                FALLBACK_USERNAME.to_string()
            }
        };

        tracing::info!(user_id = %account.user_id, "User signed in");

        Ok(SessionUser {
            id: account.user_id,
            email: account.email,
            username,
        })
    }
}
