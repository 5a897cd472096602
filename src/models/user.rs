//! User profile model for storage and API.

use serde::{Deserialize, Serialize};

/// User profile stored in Firestore at `users/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Identity provider user ID (document ID, not stored as a field)
    #[serde(alias = "_firestore_id", default, skip_serializing)]
    pub id: String,
    pub username: String,
    pub email: String,
    /// When the account was created (RFC3339)
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}
