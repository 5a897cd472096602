// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{AttendanceStats, UserProfile};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route("/api/me/gym-status", post(mark_today))
        .route("/api/users", get(list_users))
        .route("/api/users/{id}", get(get_user))
        .route("/api/users/{id}/history", get(get_history))
        .route("/api/users/{id}/stats", get(get_stats))
}

// ─── User Profiles ───────────────────────────────────────────

/// Public view of a user profile.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserSummary {
    pub id: String,
    pub username: String,
    pub email: String,
    pub created_at: String,
}

impl From<UserProfile> for UserSummary {
    fn from(profile: UserProfile) -> Self {
        // Documents written without a timestamp report "now".
        let created_at = if profile.created_at.is_empty() {
            crate::time_utils::now_rfc3339()
        } else {
            profile.created_at
        };

        Self {
            id: profile.id,
            username: profile.username,
            email: profile.email,
            created_at,
        }
    }
}

#[derive(Serialize)]
pub struct UserResponse {
    pub success: bool,
    pub user: UserSummary,
}

#[derive(Serialize)]
pub struct UsersResponse {
    pub success: bool,
    pub users: Vec<UserSummary>,
}

async fn load_profile(state: &AppState, user_id: &str) -> Result<UserSummary> {
    state
        .db
        .get_user(user_id)
        .await?
        .map(UserSummary::from)
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

/// Get current user profile.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserResponse>> {
    let user = load_profile(&state, &user.user_id).await?;
    Ok(Json(UserResponse {
        success: true,
        user,
    }))
}

/// Get any user's profile.
async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<UserResponse>> {
    let user = load_profile(&state, &user_id).await?;
    Ok(Json(UserResponse {
        success: true,
        user,
    }))
}

/// List every user.
async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<UsersResponse>> {
    let users: Vec<UserSummary> = state
        .db
        .list_users()
        .await?
        .into_iter()
        .map(UserSummary::from)
        .collect();

    tracing::debug!(count = users.len(), "Listed users");

    Ok(Json(UsersResponse {
        success: true,
        users,
    }))
}

// ─── Attendance ──────────────────────────────────────────────

#[derive(Deserialize)]
struct MarkTodayRequest {
    attended: bool,
}

#[derive(Serialize)]
pub struct MarkTodayResponse {
    pub success: bool,
    pub message: String,
    /// The UTC date that was written (YYYY-MM-DD)
    pub date: String,
}

/// Mark the caller's attendance for today.
async fn mark_today(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    body: std::result::Result<Json<MarkTodayRequest>, JsonRejection>,
) -> Result<Json<MarkTodayResponse>> {
    let Json(req) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let record = state
        .attendance
        .mark_today(&user.user_id, req.attended)
        .await?;

    Ok(Json(MarkTodayResponse {
        success: true,
        message: "Gym status updated successfully".to_string(),
        date: record.date,
    }))
}

#[derive(Deserialize)]
struct HistoryQuery {
    /// Number of most recent days (default 30)
    limit: Option<u32>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct HistoryEntry {
    pub date: String,
    pub attended: bool,
}

#[derive(Serialize)]
pub struct HistoryResponse {
    pub success: bool,
    /// Newest first
    pub history: Vec<HistoryEntry>,
}

/// A user's recent attendance.
async fn get_history(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>> {
    let history = state
        .attendance
        .history(&user_id, params.limit)
        .await?
        .into_iter()
        .map(|r| HistoryEntry {
            date: r.date,
            attended: r.attended,
        })
        .collect();

    Ok(Json(HistoryResponse {
        success: true,
        history,
    }))
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub success: bool,
    pub stats: AttendanceStats,
}

/// Streak statistics over a user's recent attendance.
async fn get_stats(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<StatsResponse>> {
    let stats = state.attendance.stats(&user_id, params.limit).await?;

    tracing::debug!(
        user_id = %user_id,
        current_streak = stats.current_streak,
        longest_streak = stats.longest_streak,
        "Computed attendance stats"
    );

    Ok(Json(StatsResponse {
        success: true,
        stats,
    }))
}
