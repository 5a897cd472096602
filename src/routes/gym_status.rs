// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Public gym status routes.
//!
//! `POST` stores any user's status for any date; `GET` returns everyone's
//! status for one date.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::GymStatusUpdate;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/gym-status", get(get_statuses).post(update_status))
}

/// Acknowledgement for a stored status.
#[derive(Serialize)]
pub struct StatusUpdatedResponse {
    pub success: bool,
    pub message: String,
}

/// Store a gym status.
///
/// Missing fields are rejected before the write and reported as a 500,
/// the same as any other store failure.
async fn update_status(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<GymStatusUpdate>, JsonRejection>,
) -> Result<Json<StatusUpdatedResponse>> {
    let Json(update) = body.map_err(|e| {
        tracing::debug!(error = %e, "Unreadable gym status update");
        AppError::OperationFailed("Failed to update gym status".to_string())
    })?;

    let record = state.attendance.record_status(update).await?;

    tracing::info!(
        user_id = %record.user_id,
        date = %record.date,
        attended = record.attended,
        "Gym status updated"
    );

    Ok(Json(StatusUpdatedResponse {
        success: true,
        message: "Gym status updated successfully".to_string(),
    }))
}

#[derive(Deserialize)]
struct StatusQuery {
    date: Option<String>,
}

/// Everyone's status for one date.
#[derive(Serialize)]
pub struct StatusesResponse {
    pub success: bool,
    /// user ID -> attended; users without a record are absent
    pub data: HashMap<String, bool>,
}

async fn get_statuses(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StatusQuery>,
) -> Result<Json<StatusesResponse>> {
    let date = params
        .date
        .filter(|d| !d.is_empty())
        .ok_or_else(|| AppError::BadRequest("Date parameter is required".to_string()))?;

    let data = state.attendance.statuses_for_date(&date).await?;

    tracing::debug!(date = %date, count = data.len(), "Fetched gym statuses");

    Ok(Json(StatusesResponse {
        success: true,
        data,
    }))
}
