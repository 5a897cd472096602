// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Email/password authentication routes.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::middleware::auth::{create_jwt, SESSION_COOKIE, SESSION_DAYS};
use crate::services::account::SessionUser;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/signin", post(sign_in))
        .route("/api/auth/signup", post(sign_up))
        .route("/api/auth/signout", post(sign_out))
}

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    email: String,
    password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SignUpRequest {
    #[validate(length(min = 1, max = 50, message = "Username must be 1-50 characters"))]
    username: String,
    #[validate(email(message = "Invalid email address"))]
    email: String,
    #[validate(length(min = 6, message = "Password should be at least 6 characters"))]
    password: String,
}

/// Successful sign-in or sign-up.
#[derive(Serialize)]
pub struct SessionResponse {
    pub success: bool,
    pub user: SessionUser,
    /// Session token, also set as an HttpOnly cookie
    pub token: String,
}

/// Sign in with email and password.
async fn sign_in(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    body: std::result::Result<Json<SignInRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    let Json(req) = body.map_err(|e| {
        tracing::debug!(error = %e, "Unreadable sign-in request");
        AppError::AuthenticationFailed("Invalid credentials".to_string())
    })?;

    let user = state.accounts.sign_in(&req.email, &req.password).await?;
    start_session(&state, jar, user)
}

/// Create an account and sign in.
async fn sign_up(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    body: std::result::Result<Json<SignUpRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    let Json(mut req) = body.map_err(|e| {
        tracing::debug!(error = %e, "Unreadable sign-up request");
        AppError::OperationFailed("Failed to create account".to_string())
    })?;

    // Length limits apply to the stored, trimmed name.
    req.username = req.username.trim().to_string();
    req.validate()
        .map_err(|e| AppError::BadRequest(first_validation_message(&e)))?;

    let user = state
        .accounts
        .sign_up(&req.username, &req.email, &req.password)
        .await?;
    start_session(&state, jar, user)
}

/// Clear the session cookie. Tokens are stateless, so nothing else to do.
async fn sign_out(jar: CookieJar) -> (StatusCode, CookieJar) {
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (StatusCode::NO_CONTENT, jar)
}

fn start_session(
    state: &AppState,
    jar: CookieJar,
    user: SessionUser,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    let token = create_jwt(&user.id, &state.config.jwt_signing_key)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;

    let cookie = Cookie::build((SESSION_COOKIE, token.clone()))
        .path("/")
        .http_only(true)
        .secure(state.config.frontend_url.starts_with("https://"))
        .same_site(SameSite::Lax)
        .max_age(time::Duration::days(SESSION_DAYS));

    Ok((
        jar.add(cookie),
        Json(SessionResponse {
            success: true,
            user,
            token,
        }),
    ))
}

/// Pick a single human-readable message out of validation errors.
fn first_validation_message(errors: &validator::ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    for (field, errs) in fields {
        if let Some(err) = errs.first() {
            return err
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Invalid {}", field));
        }
    }

    "Invalid request".to_string()
}
