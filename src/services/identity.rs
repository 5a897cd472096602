// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firebase Identity Toolkit client for email/password accounts.
//!
//! Handles:
//! - Account creation (`accounts:signUp`)
//! - Password sign-in (`accounts:signInWithPassword`)
//! - Mapping provider error codes to user-facing messages

use crate::error::AppError;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Identity Toolkit REST client.
#[derive(Clone)]
pub struct IdentityClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// Account returned by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityAccount {
    /// Stable user ID (`localId`)
    pub user_id: String,
    pub email: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    #[serde(default)]
    email: String,
}

#[derive(Deserialize)]
struct ProviderErrorBody {
    error: ProviderError,
}

#[derive(Deserialize)]
struct ProviderError {
    message: String,
}

/// Why a provider call failed.
enum CallError {
    /// The provider answered and refused the request.
    Rejected(String),
    /// Transport failure or unexpected response.
    Unavailable(String),
}

impl IdentityClient {
    /// Create a client for the given Identity Toolkit base URL.
    pub fn new(base_url: &str, api_key: &str) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .context("failed building identity HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Create an email/password account.
    ///
    /// A provider refusal (duplicate email, weak password) is a
    /// `SignUpRejected`; anything else is an `IdentityProvider` error.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<IdentityAccount, AppError> {
        self.call("accounts:signUp", email, password)
            .await
            .map_err(|e| match e {
                CallError::Rejected(code) => AppError::SignUpRejected(describe_error(&code)),
                CallError::Unavailable(msg) => AppError::IdentityProvider(msg),
            })
    }

    /// Verify an email/password pair.
    ///
    /// Every failure is reported as `AuthenticationFailed`.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<IdentityAccount, AppError> {
        self.call("accounts:signInWithPassword", email, password)
            .await
            .map_err(|e| match e {
                CallError::Rejected(code) => AppError::AuthenticationFailed(describe_error(&code)),
                CallError::Unavailable(msg) => {
                    tracing::warn!(error = %msg, "Identity provider unavailable during sign-in");
                    AppError::AuthenticationFailed("Invalid credentials".to_string())
                }
            })
    }

    async fn call(
        &self,
        method: &str,
        email: &str,
        password: &str,
    ) -> Result<IdentityAccount, CallError> {
        let url = format!("{}/{}", self.base_url, method);
        let body = PasswordRequest {
            email,
            password,
            return_secure_token: true,
        };

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| CallError::Unavailable(format!("Request to {} failed: {}", method, e)))?;

        let status = response.status();
        if status.is_client_error() {
            let text = response.text().await.unwrap_or_default();
            let code = serde_json::from_str::<ProviderErrorBody>(&text)
                .map(|b| b.error.message)
                .unwrap_or_else(|_| format!("HTTP {}", status));
            tracing::debug!(method, code = %code, "Identity provider rejected request");
            return Err(CallError::Rejected(code));
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(CallError::Unavailable(format!("HTTP {}: {}", status, text)));
        }

        let account: AccountResponse = response
            .json()
            .await
            .map_err(|e| CallError::Unavailable(format!("JSON parse error: {}", e)))?;

        Ok(IdentityAccount {
            user_id: account.local_id,
            email: if account.email.is_empty() {
                email.to_string()
            } else {
                account.email
            },
        })
    }
}

/// Turn an Identity Toolkit error code into a user-facing message.
///
/// Codes look like `EMAIL_EXISTS` or `WEAK_PASSWORD : Password should be ...`.
pub fn describe_error(code: &str) -> String {
    let key = code.split_whitespace().next().unwrap_or(code);
    match key {
        "EMAIL_EXISTS" => "Email is already in use".to_string(),
        "INVALID_EMAIL" => "Invalid email address".to_string(),
        "WEAK_PASSWORD" => "Password should be at least 6 characters".to_string(),
        "MISSING_PASSWORD" => "Password is required".to_string(),
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
            "Invalid credentials".to_string()
        }
        "USER_DISABLED" => "This account has been disabled".to_string(),
        "TOO_MANY_ATTEMPTS_TRY_LATER" => "Too many attempts, try again later".to_string(),
        _ => code.to_string(),
    }
}
