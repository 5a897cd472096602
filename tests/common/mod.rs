// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::Body,
    extract::Query,
    http::{header, Request, StatusCode},
    response::Response,
    routing::post,
    Json, Router,
};
use gym_buddies::config::Config;
use gym_buddies::db::FirestoreDb;
use gym_buddies::middleware::auth::create_jwt;
use gym_buddies::routes::create_router;
use gym_buddies::services::IdentityClient;
use gym_buddies::AppState;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Password the identity stub accepts for every account.
#[allow(dead_code)]
pub const STUB_PASSWORD: &str = "correct-horse";

/// Email the identity stub reports as already registered.
#[allow(dead_code)]
pub const TAKEN_EMAIL: &str = "taken@example.com";

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Build a router around the given database.
///
/// The identity client points at an address nothing listens on.
#[allow(dead_code)]
pub fn create_app_with_db(db: FirestoreDb) -> (Router, Arc<AppState>) {
    let config = Config::test_default();
    let identity = IdentityClient::new("http://127.0.0.1:9/v1", &config.firebase_api_key)
        .expect("identity client");
    let state = Arc::new(AppState::new(config, db, identity));
    (create_router(state.clone()), state)
}

/// Create a test app with an in-memory store.
#[allow(dead_code)]
pub fn create_test_app() -> (Router, Arc<AppState>) {
    create_app_with_db(FirestoreDb::new_in_memory())
}

/// Create a test app whose store fails every call.
#[allow(dead_code)]
pub fn create_offline_app() -> (Router, Arc<AppState>) {
    create_app_with_db(FirestoreDb::new_mock())
}

/// Create a test app with an in-memory store and a running identity stub.
#[allow(dead_code)]
pub async fn create_app_with_identity_stub() -> (Router, Arc<AppState>) {
    let base_url = spawn_identity_stub().await;
    let config = Config::test_default();
    let identity =
        IdentityClient::new(&base_url, &config.firebase_api_key).expect("identity client");
    let state = Arc::new(AppState::new(
        config,
        FirestoreDb::new_in_memory(),
        identity,
    ));
    (create_router(state.clone()), state)
}

/// Stub user ID for an email: `uid-` plus the local part.
#[allow(dead_code)]
pub fn stub_user_id(email: &str) -> String {
    format!("uid-{}", email.split('@').next().unwrap_or(email))
}

fn provider_error(code: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": { "code": 400, "message": code } })),
    )
}

fn check_key(query: &HashMap<String, String>) -> Option<(StatusCode, Json<Value>)> {
    if query.get("key").map(String::as_str) != Some("test_api_key") {
        return Some(provider_error("API_KEY_INVALID"));
    }
    None
}

/// Start an in-process stand-in for the Identity Toolkit endpoints.
///
/// Returns the base URL to hand to [`IdentityClient::new`].
#[allow(dead_code)]
pub async fn spawn_identity_stub() -> String {
    async fn sign_up(
        Query(query): Query<HashMap<String, String>>,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        if let Some(err) = check_key(&query) {
            return err;
        }
        let email = body["email"].as_str().unwrap_or_default();
        let password = body["password"].as_str().unwrap_or_default();

        if email == TAKEN_EMAIL {
            return provider_error("EMAIL_EXISTS");
        }
        if password.len() < 6 {
            return provider_error("WEAK_PASSWORD : Password should be at least 6 characters");
        }

        (
            StatusCode::OK,
            Json(json!({
                "localId": stub_user_id(email),
                "email": email,
                "idToken": "stub-id-token",
                "refreshToken": "stub-refresh-token",
                "expiresIn": "3600"
            })),
        )
    }

    async fn sign_in(
        Query(query): Query<HashMap<String, String>>,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        if let Some(err) = check_key(&query) {
            return err;
        }
        let email = body["email"].as_str().unwrap_or_default();
        let password = body["password"].as_str().unwrap_or_default();

        if password != STUB_PASSWORD {
            return provider_error("INVALID_LOGIN_CREDENTIALS");
        }

        (
            StatusCode::OK,
            Json(json!({
                "localId": stub_user_id(email),
                "email": email,
                "idToken": "stub-id-token",
                "registered": true
            })),
        )
    }

    let app = Router::new()
        .route("/v1/accounts:signUp", post(sign_up))
        .route("/v1/accounts:signInWithPassword", post(sign_in));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind identity stub");
    let addr = listener.local_addr().expect("stub address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("identity stub");
    });

    format!("http://{}/v1", addr)
}

/// Create a session token for a user.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: &str, signing_key: &[u8]) -> String {
    create_jwt(user_id, signing_key).expect("jwt")
}

/// Build a JSON POST request.
#[allow(dead_code)]
pub fn json_post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Build a GET request, optionally with a Bearer token.
#[allow(dead_code)]
pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}
