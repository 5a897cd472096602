// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profiles, history and streak stats for signed-in users.

use axum::http::StatusCode;
use gym_buddies::models::{AttendanceRecord, UserProfile};
use gym_buddies::time_utils::today_utc;
use gym_buddies::AppState;
use serde_json::json;
use tower::ServiceExt;

mod common;
use common::{body_json, create_test_jwt, get};

async fn seed_user(state: &AppState, id: &str, username: &str) {
    state
        .db
        .upsert_user(&UserProfile {
            id: id.to_string(),
            username: username.to_string(),
            email: format!("{}@example.com", username),
            created_at: "2025-01-01T00:00:00.000Z".to_string(),
            updated_at: "2025-01-01T00:00:00.000Z".to_string(),
        })
        .await
        .unwrap();
}

async fn seed_attendance(state: &AppState, user_id: &str, days: &[(&str, bool)]) {
    for (date, attended) in days {
        let record = AttendanceRecord::new(
            user_id,
            date,
            *attended,
            "2025-01-01T00:00:00.000Z".to_string(),
        )
        .unwrap();
        state.db.upsert_attendance(&record).await.unwrap();
    }
}

#[tokio::test]
async fn test_get_me() {
    let (app, state) = common::create_test_app();
    seed_user(&state, "u1", "alex").await;
    let token = create_test_jwt("u1", &state.config.jwt_signing_key);

    let response = app.oneshot(get("/api/me", Some(&token))).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(
        body,
        json!({
            "success": true,
            "user": {
                "id": "u1",
                "username": "alex",
                "email": "alex@example.com",
                "createdAt": "2025-01-01T00:00:00.000Z"
            }
        })
    );
}

#[tokio::test]
async fn test_get_me_without_profile() {
    let (app, state) = common::create_test_app();
    let token = create_test_jwt("nobody", &state.config.jwt_signing_key);

    let response = app.oneshot(get("/api/me", Some(&token))).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "User not found");
}

#[tokio::test]
async fn test_list_and_get_users() {
    let (app, state) = common::create_test_app();
    seed_user(&state, "u2", "sam").await;
    seed_user(&state, "u1", "alex").await;
    let token = create_test_jwt("u1", &state.config.jwt_signing_key);

    let response = app
        .clone()
        .oneshot(get("/api/users", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let users = body["users"].as_array().unwrap();
    let mut names: Vec<&str> = users
        .iter()
        .map(|u| u["username"].as_str().unwrap())
        .collect();
    names.sort();
    assert_eq!(names, ["alex", "sam"]);

    let response = app
        .clone()
        .oneshot(get("/api/users/u2", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["user"]["id"], "u2");
    assert_eq!(body["user"]["username"], "sam");

    let response = app
        .oneshot(get("/api/users/missing", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_history_newest_first_with_limit() {
    let (app, state) = common::create_test_app();
    seed_attendance(
        &state,
        "u1",
        &[
            ("2025-01-02", false),
            ("2025-01-04", true),
            ("2025-01-01", true),
            ("2025-01-03", true),
        ],
    )
    .await;
    seed_attendance(&state, "u2", &[("2025-01-05", true)]).await;
    let token = create_test_jwt("u1", &state.config.jwt_signing_key);

    let response = app
        .clone()
        .oneshot(get("/api/users/u1/history", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(
        body["history"],
        json!([
            { "date": "2025-01-04", "attended": true },
            { "date": "2025-01-03", "attended": true },
            { "date": "2025-01-02", "attended": false },
            { "date": "2025-01-01", "attended": true }
        ])
    );

    let response = app
        .oneshot(get("/api/users/u1/history?limit=2", Some(&token)))
        .await
        .unwrap();
    let body = body_json(response).await;
    let dates: Vec<&str> = body["history"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| h["date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, ["2025-01-04", "2025-01-03"]);
}

#[tokio::test]
async fn test_history_empty() {
    let (app, state) = common::create_test_app();
    let token = create_test_jwt("u1", &state.config.jwt_signing_key);

    let response = app
        .oneshot(get("/api/users/u9/history", Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body, json!({ "success": true, "history": [] }));
}

#[tokio::test]
async fn test_stats_for_user() {
    let (app, state) = common::create_test_app();
    seed_attendance(
        &state,
        "u1",
        &[
            ("2025-01-01", true),
            ("2025-01-02", true),
            ("2025-01-03", false),
        ],
    )
    .await;
    let token = create_test_jwt("u1", &state.config.jwt_signing_key);

    let response = app
        .oneshot(get("/api/users/u1/stats", Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(
        body["stats"],
        json!({
            "currentStreak": 0,
            "longestStreak": 2,
            "attendedDays": 2,
            "totalDays": 3,
            "attendanceRate": 67
        })
    );
}

#[tokio::test]
async fn test_stats_no_records() {
    let (app, state) = common::create_test_app();
    let token = create_test_jwt("u1", &state.config.jwt_signing_key);

    let response = app
        .oneshot(get("/api/users/u1/stats", Some(&token)))
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(
        body["stats"],
        json!({
            "currentStreak": 0,
            "longestStreak": 0,
            "attendedDays": 0,
            "totalDays": 0,
            "attendanceRate": 0
        })
    );
}

#[tokio::test]
async fn test_stats_window_follows_limit() {
    let (app, state) = common::create_test_app();
    seed_attendance(
        &state,
        "u1",
        &[
            ("2025-01-01", false),
            ("2025-01-02", true),
            ("2025-01-03", true),
        ],
    )
    .await;
    let token = create_test_jwt("u1", &state.config.jwt_signing_key);

    let response = app
        .oneshot(get("/api/users/u1/stats?limit=2", Some(&token)))
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["stats"]["totalDays"], 2);
    assert_eq!(body["stats"]["currentStreak"], 2);
    assert_eq!(body["stats"]["attendanceRate"], 100);
}

#[tokio::test]
async fn test_mark_today() {
    let (app, state) = common::create_test_app();
    let token = create_test_jwt("u1", &state.config.jwt_signing_key);
    let today = today_utc();

    let response = app
        .clone()
        .oneshot(
            axum::http::Request::builder()
                .method("POST")
                .uri("/api/me/gym-status")
                .header(axum::http::header::AUTHORIZATION, format!("Bearer {}", token))
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(r#"{"attended":true}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["date"], today);

    let response = app
        .oneshot(get(&format!("/api/gym-status?date={}", today), None))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"], json!({ "u1": true }));
}

#[tokio::test]
async fn test_mark_today_bad_body() {
    let (app, state) = common::create_test_app();
    let token = create_test_jwt("u1", &state.config.jwt_signing_key);

    let response = app
        .oneshot(
            axum::http::Request::builder()
                .method("POST")
                .uri("/api/me/gym-status")
                .header(axum::http::header::AUTHORIZATION, format!("Bearer {}", token))
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(r#"{"attended":"yes"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["success"], false);
}
