// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Gym Buddies API Server
//!
//! Lets friends mark daily gym attendance and follow each other's streaks.

use gym_buddies::{
    config::{Config, StoreBackend},
    db::FirestoreDb,
    services::IdentityClient,
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Gym Buddies API");

    let db = match config.store_backend {
        StoreBackend::Firestore => FirestoreDb::new(&config.gcp_project_id).await?,
        StoreBackend::Memory => FirestoreDb::new_in_memory(),
    };

    let identity = IdentityClient::new(&config.identity_base_url, &config.firebase_api_key)?;
    tracing::info!(base_url = %config.identity_base_url, "Identity client initialized");

    // Build shared state
    let state = Arc::new(AppState::new(config.clone(), db, identity));

    // Build router
    let app = gym_buddies::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("gym_buddies=debug,info"));

    tracing_subscriber::registry().with(filter).with(format).init();
}
