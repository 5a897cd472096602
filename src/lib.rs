// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Gym Buddies: daily gym attendance with friends
//!
//! This crate provides the backend API for marking daily gym attendance,
//! seeing who went on a given day, and computing per-user streaks.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;
use services::{AccountService, AttendanceService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub accounts: AccountService,
    pub attendance: AttendanceService,
}

impl AppState {
    /// Wire services on top of a database and identity client.
    pub fn new(config: Config, db: FirestoreDb, identity: services::IdentityClient) -> Self {
        Self {
            accounts: AccountService::new(identity, db.clone()),
            attendance: AttendanceService::new(db.clone()),
            config,
            db,
        }
    }
}
