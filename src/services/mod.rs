// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod account;
pub mod attendance;
pub mod identity;

pub use account::{AccountService, SessionUser};
pub use attendance::AttendanceService;
pub use identity::{IdentityAccount, IdentityClient};
