// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Wheelhouse: backend for a spinning-choice-picker ("wheel") app.
//!
//! This crate provides the API for storing per-account wheel
//! configurations in Firestore, tracking account activity, and
//! counting wheel reads.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod title;

use config::Config;
use db::FirestoreDb;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
}
