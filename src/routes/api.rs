// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users.
//!
//! Every handler resolves the account from the session JWT and stamps
//! writes with the request-time timestamp.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{WheelConfig, WheelDocument};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use std::sync::Arc;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/wheels", get(list_wheels).put(save_wheel))
        .route("/api/wheels/{title}", get(get_wheel).delete(delete_wheel))
        .route("/api/wheels/{title}/read", post(log_wheel_read))
        .route("/api/account", delete(delete_account))
}

// ─── Wheels ──────────────────────────────────────────────────

/// List the account's wheel configs, sorted by title.
async fn list_wheels(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<WheelConfig>>> {
    let configs = state.db.get_wheels(&user.uid).await?;
    Ok(Json(configs))
}

/// Save a wheel config, creating or overwriting by sanitized title.
/// Returns the config as stored.
async fn save_wheel(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(config): Json<WheelConfig>,
) -> Result<Json<WheelConfig>> {
    let stored = state
        .db
        .save_wheel(chrono::Utc::now(), &user.uid, config)
        .await?;
    Ok(Json(stored))
}

/// Fetch a single wheel document.
async fn get_wheel(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(title): Path<String>,
) -> Result<Json<WheelDocument>> {
    let wheel = state
        .db
        .get_wheel(&user.uid, &title)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No wheel titled {}", title)))?;
    Ok(Json(wheel))
}

/// Record a read of a wheel. Reading a title with no stored wheel is
/// not an error.
async fn log_wheel_read(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(title): Path<String>,
) -> Result<StatusCode> {
    state
        .db
        .log_wheel_read(chrono::Utc::now(), &user.uid, &title)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a wheel. Idempotent.
async fn delete_wheel(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(title): Path<String>,
) -> Result<StatusCode> {
    state.db.delete_wheel(&user.uid, &title).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ─── Account ─────────────────────────────────────────────────

/// Delete the account and every wheel it owns.
async fn delete_account(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<StatusCode> {
    state.db.delete_account(&user.uid).await?;
    Ok(StatusCode::NO_CONTENT)
}
