// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Account model for storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account document stored in Firestore at `accounts/{uid}`.
///
/// Created implicitly the first time a user saves a wheel; every save
/// replaces the whole document with the current activity timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Opaque user ID (also used as document ID)
    pub uid: String,
    /// Last time the user saved a wheel
    #[serde(with = "firestore::serialize_as_timestamp")]
    pub last_active: DateTime<Utc>,
}
