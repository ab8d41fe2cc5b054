// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Wheel models for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user-defined wheel configuration.
///
/// The frontend owns the shape of a wheel; the backend only cares about
/// `title` (which keys the document once sanitized). Everything else
/// round-trips untouched through the flattened map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WheelConfig {
    /// Display title, sanitized before storage
    pub title: String,
    /// Remaining config fields (entries, colors, spin time, ...)
    #[serde(flatten)]
    pub rest: serde_json::Map<String, serde_json::Value>,
}

/// Stored wheel record in Firestore at `accounts/{uid}/wheels/{title}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WheelDocument {
    /// The wheel configuration as the user saved it
    pub config: WheelConfig,
    /// Set on first save, never changed afterwards
    #[serde(with = "firestore::serialize_as_timestamp")]
    pub created: DateTime<Utc>,
    /// Updated on every save
    #[serde(with = "firestore::serialize_as_timestamp")]
    pub last_write: DateTime<Utc>,
    /// Updated on every logged read; null until the first read
    #[serde(default)]
    #[serde(with = "firestore::serialize_as_optional_timestamp")]
    pub last_read: Option<DateTime<Utc>>,
    /// Number of logged reads
    pub read_count: u32,
}

/// Sort configs the way the wheel list is presented: ascending by
/// title, case-insensitive. The sort is stable, so equal keys keep
/// their listing order.
pub fn sort_by_title(configs: &mut [WheelConfig]) {
    configs.sort_by_key(|c| c.title.to_lowercase());
}
