// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Wheel title sanitization.
//!
//! A wheel is keyed in Firestore by its title, so the free-text title
//! must be normalized into a valid document ID: no forward slashes,
//! not `.` or `..`, non-empty, bounded length.

/// Longest title we accept as a document ID.
const MAX_TITLE_CHARS: usize = 100;

/// Normalize a free-text wheel title into a Firestore document ID.
///
/// Deterministic and idempotent: applying it to an already-sanitized
/// title returns the same string, so repeated saves of the same wheel
/// address the same document.
pub fn sanitize_wheel_title(title: &str) -> String {
    let mut sanitized = title.replace('/', "\\");

    // `.` and `..` are reserved path segments in Firestore.
    if sanitized == "." {
        sanitized = "(PERIOD)".to_string();
    }
    if sanitized == ".." {
        sanitized = "(TWO PERIODS)".to_string();
    }

    if sanitized.chars().count() > MAX_TITLE_CHARS {
        sanitized = sanitized.chars().take(MAX_TITLE_CHARS).collect();
    }

    if sanitized.is_empty() {
        sanitized = "?".to_string();
    }

    sanitized
}
