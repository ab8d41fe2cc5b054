// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    pub const ACCOUNTS: &str = "accounts";
    /// Sub-collection of `accounts/{uid}`, keyed by sanitized title
    pub const WHEELS: &str = "wheels";
}

/// Wire-level field names, used in update masks and transforms.
/// Must match the serde renames on the models.
pub mod fields {
    pub const CONFIG: &str = "config";
    pub const LAST_WRITE: &str = "lastWrite";
    pub const LAST_READ: &str = "lastRead";
    pub const READ_COUNT: &str = "readCount";
}
