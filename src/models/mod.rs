// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod account;
pub mod wheel;

pub use account::Account;
pub use wheel::{WheelConfig, WheelDocument};
