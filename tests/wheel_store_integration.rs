// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore integration tests for the wheel store.
//!
//! These tests require the Firestore emulator to be running.
//! Run with: ./scripts/test-with-emulator.sh
//!
//! The emulator provides a clean state for each test run.

use wheelhouse::models::WheelConfig;

mod common;
use common::{parse_time, test_db, unique_uid};

/// Helper to build a wheel config with a couple of frontend fields.
fn test_config(title: &str) -> WheelConfig {
    let mut rest = serde_json::Map::new();
    rest.insert(
        "entries".to_string(),
        serde_json::json!(["tacos", "pizza", "ramen"]),
    );
    rest.insert("spinTime".to_string(), serde_json::json!(10));
    WheelConfig {
        title: title.to_string(),
        rest,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// ACCOUNT ACTIVITY
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_log_user_activity_keeps_latest_timestamp() {
    require_emulator!();

    let db = test_db().await;
    let uid = unique_uid();

    let first = parse_time("2024-01-15T10:00:00Z");
    let second = parse_time("2024-02-01T09:30:00Z");

    db.log_user_activity(first, &uid).await.unwrap();
    db.log_user_activity(second, &uid).await.unwrap();

    let account = db.get_account(&uid).await.unwrap().unwrap();
    assert_eq!(account.uid, uid);
    // Full replace: only the latest activity timestamp remains
    assert_eq!(account.last_active, second);
}

#[tokio::test]
async fn test_save_wheel_touches_account() {
    require_emulator!();

    let db = test_db().await;
    let uid = unique_uid();
    let now = parse_time("2024-03-01T12:00:00Z");

    assert!(db.get_account(&uid).await.unwrap().is_none());

    db.save_wheel(now, &uid, test_config("Lunch Options"))
        .await
        .unwrap();

    // The account was created implicitly by the save
    let account = db.get_account(&uid).await.unwrap().unwrap();
    assert_eq!(account.uid, uid);
    assert_eq!(account.last_active, now);
}

// ═══════════════════════════════════════════════════════════════════════════
// WHEEL SAVE / LIST
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_first_save_creates_wheel_with_zeroed_read_tracking() {
    require_emulator!();

    let db = test_db().await;
    let uid = unique_uid();
    let now = parse_time("2024-01-15T10:00:00Z");

    let stored = db
        .save_wheel(now, &uid, test_config("Team Standup"))
        .await
        .unwrap();
    assert_eq!(stored.title, "Team Standup");

    let wheel = db.get_wheel(&uid, "Team Standup").await.unwrap().unwrap();
    assert_eq!(wheel.config.title, "Team Standup");
    assert_eq!(wheel.created, now);
    assert_eq!(wheel.last_write, now);
    assert_eq!(wheel.last_read, None);
    assert_eq!(wheel.read_count, 0);
}

#[tokio::test]
async fn test_resave_updates_config_and_preserves_read_tracking() {
    require_emulator!();

    let db = test_db().await;
    let uid = unique_uid();
    let created_at = parse_time("2024-01-15T10:00:00Z");
    let read_at = parse_time("2024-01-16T08:00:00Z");
    let updated_at = parse_time("2024-01-20T18:45:00Z");

    db.save_wheel(created_at, &uid, test_config("Team Standup"))
        .await
        .unwrap();
    db.log_wheel_read(read_at, &uid, "Team Standup")
        .await
        .unwrap();

    // Save again with a different entry list
    let mut config = test_config("Team Standup");
    config
        .rest
        .insert("entries".to_string(), serde_json::json!(["alice", "bob"]));
    db.save_wheel(updated_at, &uid, config).await.unwrap();

    let wheel = db.get_wheel(&uid, "Team Standup").await.unwrap().unwrap();
    assert_eq!(wheel.config.rest["entries"], serde_json::json!(["alice", "bob"]));
    assert_eq!(wheel.last_write, updated_at);
    // Creation and read tracking survive the update
    assert_eq!(wheel.created, created_at);
    assert_eq!(wheel.last_read, Some(read_at));
    assert_eq!(wheel.read_count, 1);

    // Still a single wheel, not a duplicate
    let configs = db.get_wheels(&uid).await.unwrap();
    assert_eq!(configs.len(), 1);
}

#[tokio::test]
async fn test_get_wheels_sorts_titles_case_insensitively() {
    require_emulator!();

    let db = test_db().await;
    let uid = unique_uid();
    let now = parse_time("2024-01-15T10:00:00Z");

    for title in ["Banana", "apple", "Cherry"] {
        db.save_wheel(now, &uid, test_config(title)).await.unwrap();
    }

    let configs = db.get_wheels(&uid).await.unwrap();
    let titles: Vec<&str> = configs.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["apple", "Banana", "Cherry"]);
}

#[tokio::test]
async fn test_get_wheels_empty_account() {
    require_emulator!();

    let db = test_db().await;
    let uid = unique_uid();

    let configs = db.get_wheels(&uid).await.unwrap();
    assert!(configs.is_empty());
}

#[tokio::test]
async fn test_save_wheel_sanitizes_title() {
    require_emulator!();

    let db = test_db().await;
    let uid = unique_uid();
    let now = parse_time("2024-01-15T10:00:00Z");

    let stored = db
        .save_wheel(now, &uid, test_config("Yes/No/Maybe"))
        .await
        .unwrap();
    // The returned config carries the normalized title
    assert_eq!(stored.title, "Yes\\No\\Maybe");

    // Lookups by the raw title resolve to the same document
    let wheel = db.get_wheel(&uid, "Yes/No/Maybe").await.unwrap().unwrap();
    assert_eq!(wheel.config.title, "Yes\\No\\Maybe");

    // Saving the raw title again overwrites instead of duplicating
    db.save_wheel(now, &uid, test_config("Yes/No/Maybe"))
        .await
        .unwrap();
    assert_eq!(db.get_wheels(&uid).await.unwrap().len(), 1);
}

// ═══════════════════════════════════════════════════════════════════════════
// READ TRACKING
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_log_wheel_read_increments_and_stamps() {
    require_emulator!();

    let db = test_db().await;
    let uid = unique_uid();
    let created_at = parse_time("2024-01-15T10:00:00Z");

    db.save_wheel(created_at, &uid, test_config("Team Standup"))
        .await
        .unwrap();

    // Bring the counter to 5, then log one more read
    for day in 1..=5 {
        let ts = parse_time(&format!("2024-02-0{}T08:00:00Z", day));
        db.log_wheel_read(ts, &uid, "Team Standup").await.unwrap();
    }
    let sixth = parse_time("2024-02-06T08:00:00Z");
    db.log_wheel_read(sixth, &uid, "Team Standup").await.unwrap();

    let wheel = db.get_wheel(&uid, "Team Standup").await.unwrap().unwrap();
    assert_eq!(wheel.read_count, 6);
    assert_eq!(wheel.last_read, Some(sixth));
    // Reads leave the config and creation time alone
    assert_eq!(wheel.created, created_at);
    assert_eq!(wheel.config.rest["spinTime"], serde_json::json!(10));
}

#[tokio::test]
async fn test_log_wheel_read_missing_wheel_is_noop() {
    require_emulator!();

    let db = test_db().await;
    let uid = unique_uid();
    let now = parse_time("2024-01-15T10:00:00Z");

    // No error, and no document materializes
    db.log_wheel_read(now, &uid, "Never Saved").await.unwrap();
    assert!(db.get_wheel(&uid, "Never Saved").await.unwrap().is_none());
}

#[tokio::test]
async fn test_concurrent_reads_all_land() {
    require_emulator!();

    let db = test_db().await;
    let uid = unique_uid();
    let now = parse_time("2024-01-15T10:00:00Z");

    db.save_wheel(now, &uid, test_config("Team Standup"))
        .await
        .unwrap();

    // The counter uses a server-side increment, so parallel reads of an
    // existing wheel must not lose updates.
    let mut handles = Vec::new();
    for i in 0..10 {
        let db = db.clone();
        let uid = uid.clone();
        let ts = parse_time(&format!("2024-02-01T08:00:{:02}Z", i));
        handles.push(tokio::spawn(async move {
            db.log_wheel_read(ts, &uid, "Team Standup").await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let wheel = db.get_wheel(&uid, "Team Standup").await.unwrap().unwrap();
    assert_eq!(wheel.read_count, 10);
}

// ═══════════════════════════════════════════════════════════════════════════
// WHEEL DELETION
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_delete_wheel() {
    require_emulator!();

    let db = test_db().await;
    let uid = unique_uid();
    let now = parse_time("2024-01-15T10:00:00Z");

    db.save_wheel(now, &uid, test_config("Team Standup"))
        .await
        .unwrap();
    db.save_wheel(now, &uid, test_config("Lunch Options"))
        .await
        .unwrap();

    db.delete_wheel(&uid, "Team Standup").await.unwrap();

    assert!(db.get_wheel(&uid, "Team Standup").await.unwrap().is_none());
    // The other wheel is untouched
    let remaining = db.get_wheels(&uid).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].title, "Lunch Options");
}

#[tokio::test]
async fn test_delete_wheel_is_idempotent() {
    require_emulator!();

    let db = test_db().await;
    let uid = unique_uid();

    // Deleting a wheel that never existed succeeds
    db.delete_wheel(&uid, "Never Saved").await.unwrap();
    // And deleting twice succeeds too
    let now = parse_time("2024-01-15T10:00:00Z");
    db.save_wheel(now, &uid, test_config("Team Standup"))
        .await
        .unwrap();
    db.delete_wheel(&uid, "Team Standup").await.unwrap();
    db.delete_wheel(&uid, "Team Standup").await.unwrap();
}
