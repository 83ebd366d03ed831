// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rust specs for `outbox init` and the queue commands (add, list, stats,
//! remove, clear).

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn outbox() -> Command {
    cargo_bin_cmd!("outbox")
}

// Unroutable backend: connection attempts fail immediately.
const BACKEND: &str = "http://127.0.0.1:1";

fn init_temp() -> TempDir {
    let temp = TempDir::new().unwrap();
    outbox()
        .arg("init")
        .arg(BACKEND)
        .current_dir(temp.path())
        .assert()
        .success();
    temp
}

fn add_item(temp: &TempDir, kind: &str, data: &str) {
    outbox()
        .args(["add", kind, data])
        .current_dir(temp.path())
        .assert()
        .success();
}

// =============================================================================
// init
// =============================================================================

#[test]
fn init_creates_outbox_directory() {
    let temp = TempDir::new().unwrap();
    outbox()
        .arg("init")
        .arg(BACKEND)
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized outbox"));

    assert!(temp.path().join(".outbox/config.toml").is_file());
    assert!(temp.path().join(".outbox/queue.db").is_file());
    assert!(temp.path().join(".outbox/.gitignore").is_file());
}

#[test]
fn init_twice_fails() {
    let temp = init_temp();
    outbox()
        .arg("init")
        .arg(BACKEND)
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already initialized"));
}

#[test]
fn commands_fail_outside_a_project() {
    let temp = TempDir::new().unwrap();
    outbox()
        .arg("stats")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("outbox init"));
}

#[test]
fn commands_work_from_subdirectories() {
    let temp = init_temp();
    let sub = temp.path().join("a/b");
    std::fs::create_dir_all(&sub).unwrap();
    add_item(&temp, "form", r#"{"field":1}"#);

    outbox()
        .arg("list")
        .current_dir(&sub)
        .assert()
        .success()
        .stdout(predicate::str::contains("form"));
}

// =============================================================================
// add / list / stats
// =============================================================================

#[test]
fn add_queues_a_pending_item() {
    let temp = init_temp();
    outbox()
        .args(["add", "attendance", r#"{"player":"p1"}"#])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("queued as item 1"));

    outbox()
        .arg("list")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("pending").and(predicate::str::contains("attendance")));
}

#[test]
fn add_rejects_invalid_json() {
    let temp = init_temp();
    outbox()
        .args(["add", "form", "not json"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid JSON payload"));
}

#[test]
fn add_rejects_unknown_kind_without_endpoint() {
    let temp = init_temp();
    outbox()
        .args(["add", "mystery", "{}"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("--endpoint"));
}

#[test]
fn add_accepts_unknown_kind_with_endpoint() {
    let temp = init_temp();
    outbox()
        .args(["add", "mystery", "{}", "--endpoint", "/api/mystery"])
        .current_dir(temp.path())
        .assert()
        .success();

    outbox()
        .args(["list", "--output", "json"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("/api/mystery"));
}

#[test]
fn add_rejects_malformed_header() {
    let temp = init_temp();
    outbox()
        .args(["add", "form", "{}", "-H", "noseparator"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected 'Name: value'"));
}

#[test]
fn list_filters_by_kind() {
    let temp = init_temp();
    add_item(&temp, "form", r#"{"f":1}"#);
    add_item(&temp, "message", r#"{"text":"hi"}"#);

    outbox()
        .args(["list", "--kind", "message"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("message").and(predicate::str::contains("form").not()));
}

#[test]
fn list_json_is_parseable() {
    let temp = init_temp();
    add_item(&temp, "form", r#"{"f":1}"#);

    let output = outbox()
        .args(["list", "--output", "json"])
        .current_dir(temp.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let items: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["kind"], "form");
    assert_eq!(items[0]["status"], "pending");
    assert_eq!(items[0]["data"]["f"], 1);
}

#[test]
fn empty_queue_prints_a_note() {
    let temp = init_temp();
    outbox()
        .arg("list")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("queue is empty"));
}

#[test]
fn stats_counts_by_status() {
    let temp = init_temp();
    add_item(&temp, "form", r#"{"f":1}"#);
    add_item(&temp, "form", r#"{"f":2}"#);

    let output = outbox()
        .args(["stats", "--output", "json"])
        .current_dir(temp.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let stats: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(stats["total"], 2);
    assert_eq!(stats["pending"], 2);
    assert_eq!(stats["failed"], 0);
}

// =============================================================================
// remove / clear
// =============================================================================

#[test]
fn remove_deletes_one_item() {
    let temp = init_temp();
    add_item(&temp, "form", r#"{"f":1}"#);

    outbox()
        .args(["remove", "1"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("removed item 1"));

    outbox()
        .arg("list")
        .current_dir(temp.path())
        .assert()
        .stdout(predicate::str::contains("queue is empty"));
}

#[test]
fn remove_is_idempotent() {
    let temp = init_temp();
    outbox()
        .args(["remove", "42"])
        .current_dir(temp.path())
        .assert()
        .success();
}

#[test]
fn clear_only_touches_finished_items() {
    let temp = init_temp();
    add_item(&temp, "form", r#"{"f":1}"#);

    outbox()
        .arg("clear")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("cleared 0 finished item(s)"));

    outbox()
        .arg("list")
        .current_dir(temp.path())
        .assert()
        .stdout(predicate::str::contains("form"));
}
