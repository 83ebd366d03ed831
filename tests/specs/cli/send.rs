// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rust specs for `outbox send` and `outbox sync`.
//!
//! The backend is an unroutable address, so every real network attempt
//! fails immediately at the connection level. That makes the fallback
//! paths deterministic without a test server.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use yare::parameterized;

fn outbox() -> Command {
    cargo_bin_cmd!("outbox")
}

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

fn stats(temp: &TempDir) -> serde_json::Value {
    let output = outbox()
        .args(["stats", "--output", "json"])
        .current_dir(temp.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&output).unwrap()
}

// =============================================================================
// send --offline
// =============================================================================

#[test]
fn offline_send_queues_without_a_network_attempt() {
    let temp = init_temp();
    let output = outbox()
        .args(["--offline", "send", "attendance", r#"{"player":"p1"}"#])
        .args(["--output", "json"])
        .current_dir(temp.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let outcome: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(outcome["success"], true);
    assert_eq!(outcome["offline"], true);
    assert_eq!(outcome["queued"], true);

    let stats = stats(&temp);
    assert_eq!(stats["total"], 1);
    assert_eq!(stats["pending"], 1);
}

#[parameterized(
    attendance = { "attendance" },
    form = { "form" },
    message = { "message" },
    performance = { "performance" },
    training_plan = { "training-plan" },
)]
fn offline_send_supports_every_known_kind(kind: &str) {
    let temp = init_temp();
    outbox()
        .args(["--offline", "send", kind, "{}"])
        .current_dir(temp.path())
        .assert()
        .success();

    outbox()
        .args(["list", "--kind", kind])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(kind));
}

#[test]
fn offline_send_text_output_names_the_item() {
    let temp = init_temp();
    outbox()
        .args(["--offline", "send", "form", r#"{"field":1}"#])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("offline: queued as item 1"));
}

// =============================================================================
// send against an unreachable backend
// =============================================================================

#[test]
fn failed_send_falls_back_to_the_queue() {
    let temp = init_temp();
    let output = outbox()
        .args(["send", "message", r#"{"text":"hi"}"#])
        .args(["--output", "json"])
        .current_dir(temp.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let outcome: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(outcome["success"], false);
    assert_eq!(outcome["offline"], false);
    assert_eq!(outcome["queued"], true);
    assert!(outcome["error"].as_str().unwrap().contains("request failed"));

    assert_eq!(stats(&temp)["pending"], 1);
}

#[test]
fn send_rejects_unknown_kind_without_endpoint() {
    let temp = init_temp();
    outbox()
        .args(["--offline", "send", "mystery", "{}"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("--endpoint"));
}

#[test]
fn send_with_endpoint_queues_custom_kind() {
    let temp = init_temp();
    outbox()
        .args(["--offline", "send", "mystery", "{}", "--endpoint", "/api/x"])
        .current_dir(temp.path())
        .assert()
        .success();

    outbox()
        .args(["list", "--output", "json"])
        .current_dir(temp.path())
        .assert()
        .stdout(predicate::str::contains("/api/x"));
}

// =============================================================================
// sync
// =============================================================================

#[test]
fn offline_sync_refuses_and_leaves_the_queue_alone() {
    let temp = init_temp();
    outbox()
        .args(["--offline", "send", "form", r#"{"f":1}"#])
        .current_dir(temp.path())
        .assert()
        .success();

    outbox()
        .args(["--offline", "sync"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("device is offline"));

    assert_eq!(stats(&temp)["pending"], 1);
}

#[test]
fn failed_sync_moves_items_to_retry() {
    let temp = init_temp();
    outbox()
        .args(["--offline", "send", "form", r#"{"f":1}"#])
        .current_dir(temp.path())
        .assert()
        .success();

    let output = outbox()
        .args(["sync", "--output", "json"])
        .current_dir(temp.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["total"], 1);
    assert_eq!(report["successful"], 0);
    assert_eq!(report["failed"], 1);

    let stats = stats(&temp);
    assert_eq!(stats["retrying"], 1);
    assert_eq!(stats["pending"], 0);
}

#[test]
fn retries_exhaust_into_failed() {
    let temp = init_temp();
    outbox()
        .args(["--offline", "add", "form", r#"{"f":1}"#])
        .args(["--max-retries", "2"])
        .current_dir(temp.path())
        .assert()
        .success();

    for _ in 0..2 {
        outbox().arg("sync").current_dir(temp.path()).assert().success();
    }

    let stats = stats(&temp);
    assert_eq!(stats["failed"], 1);
    assert_eq!(stats["retrying"], 0);

    // A further sync has nothing to do.
    outbox()
        .arg("sync")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("synced 0 of 0"));

    // And clear removes the failed item.
    outbox()
        .arg("clear")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("cleared 1 finished item(s)"));
}
