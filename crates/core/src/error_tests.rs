// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for the error module.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;

#[test]
fn test_item_not_found_message() {
    let err = Error::ItemNotFound(42);
    assert_eq!(err.to_string(), "sync item not found: 42");
}

#[test]
fn test_storage_unavailable_includes_hint() {
    let err = Error::StorageUnavailable("disk full".to_string());
    let msg = err.to_string();
    assert!(msg.contains("storage unavailable: disk full"));
    assert!(msg.contains("hint"));
}

#[test]
fn test_invalid_transition_message() {
    let err = Error::InvalidTransition {
        from: "failed".to_string(),
        to: "pending".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "invalid status transition: cannot go from failed to pending"
    );
}

#[test]
fn test_json_error_converts() {
    let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let err: Error = json_err.into();
    assert!(matches!(err, Error::Json(_)));
}
