// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Data model for queued sync work.
//!
//! A [`SyncItem`] is one unit of deferred delivery: the payload to replay,
//! the [`Delivery`] descriptor saying where and how to send it, and the
//! bookkeeping fields the retry policy operates on.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;

/// Default retry cap applied when a delivery descriptor does not set one.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Lifecycle status of a queued item.
///
/// Forward-only except `retry -> retry`; `completed` and `failed` are
/// terminal and never resurrected automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    /// Queued, not yet attempted.
    Pending,
    /// At least one replay failed; eligible for another pass.
    Retry,
    /// Delivered. Observed only transiently: successful items are removed.
    Completed,
    /// Retry cap reached. Retained until explicitly cleared.
    Failed,
}

impl SyncStatus {
    /// String form as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncStatus::Pending => "pending",
            SyncStatus::Retry => "retry",
            SyncStatus::Completed => "completed",
            SyncStatus::Failed => "failed",
        }
    }

    /// Whether this status admits no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SyncStatus::Completed | SyncStatus::Failed)
    }
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SyncStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(SyncStatus::Pending),
            "retry" => Ok(SyncStatus::Retry),
            "completed" => Ok(SyncStatus::Completed),
            "failed" => Ok(SyncStatus::Failed),
            other => Err(Error::InvalidStatus(other.to_string())),
        }
    }
}

/// Delivery descriptor: where and how a payload is replayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delivery {
    /// Target endpoint URL.
    pub endpoint: String,
    /// HTTP method (default POST).
    #[serde(default = "default_method")]
    pub method: String,
    /// Extra headers sent with the replayed request, in order.
    #[serde(default)]
    pub headers: Vec<(String, String)>,
    /// Maximum failed replays before the item is marked failed.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_method() -> String {
    "POST".to_string()
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

impl Delivery {
    /// Create a descriptor targeting `endpoint` with defaults (POST, no
    /// extra headers, [`DEFAULT_MAX_RETRIES`]).
    pub fn to(endpoint: impl Into<String>) -> Self {
        Delivery {
            endpoint: endpoint.into(),
            method: default_method(),
            headers: Vec::new(),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Override the HTTP method.
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    /// Append a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Override the retry cap.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}

/// A persisted unit of deferred work awaiting network replay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncItem {
    /// Store-assigned id: unique, monotonically increasing, stable.
    pub id: i64,
    /// Operation tag, e.g. "attendance" or "message".
    pub kind: String,
    /// JSON payload replayed as the request body.
    pub data: Value,
    /// Delivery descriptor.
    pub delivery: Delivery,
    /// Creation time, epoch milliseconds.
    pub created_ms: i64,
    /// Current lifecycle status.
    pub status: SyncStatus,
    /// Failed replays so far. Never exceeds `delivery.max_retries`.
    pub retry_count: u32,
    /// Message from the most recent failed replay, if any.
    pub last_error: Option<String>,
}

/// Aggregate queue counts by status.
///
/// `pending + retrying + completed + failed == total` at all times.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QueueStats {
    pub total: usize,
    pub pending: usize,
    pub retrying: usize,
    pub completed: usize,
    pub failed: usize,
}

#[cfg(test)]
#[path = "item_tests.rs"]
mod tests;
