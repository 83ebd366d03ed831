// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for ob-core operations.

use thiserror::Error;

/// All possible errors that can occur in ob-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("storage unavailable: {0}\n  hint: offline work cannot be queued until storage is accessible")]
    StorageUnavailable(String),

    #[error("sync item not found: {0}")]
    ItemNotFound(i64),

    #[error("invalid status transition: cannot go from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("invalid status: '{0}'\n  hint: valid statuses are: pending, retry, completed, failed")]
    InvalidStatus(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupted data: {0}")]
    CorruptedData(String),
}

/// A specialized Result type for ob-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
