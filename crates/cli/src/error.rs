// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI error types.

use thiserror::Error;

/// Errors surfaced by the `outbox` CLI.
#[derive(Debug, Error)]
pub enum Error {
    /// No `.outbox` work directory found here or above.
    #[error("not an outbox directory (run 'outbox init' first)")]
    NotInitialized,

    /// `outbox init` run where a work directory already exists.
    #[error("already initialized at {0}")]
    AlreadyInitialized(String),

    /// Queue or storage failure from the core crate.
    #[error(transparent)]
    Queue(#[from] ob_core::Error),

    /// Malformed or unreadable configuration.
    #[error("config error: {0}")]
    Config(String),

    /// A `--header` argument that is not `Name: value`.
    #[error("invalid header '{0}' (expected 'Name: value')")]
    InvalidHeader(String),

    /// A `--data` argument that is not valid JSON.
    #[error("invalid JSON payload: {0}")]
    InvalidPayload(String),

    /// Sync engine failure outside the queue itself.
    #[error("sync error: {0}")]
    Sync(String),

    /// Filesystem failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failure.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
