// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Best-effort platform sync registration.
//!
//! Some platforms can wake the application to retry queued work even after
//! the process that enqueued it has exited. That capability is optional:
//! the queue carries an `Option<Arc<dyn SyncRegistrar>>` and calls it only
//! when present. Registration failures are logged and never propagated --
//! enqueueing must succeed regardless.

use thiserror::Error;

/// Error type for sync registration.
#[derive(Debug, Error)]
#[error("sync registration failed: {0}")]
pub struct RegistrarError(pub String);

/// Capability interface for platform background-sync registration.
///
/// Implementations are fire-and-forget from the queue's point of view; the
/// tag identifies the operation kind (`sync-{kind}`).
pub trait SyncRegistrar: Send + Sync {
    /// Register a sync tag with the platform.
    fn register(&self, tag: &str) -> Result<(), RegistrarError>;
}
