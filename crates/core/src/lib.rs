// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! ob-core: Durable offline queue for deferred HTTP delivery.
//!
//! This crate provides the persistent half of the outbox system: the
//! SQLite-backed item store, the queue operations API used by wrappers and
//! the sync processor, and the data model for queued work.

pub mod error;
pub mod item;
pub mod queue;
pub mod registrar;
pub mod store;

pub use error::{Error, Result};
pub use item::{Delivery, QueueStats, SyncItem, SyncStatus, DEFAULT_MAX_RETRIES};
pub use queue::SyncQueue;
pub use registrar::{RegistrarError, SyncRegistrar};
pub use store::Store;
