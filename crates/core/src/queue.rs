// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Queue operations API over the durable store.
//!
//! [`SyncQueue`] is the public surface used by the offline wrappers and the
//! sync processor. It owns the status lifecycle:
//!
//! ```text
//! pending ──► retry ──► retry ──► ... ──► failed   (cap reached)
//!    │          │
//!    └──────────┴────► removed                      (successful replay)
//! ```
//!
//! `completed` and `failed` are terminal; items leave the store only via
//! successful replay or an explicit [`SyncQueue::remove`] /
//! [`SyncQueue::clear_finished`].

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::item::{Delivery, QueueStats, SyncItem, SyncStatus};
use crate::registrar::SyncRegistrar;
use crate::store::Store;

/// Durable sync queue with retry bookkeeping.
pub struct SyncQueue {
    store: Store,
    registrar: Option<Arc<dyn SyncRegistrar>>,
}

impl SyncQueue {
    /// Open (or create) the queue backed by the database at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        Ok(SyncQueue {
            store: Store::open(path)?,
            registrar: None,
        })
    }

    /// Open an in-memory queue (tests and throwaway use).
    pub fn open_in_memory() -> Result<Self> {
        Ok(SyncQueue {
            store: Store::open_in_memory()?,
            registrar: None,
        })
    }

    /// Attach a platform sync registrar, called best-effort on enqueue.
    pub fn with_registrar(mut self, registrar: Arc<dyn SyncRegistrar>) -> Self {
        self.registrar = Some(registrar);
        self
    }

    /// Enqueue a new item with `status=pending`, `retry_count=0` and a
    /// creation timestamp of now. Returns the assigned id.
    ///
    /// When a registrar is present, a `sync-{kind}` tag is registered after
    /// insertion; registration failure is logged, not surfaced -- the item
    /// remains queued either way.
    pub fn enqueue(&self, kind: &str, data: Value, delivery: Delivery) -> Result<i64> {
        let id = self
            .store
            .add(kind, &data, &delivery, Utc::now().timestamp_millis())?;
        tracing::debug!(id, kind, endpoint = %delivery.endpoint, "enqueued sync item");

        if let Some(ref registrar) = self.registrar {
            let tag = format!("sync-{kind}");
            if let Err(e) = registrar.register(&tag) {
                tracing::warn!(tag, error = %e, "background sync registration failed");
            }
        }

        Ok(id)
    }

    /// Items awaiting replay (`pending` or `retry`), optionally filtered by
    /// kind, oldest first.
    ///
    /// `retry` items are included deliberately: a strict `pending`-only view
    /// would make retried items invisible to every future processing pass.
    pub fn pending(&self, kind: Option<&str>) -> Result<Vec<SyncItem>> {
        self.store
            .by_status(&[SyncStatus::Pending, SyncStatus::Retry], kind)
    }

    /// Fetch a single item by id.
    pub fn item(&self, id: i64) -> Result<Option<SyncItem>> {
        self.store.get(id)
    }

    /// Fetch all items regardless of status, oldest first.
    pub fn items(&self) -> Result<Vec<SyncItem>> {
        self.store.all()
    }

    /// Fetch all items of one kind, oldest first.
    pub fn items_by_kind(&self, kind: &str) -> Result<Vec<SyncItem>> {
        self.store.by_kind(kind)
    }

    /// Remove an item by id. Idempotent.
    pub fn remove(&self, id: i64) -> Result<()> {
        self.store.delete(id)
    }

    /// Apply a status transition to an item, recording `error` as its last
    /// failure message. Returns the effective status written.
    ///
    /// Fails with [`Error::ItemNotFound`] when the id is absent and with
    /// [`Error::InvalidTransition`] when the item is already terminal.
    ///
    /// Requesting [`SyncStatus::Retry`] increments `retry_count` (clamped to
    /// the item's cap); once the incremented count reaches `max_retries` the
    /// transition escalates to [`SyncStatus::Failed`] instead.
    pub fn update_status(
        &self,
        id: i64,
        status: SyncStatus,
        error: Option<&str>,
    ) -> Result<SyncStatus> {
        let mut item = self.store.get(id)?.ok_or(Error::ItemNotFound(id))?;

        if item.status.is_terminal() {
            return Err(Error::InvalidTransition {
                from: item.status.to_string(),
                to: status.to_string(),
            });
        }

        match status {
            SyncStatus::Retry => {
                item.retry_count = item.retry_count.saturating_add(1).min(item.delivery.max_retries);
                item.status = if item.retry_count >= item.delivery.max_retries {
                    SyncStatus::Failed
                } else {
                    SyncStatus::Retry
                };
                item.last_error = error.map(str::to_string);
            }
            other => {
                item.status = other;
                if error.is_some() {
                    item.last_error = error.map(str::to_string);
                }
            }
        }

        self.store.put(&item)?;
        Ok(item.status)
    }

    /// Delete every `completed` or `failed` item, returning the count
    /// removed.
    pub fn clear_finished(&self) -> Result<usize> {
        self.store
            .delete_by_status(&[SyncStatus::Completed, SyncStatus::Failed])
    }

    /// Aggregate counts by status over all items.
    pub fn stats(&self) -> Result<QueueStats> {
        let mut stats = QueueStats::default();
        for (status, count) in self.store.counts_by_status()? {
            stats.total += count;
            match status {
                SyncStatus::Pending => stats.pending = count,
                SyncStatus::Retry => stats.retrying = count,
                SyncStatus::Completed => stats.completed = count,
                SyncStatus::Failed => stats.failed = count,
            }
        }
        Ok(stats)
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
