// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Sync processor: drains pending work by replaying HTTP requests.
//!
//! All due items are dispatched concurrently through a structured task
//! group and awaited together -- no ordering guarantee, no per-kind
//! serialization. Successes are removed from the queue; failures are
//! classified retry-or-fail by the queue's status lifecycle.

use std::sync::Arc;

use ob_core::{SyncQueue, SyncStatus};
use serde::Serialize;
use tokio::task::JoinSet;

use super::transport::{SyncRequest, Transport};
use crate::error::Result;

/// Aggregate result of one processing pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Items attempted.
    pub total: usize,
    /// Items delivered and removed.
    pub successful: usize,
    /// Items that failed this pass (now `retry` or `failed`).
    pub failed: usize,
}

/// Replays queued items over a [`Transport`].
pub struct SyncProcessor {
    transport: Arc<dyn Transport>,
}

impl SyncProcessor {
    /// Create a processor over the given transport.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        SyncProcessor { transport }
    }

    /// Process every due item, optionally restricted to one kind.
    ///
    /// Replay failures never surface as errors from this method -- they
    /// become status transitions and are counted in the report. Storage
    /// errors do propagate.
    pub async fn process(&self, queue: &SyncQueue, kind: Option<&str>) -> Result<SyncReport> {
        let items = queue.pending(kind)?;
        let total = items.len();
        if total == 0 {
            return Ok(SyncReport::default());
        }

        // Fan out: only the transport futures enter the task group; the
        // queue stays on the driving thread.
        let mut tasks = JoinSet::new();
        for item in items {
            let transport = Arc::clone(&self.transport);
            let request = SyncRequest::from_item(&item);
            let id = item.id;
            tasks.spawn(async move { (id, transport.dispatch(request).await) });
        }

        let mut successful = 0;
        let mut failed = 0;
        while let Some(joined) = tasks.join_next().await {
            let (id, outcome) = match joined {
                Ok(settled) => settled,
                Err(e) => {
                    tracing::error!(error = %e, "replay task aborted");
                    failed += 1;
                    continue;
                }
            };
            match outcome {
                Ok(_) => {
                    queue.remove(id)?;
                    successful += 1;
                    tracing::debug!(id, "sync item delivered");
                }
                Err(e) => {
                    let message = e.to_string();
                    let effective =
                        queue.update_status(id, SyncStatus::Retry, Some(&message))?;
                    failed += 1;
                    tracing::warn!(id, status = %effective, error = %message, "sync item replay failed");
                }
            }
        }

        Ok(SyncReport {
            total,
            successful,
            failed,
        })
    }
}

