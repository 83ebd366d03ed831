// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Offline-capable operation wrappers.
//!
//! A wrapper gives callers a single call that works online or offline:
//! network-first when online, with an enqueue fallback on failure, and an
//! immediate enqueue (no network I/O at all) when offline.
//!
//! Note the asymmetry in [`CallOutcome`]: an online failure reports
//! `success: false`, but an offline deferral reports `success: true`.
//! Callers distinguish "delivered" from "queued for later" through the
//! `offline`/`queued` flags, not `success` alone.

use std::sync::Arc;

use ob_core::{Delivery, SyncQueue};
use serde::Serialize;
use serde_json::Value;

use super::connectivity::Connectivity;
use super::transport::{SyncRequest, Transport};
use crate::config::Config;
use crate::error::Result;

/// Outcome of an offline-capable call.
#[derive(Debug, Clone, Serialize)]
pub struct CallOutcome {
    /// Whether the call is considered successful by the caller's contract.
    pub success: bool,
    /// Whether the device was offline and the call was deferred untried.
    pub offline: bool,
    /// Whether a sync item was enqueued.
    pub queued: bool,
    /// Id of the enqueued item, when `queued`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queued_id: Option<i64>,
    /// Response body, when delivered directly.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Failure message, when the immediate attempt failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CallOutcome {
    fn delivered(data: Value) -> Self {
        CallOutcome {
            success: true,
            offline: false,
            queued: false,
            queued_id: None,
            data: Some(data),
            error: None,
        }
    }

    fn deferred(id: i64) -> Self {
        CallOutcome {
            success: true,
            offline: true,
            queued: true,
            queued_id: Some(id),
            data: None,
            error: None,
        }
    }

    fn fallback(id: i64, error: String) -> Self {
        CallOutcome {
            success: false,
            offline: false,
            queued: true,
            queued_id: Some(id),
            data: None,
            error: Some(error),
        }
    }
}

/// Network-first caller with durable-queue fallback.
pub struct OfflineClient {
    connectivity: Arc<dyn Connectivity>,
    transport: Arc<dyn Transport>,
}

impl OfflineClient {
    /// Create a client over the given connectivity source and transport.
    pub fn new(connectivity: Arc<dyn Connectivity>, transport: Arc<dyn Transport>) -> Self {
        OfflineClient {
            connectivity,
            transport,
        }
    }

    /// Attempt delivery now, falling back to the queue.
    ///
    /// Offline: enqueue without any network I/O. Online success: return the
    /// response, nothing enqueued. Online failure: enqueue and report the
    /// error.
    pub async fn call(
        &self,
        queue: &SyncQueue,
        kind: &str,
        data: Value,
        delivery: Delivery,
    ) -> Result<CallOutcome> {
        if !self.connectivity.is_online() {
            let id = queue.enqueue(kind, data, delivery)?;
            tracing::debug!(id, kind, "offline, deferred to queue");
            return Ok(CallOutcome::deferred(id));
        }

        let request = SyncRequest::new(&delivery, data.clone());
        match self.transport.dispatch(request).await {
            Ok(body) => Ok(CallOutcome::delivered(body)),
            Err(e) => {
                let message = e.to_string();
                let id = queue.enqueue(kind, data, delivery)?;
                tracing::debug!(id, kind, error = %message, "delivery failed, queued for retry");
                Ok(CallOutcome::fallback(id, message))
            }
        }
    }

    /// Record a player's attendance.
    pub async fn record_attendance(
        &self,
        queue: &SyncQueue,
        config: &Config,
        data: Value,
    ) -> Result<CallOutcome> {
        self.call(queue, "attendance", data, self.delivery(config, "/api/attendance"))
            .await
    }

    /// Submit a form response.
    pub async fn submit_form(
        &self,
        queue: &SyncQueue,
        config: &Config,
        data: Value,
    ) -> Result<CallOutcome> {
        self.call(queue, "form", data, self.delivery(config, "/api/forms"))
            .await
    }

    /// Send a message.
    pub async fn send_message(
        &self,
        queue: &SyncQueue,
        config: &Config,
        data: Value,
    ) -> Result<CallOutcome> {
        self.call(queue, "message", data, self.delivery(config, "/api/messages"))
            .await
    }

    /// Update a player's performance record.
    pub async fn update_performance(
        &self,
        queue: &SyncQueue,
        config: &Config,
        data: Value,
    ) -> Result<CallOutcome> {
        self.call(
            queue,
            "performance",
            data,
            self.delivery(config, "/api/performance").method("PUT"),
        )
        .await
    }

    /// Submit a training plan.
    pub async fn submit_training_plan(
        &self,
        queue: &SyncQueue,
        config: &Config,
        data: Value,
    ) -> Result<CallOutcome> {
        self.call(
            queue,
            "training-plan",
            data,
            self.delivery(config, "/api/training-plans"),
        )
        .await
    }

    fn delivery(&self, config: &Config, path: &str) -> Delivery {
        Delivery::to(config.api_url(path)).max_retries(config.sync.max_retries)
    }
}
