// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Sync triggers: manual drains and the connectivity watcher.
//!
//! The watcher polls a [`ConnectivityProbe`] on an interval, keeps a shared
//! [`NetworkStatus`] current, and emits edge events on a channel. Consumers
//! decide what to do with an [`ConnectivityEvent::Online`] edge -- the CLI's
//! watch command runs a drain.

use std::sync::Arc;
use std::time::Duration;

use ob_core::SyncQueue;
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::connectivity::{Connectivity, ConnectivityProbe, NetworkStatus};
use super::processor::{SyncProcessor, SyncReport};
use crate::error::Result;

/// Outcome of a triggered sync attempt.
#[derive(Debug, Clone, Serialize)]
pub struct SyncOutcome {
    /// Whether a drain actually ran.
    pub success: bool,
    /// Human-readable summary.
    pub message: String,
    /// The drain report, when one ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<SyncReport>,
}

/// Run one drain now, unless the device is offline.
///
/// Offline is not an error: the outcome reports `success: false` and the
/// queue is left untouched.
pub async fn manual_sync(
    queue: &SyncQueue,
    processor: &SyncProcessor,
    connectivity: &dyn Connectivity,
) -> Result<SyncOutcome> {
    if !connectivity.is_online() {
        return Ok(SyncOutcome {
            success: false,
            message: "device is offline".to_string(),
            report: None,
        });
    }

    let report = processor.process(queue, None).await?;
    let message = format!(
        "synced {} of {} item(s), {} failed",
        report.successful, report.total, report.failed
    );
    Ok(SyncOutcome {
        success: true,
        message,
        report: Some(report),
    })
}

/// Connectivity edge observed by the watcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityEvent {
    /// The device went from offline to online.
    Online,
    /// The device went from online to offline.
    Offline,
}

/// Handle to a running connectivity watcher.
pub struct WatchHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl WatchHandle {
    /// Ask the watcher to stop.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Wait for the watcher task to finish.
    pub async fn stopped(mut self) {
        self.cancel.cancel();
        let _ = (&mut self.task).await;
    }
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Spawn a connectivity watcher.
///
/// Probes immediately, then every `interval`. Each observation updates
/// `status`; transitions are sent on the returned channel. The watcher
/// never sends a duplicate edge, and a lagging consumer drops events
/// rather than blocking the probe loop.
pub fn watch_connectivity(
    probe: Arc<dyn ConnectivityProbe>,
    status: Arc<NetworkStatus>,
    interval: Duration,
) -> (WatchHandle, mpsc::Receiver<ConnectivityEvent>) {
    let (tx, rx) = mpsc::channel(16);
    let cancel = CancellationToken::new();
    let token = cancel.clone();

    let task = tokio::spawn(async move {
        let mut last = status.is_online();
        loop {
            let online = tokio::select! {
                () = token.cancelled() => break,
                online = probe.check() => online,
            };

            status.set_online(online);
            if online != last {
                let event = if online {
                    ConnectivityEvent::Online
                } else {
                    ConnectivityEvent::Offline
                };
                tracing::info!(?event, "connectivity changed");
                if tx.try_send(event).is_err() {
                    tracing::warn!("connectivity event dropped, consumer lagging");
                }
                last = online;
            }

            tokio::select! {
                () = token.cancelled() => break,
                () = tokio::time::sleep(interval) => {}
            }
        }
        tracing::debug!("connectivity watcher stopped");
    });

    (WatchHandle { cancel, task }, rx)
}
