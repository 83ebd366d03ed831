// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Sync engine: replaying queued work over HTTP.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ OfflineClient│────►│  Transport  │────►│   Remote    │
//! │  (wrappers)  │     │   (trait)   │     │   Backend   │
//! └──────┬───────┘     └──────▲──────┘     └─────────────┘
//!        │ fallback           │ replay
//!        ▼                    │
//! ┌──────────────┐     ┌──────┴──────┐
//! │  SyncQueue   │◄────│  Processor  │◄── trigger (manual / watch)
//! │  (durable)   │     │ (fan-out)   │
//! └──────────────┘     └─────────────┘
//! ```
//!
//! # Features
//!
//! - Network-first wrappers that fall back to the durable queue
//! - Concurrent replay with retry-or-fail classification
//! - Injectable transport trait for testing
//! - Connectivity watcher that drains the queue on reconnect

mod connectivity;
mod offline;
mod processor;
mod transport;
mod trigger;

pub use connectivity::{Connectivity, ConnectivityProbe, HttpProbe, NetworkStatus};
pub use offline::{CallOutcome, OfflineClient};
pub use processor::{SyncProcessor, SyncReport};
pub use transport::{HttpTransport, SyncRequest, Transport, TransportError, TransportResult};
pub use trigger::{
    manual_sync, watch_connectivity, ConnectivityEvent, SyncOutcome, WatchHandle,
};

#[cfg(test)]
mod test_helpers;
