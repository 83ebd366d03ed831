// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Connectivity state and probing.
//!
//! The rest of the sync engine consumes connectivity through the
//! [`Connectivity`] trait; [`NetworkStatus`] is the shared flag
//! implementation, refreshed by the watcher through a
//! [`ConnectivityProbe`]. Atomic fields allow lock-free reads from any
//! handler.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde_json::Value;

use super::transport::{SyncRequest, Transport};

/// Connectivity-state source consumed by wrappers and triggers.
pub trait Connectivity: Send + Sync {
    /// Whether the device currently appears to be online.
    fn is_online(&self) -> bool;
}

/// Shared online/offline flag.
pub struct NetworkStatus {
    online: AtomicBool,
}

impl NetworkStatus {
    /// Create a status flag with the given initial assumption.
    pub fn new(online: bool) -> Self {
        NetworkStatus {
            online: AtomicBool::new(online),
        }
    }

    /// Record a connectivity observation.
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::Release);
    }
}

impl Connectivity for NetworkStatus {
    fn is_online(&self) -> bool {
        self.online.load(Ordering::Acquire)
    }
}

/// Active connectivity check used by the watcher.
pub trait ConnectivityProbe: Send + Sync {
    /// Probe once; `true` means online.
    fn check(&self) -> Pin<Box<dyn Future<Output = bool> + Send + '_>>;
}

/// Probe that issues a GET against a health endpoint through the transport.
///
/// Any successful (2xx) response counts as online; every failure, including
/// non-2xx answers, counts as offline.
pub struct HttpProbe {
    transport: Arc<dyn Transport>,
    url: String,
}

impl HttpProbe {
    /// Create a probe against the given health URL.
    pub fn new(transport: Arc<dyn Transport>, url: impl Into<String>) -> Self {
        HttpProbe {
            transport,
            url: url.into(),
        }
    }
}

impl ConnectivityProbe for HttpProbe {
    fn check(&self) -> Pin<Box<dyn Future<Output = bool> + Send + '_>> {
        Box::pin(async move {
            let request = SyncRequest {
                endpoint: self.url.clone(),
                method: "GET".to_string(),
                headers: Vec::new(),
                body: Value::Null,
            };
            self.transport.dispatch(request).await.is_ok()
        })
    }
}
