// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

//! Shared fixtures for sync engine tests.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use ob_core::{Delivery, SyncQueue};
use serde_json::{json, Value};

use super::transport::{SyncRequest, Transport, TransportError, TransportResult};

/// In-memory queue for tests.
pub fn test_queue() -> SyncQueue {
    SyncQueue::open_in_memory().unwrap()
}

/// Delivery descriptor pointing at a fake endpoint.
pub fn test_delivery(endpoint: &str) -> Delivery {
    Delivery::to(endpoint)
}

/// Enqueue one item and return its id.
pub fn seed_item(queue: &SyncQueue, kind: &str, endpoint: &str) -> i64 {
    queue
        .enqueue(kind, json!({"seed": kind}), test_delivery(endpoint))
        .unwrap()
}

/// Scriptable transport that records every dispatched request.
#[derive(Default)]
pub struct MockTransport {
    requests: Mutex<Vec<SyncRequest>>,
    failing_endpoints: Mutex<Vec<String>>,
    fail_all: AtomicBool,
    responses: Mutex<HashMap<String, Value>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make requests to `endpoint` answer HTTP 500.
    pub fn fail_endpoint(&self, endpoint: &str) {
        self.failing_endpoints
            .lock()
            .unwrap()
            .push(endpoint.to_string());
    }

    /// Make every request fail at the connection level.
    pub fn set_fail_all(&self, fail: bool) {
        self.fail_all.store(fail, Ordering::SeqCst);
    }

    /// Script the response body for `endpoint`.
    pub fn respond_with(&self, endpoint: &str, body: Value) {
        self.responses
            .lock()
            .unwrap()
            .insert(endpoint.to_string(), body);
    }

    /// Everything dispatched so far, in dispatch order.
    pub fn requests(&self) -> Vec<SyncRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Transport for MockTransport {
    fn dispatch(
        &self,
        request: SyncRequest,
    ) -> Pin<Box<dyn Future<Output = TransportResult<Value>> + Send + '_>> {
        Box::pin(async move {
            self.requests.lock().unwrap().push(request.clone());

            if self.fail_all.load(Ordering::SeqCst) {
                return Err(TransportError::RequestFailed(
                    "connection refused".to_string(),
                ));
            }
            if self
                .failing_endpoints
                .lock()
                .unwrap()
                .iter()
                .any(|e| e == &request.endpoint)
            {
                return Err(TransportError::Status {
                    code: 500,
                    reason: "Internal Server Error".to_string(),
                });
            }

            let body = self
                .responses
                .lock()
                .unwrap()
                .get(&request.endpoint)
                .cloned()
                .unwrap_or(Value::Null);
            Ok(body)
        })
    }
}
