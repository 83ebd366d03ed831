// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Transport abstraction for HTTP delivery.
//!
//! Provides a trait-based transport layer that enables:
//! - Real HTTP requests for production
//! - Mock transports for unit testing
//!
//! The transport imposes no protocol beyond "JSON body, JSON-ish response,
//! 2xx means success".

use std::future::Future;
use std::pin::Pin;

use ob_core::{Delivery, SyncItem};
use serde_json::Value;

/// Error type for transport operations.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request could not be issued (DNS, connect, TLS, ...).
    #[error("request failed: {0}")]
    RequestFailed(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {code} {reason}")]
    Status { code: u16, reason: String },

    /// The delivery descriptor could not be turned into a request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// One HTTP request to deliver: the materialized form of a delivery
/// descriptor plus its JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncRequest {
    /// Target endpoint URL.
    pub endpoint: String,
    /// HTTP method.
    pub method: String,
    /// Extra headers, in order. A JSON content-type is always added.
    pub headers: Vec<(String, String)>,
    /// JSON request body.
    pub body: Value,
}

impl SyncRequest {
    /// Build a request from a delivery descriptor and body.
    pub fn new(delivery: &Delivery, body: Value) -> Self {
        SyncRequest {
            endpoint: delivery.endpoint.clone(),
            method: delivery.method.clone(),
            headers: delivery.headers.clone(),
            body,
        }
    }

    /// Build the replay request for a queued item.
    pub fn from_item(item: &SyncItem) -> Self {
        Self::new(&item.delivery, item.data.clone())
    }
}

/// Transport trait for HTTP-like delivery.
///
/// This trait abstracts over the actual transport mechanism, allowing
/// for easy testing with mock implementations. A successful dispatch
/// returns the response body (or `Value::Null` when the body is empty or
/// not JSON).
pub trait Transport: Send + Sync {
    /// Deliver one request.
    fn dispatch(
        &self,
        request: SyncRequest,
    ) -> Pin<Box<dyn Future<Output = TransportResult<Value>> + Send + '_>>;
}

/// HTTP transport implementation using reqwest.
///
/// No explicit request timeout is configured; settlement relies on the
/// client's defaults, and a stuck request stalls only its own item.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a new HTTP transport.
    pub fn new() -> TransportResult<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| TransportError::RequestFailed(e.to_string()))?;
        Ok(HttpTransport { client })
    }
}

impl Transport for HttpTransport {
    fn dispatch(
        &self,
        request: SyncRequest,
    ) -> Pin<Box<dyn Future<Output = TransportResult<Value>> + Send + '_>> {
        Box::pin(async move {
            let method = reqwest::Method::from_bytes(request.method.as_bytes()).map_err(|_| {
                TransportError::InvalidRequest(format!(
                    "invalid HTTP method '{}'",
                    request.method
                ))
            })?;

            let mut builder = self
                .client
                .request(method, &request.endpoint)
                .header("content-type", "application/json");
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }

            let response = builder
                .json(&request.body)
                .send()
                .await
                .map_err(|e| TransportError::RequestFailed(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(TransportError::Status {
                    code: status.as_u16(),
                    reason: status
                        .canonical_reason()
                        .unwrap_or("unknown")
                        .to_string(),
                });
            }

            // Empty or non-JSON bodies settle as null
            Ok(response.json::<Value>().await.unwrap_or(Value::Null))
        })
    }
}
