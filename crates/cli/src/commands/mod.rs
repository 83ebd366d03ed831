// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Command implementations for the `outbox` CLI.

pub mod init;
pub mod queue;
pub mod sync;

use serde_json::Value;
use tokio::runtime::Runtime;

use crate::error::{Error, Result};

/// Parse repeated `-H 'Name: value'` arguments.
pub(crate) fn parse_headers(raw: &[String]) -> Result<Vec<(String, String)>> {
    raw.iter()
        .map(|h| {
            let (name, value) = h
                .split_once(':')
                .ok_or_else(|| Error::InvalidHeader(h.clone()))?;
            let name = name.trim();
            if name.is_empty() {
                return Err(Error::InvalidHeader(h.clone()));
            }
            Ok((name.to_string(), value.trim().to_string()))
        })
        .collect()
}

/// Parse a `--data` JSON payload.
pub(crate) fn parse_payload(raw: &str) -> Result<Value> {
    serde_json::from_str(raw).map_err(|e| Error::InvalidPayload(e.to_string()))
}

/// Build the runtime that drives async commands.
pub(crate) fn runtime() -> Result<Runtime> {
    Runtime::new().map_err(Error::Io)
}

/// Default endpoint path and method for the well-known item kinds.
pub(crate) fn kind_route(kind: &str) -> Option<(&'static str, &'static str)> {
    match kind {
        "attendance" => Some(("/api/attendance", "POST")),
        "form" => Some(("/api/forms", "POST")),
        "message" => Some(("/api/messages", "POST")),
        "performance" => Some(("/api/performance", "PUT")),
        "training-plan" => Some(("/api/training-plans", "POST")),
        _ => None,
    }
}
