// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text and JSON rendering for command output.

use chrono::{TimeZone, Utc};
use ob_core::{QueueStats, SyncItem};

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::sync::{CallOutcome, SyncOutcome, SyncReport};

/// Render a list of queue items.
pub fn print_items(items: &[SyncItem], output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(items)?),
        OutputFormat::Text => {
            if items.is_empty() {
                println!("queue is empty");
                return Ok(());
            }
            for item in items {
                let when = Utc
                    .timestamp_millis_opt(item.created_ms)
                    .single()
                    .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                    .unwrap_or_else(|| item.created_ms.to_string());
                let retries = if item.retry_count > 0 {
                    format!(" retries={}/{}", item.retry_count, item.delivery.max_retries)
                } else {
                    String::new()
                };
                println!(
                    "{:>4}  {:<10} {:<14} {} {}{}",
                    item.id, item.status, item.kind, when, item.delivery.endpoint, retries
                );
                if let Some(ref err) = item.last_error {
                    println!("      last error: {}", err);
                }
            }
        }
    }
    Ok(())
}

/// Render queue statistics.
pub fn print_stats(stats: &QueueStats, output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(stats)?),
        OutputFormat::Text => {
            println!("total:     {}", stats.total);
            println!("pending:   {}", stats.pending);
            println!("retrying:  {}", stats.retrying);
            println!("completed: {}", stats.completed);
            println!("failed:    {}", stats.failed);
        }
    }
    Ok(())
}

/// Render a drain report.
pub fn print_report(report: &SyncReport, output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Text => {
            println!(
                "synced {} of {} item(s), {} failed",
                report.successful, report.total, report.failed
            );
        }
    }
    Ok(())
}

/// Render a triggered-sync outcome.
pub fn print_sync_outcome(outcome: &SyncOutcome, output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(outcome)?),
        OutputFormat::Text => println!("{}", outcome.message),
    }
    Ok(())
}

/// Render a send outcome.
pub fn print_call_outcome(outcome: &CallOutcome, output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(outcome)?),
        OutputFormat::Text => {
            if outcome.offline {
                let id = outcome.queued_id.unwrap_or_default();
                println!("offline: queued as item {}", id);
            } else if outcome.queued {
                let id = outcome.queued_id.unwrap_or_default();
                let err = outcome.error.as_deref().unwrap_or("unknown error");
                println!("delivery failed ({}), queued as item {}", err, id);
            } else {
                println!("delivered");
                if let Some(ref data) = outcome.data {
                    if !data.is_null() {
                        println!("{}", serde_json::to_string_pretty(data)?);
                    }
                }
            }
        }
    }
    Ok(())
}
