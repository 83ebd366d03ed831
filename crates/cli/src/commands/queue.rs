// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Queue inspection and maintenance commands.

use ob_core::Delivery;

use super::{kind_route, parse_headers, parse_payload};
use crate::cli::OutputFormat;
use crate::context::AppContext;
use crate::display;
use crate::error::{Error, Result};

#[allow(clippy::too_many_arguments)]
pub fn add(
    ctx: &AppContext,
    kind: &str,
    data: &str,
    endpoint: Option<String>,
    method: &str,
    headers: &[String],
    max_retries: Option<u32>,
    output: OutputFormat,
) -> Result<()> {
    let payload = parse_payload(data)?;
    let route = kind_route(kind);
    let path = match endpoint.as_deref().or(route.map(|(p, _)| p)) {
        Some(p) => p.to_string(),
        None => {
            return Err(Error::Config(format!(
                "unknown kind '{kind}': pass --endpoint"
            )))
        }
    };

    let mut delivery = Delivery::to(ctx.config.api_url(&path))
        .method(method)
        .max_retries(max_retries.unwrap_or(ctx.config.sync.max_retries));
    for (name, value) in parse_headers(headers)? {
        delivery = delivery.header(name, value);
    }

    let id = ctx.queue.enqueue(kind, payload, delivery)?;
    match output {
        OutputFormat::Json => println!("{}", serde_json::json!({ "id": id })),
        OutputFormat::Text => println!("queued as item {}", id),
    }
    Ok(())
}

pub fn list(
    ctx: &AppContext,
    kind: Option<&str>,
    all: bool,
    output: OutputFormat,
) -> Result<()> {
    let items = if all {
        match kind {
            Some(k) => ctx.queue.items_by_kind(k)?,
            None => ctx.queue.items()?,
        }
    } else {
        ctx.queue.pending(kind)?
    };
    display::print_items(&items, output)
}

pub fn stats(ctx: &AppContext, output: OutputFormat) -> Result<()> {
    let stats = ctx.queue.stats()?;
    display::print_stats(&stats, output)
}

pub fn remove(ctx: &AppContext, id: i64) -> Result<()> {
    ctx.queue.remove(id)?;
    println!("removed item {}", id);
    Ok(())
}

pub fn clear(ctx: &AppContext) -> Result<()> {
    let removed = ctx.queue.clear_finished()?;
    println!("cleared {} finished item(s)", removed);
    Ok(())
}
