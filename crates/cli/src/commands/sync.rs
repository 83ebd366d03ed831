// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Delivery commands: send, sync, watch.

use std::sync::Arc;
use std::time::Duration;

use ob_core::Delivery;

use super::{kind_route, parse_headers, parse_payload, runtime};
use crate::cli::OutputFormat;
use crate::context::AppContext;
use crate::display;
use crate::error::{Error, Result};
use crate::sync::{manual_sync, watch_connectivity, Connectivity, ConnectivityEvent, HttpProbe};

#[allow(clippy::too_many_arguments)]
pub fn send(
    ctx: &AppContext,
    kind: &str,
    data: &str,
    endpoint: Option<String>,
    method: Option<String>,
    headers: &[String],
    output: OutputFormat,
) -> Result<()> {
    let payload = parse_payload(data)?;
    let client = ctx.offline_client();
    let rt = runtime()?;

    // Plain well-known kinds go through their wrapper; anything customized
    // builds an explicit delivery.
    let plain = endpoint.is_none() && method.is_none() && headers.is_empty();
    let outcome = if plain {
        match kind {
            "attendance" => {
                rt.block_on(client.record_attendance(&ctx.queue, &ctx.config, payload))?
            }
            "form" => rt.block_on(client.submit_form(&ctx.queue, &ctx.config, payload))?,
            "message" => rt.block_on(client.send_message(&ctx.queue, &ctx.config, payload))?,
            "performance" => {
                rt.block_on(client.update_performance(&ctx.queue, &ctx.config, payload))?
            }
            "training-plan" => {
                rt.block_on(client.submit_training_plan(&ctx.queue, &ctx.config, payload))?
            }
            other => {
                return Err(Error::Config(format!(
                    "unknown kind '{other}': pass --endpoint"
                )))
            }
        }
    } else {
        let route = kind_route(kind);
        let path = match endpoint.as_deref().or(route.map(|(p, _)| p)) {
            Some(p) => p.to_string(),
            None => {
                return Err(Error::Config(format!(
                    "unknown kind '{kind}': pass --endpoint"
                )))
            }
        };
        let method = method
            .or_else(|| route.map(|(_, m)| m.to_string()))
            .unwrap_or_else(|| "POST".to_string());

        let mut delivery = Delivery::to(ctx.config.api_url(&path))
            .method(method)
            .max_retries(ctx.config.sync.max_retries);
        for (name, value) in parse_headers(headers)? {
            delivery = delivery.header(name, value);
        }
        rt.block_on(client.call(&ctx.queue, kind, payload, delivery))?
    };

    display::print_call_outcome(&outcome, output)
}

pub fn sync(ctx: &AppContext, kind: Option<&str>, output: OutputFormat) -> Result<()> {
    let processor = ctx.processor();
    let rt = runtime()?;

    if !ctx.connectivity.is_online() {
        let outcome = rt.block_on(manual_sync(&ctx.queue, &processor, ctx.connectivity.as_ref()))?;
        return display::print_sync_outcome(&outcome, output);
    }

    let report = rt.block_on(processor.process(&ctx.queue, kind))?;
    display::print_report(&report, output)
}

pub fn watch(ctx: &AppContext, interval: Option<u64>) -> Result<()> {
    let interval = Duration::from_secs(interval.unwrap_or(ctx.config.sync.poll_interval_secs));
    let probe = Arc::new(HttpProbe::new(
        Arc::clone(&ctx.transport),
        ctx.config.health_url(),
    ));
    let processor = ctx.processor();
    let rt = runtime()?;

    rt.block_on(async {
        let (handle, mut events) =
            watch_connectivity(probe, ctx.connectivity.clone(), interval);
        println!("watching connectivity (ctrl-c to stop)");

        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => break,
                event = events.recv() => match event {
                    Some(ConnectivityEvent::Online) => {
                        println!("back online, syncing");
                        let outcome =
                            manual_sync(&ctx.queue, &processor, ctx.connectivity.as_ref()).await?;
                        println!("{}", outcome.message);
                    }
                    Some(ConnectivityEvent::Offline) => {
                        println!("connection lost, queueing locally");
                    }
                    None => break,
                },
            }
        }

        handle.stopped().await;
        Ok(())
    })
}
