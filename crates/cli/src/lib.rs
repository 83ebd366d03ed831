// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! obrs - offline-first HTTP delivery queue library.
//!
//! This crate provides the functionality behind the `outbox` CLI tool: a
//! durable, SQLite-backed queue of HTTP requests that is drained against a
//! backend whenever connectivity allows.
//!
//! # Main Components
//!
//! - [`sync`] - Transport, offline wrappers, processor and triggers
//! - [`Config`] - Project configuration (backend URL, sync settings)
//! - [`AppContext`] - Everything a command needs, built once per invocation
//! - [`Error`] - Error types for all operations
//!
//! # Initialization
//!
//! Use [`init_work_dir`] to create a new `.outbox/` directory, then open the
//! queue:
//!
//! ```rust,ignore
//! use obrs::{find_work_dir, get_db_path, init_work_dir, Config};
//! use ob_core::SyncQueue;
//!
//! // Initialize a new project
//! let work_dir = init_work_dir(Path::new("."), "https://api.example.com")?;
//!
//! // Later, find and open an existing project
//! let work_dir = find_work_dir()?;
//! let config = Config::load(&work_dir)?;
//! let queue = SyncQueue::open(&get_db_path(&work_dir))?;
//! ```

mod cli;
mod commands;
mod display;

pub mod config;
pub mod context;
pub mod error;
pub mod sync;

pub use cli::{Cli, Command, OutputFormat};
pub use config::{find_work_dir, get_db_path, init_work_dir, Config};
pub use context::AppContext;
pub use error::{Error, Result};

use clap::CommandFactory;
use clap_complete::generate;

/// Execute a parsed CLI invocation.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Init { base_url, path } => commands::init::run(&base_url, path),
        Command::Completion { shell } => {
            generate(shell, &mut Cli::command(), "outbox", &mut std::io::stdout());
            Ok(())
        }
        command => {
            let ctx = AppContext::init(cli.offline)?;
            match command {
                Command::Add {
                    kind,
                    data,
                    endpoint,
                    method,
                    headers,
                    max_retries,
                    output,
                } => commands::queue::add(
                    &ctx,
                    &kind,
                    &data,
                    endpoint,
                    &method,
                    &headers,
                    max_retries,
                    output,
                ),
                Command::List { kind, all, output } => {
                    commands::queue::list(&ctx, kind.as_deref(), all, output)
                }
                Command::Stats { output } => commands::queue::stats(&ctx, output),
                Command::Remove { id } => commands::queue::remove(&ctx, id),
                Command::Clear => commands::queue::clear(&ctx),
                Command::Send {
                    kind,
                    data,
                    endpoint,
                    method,
                    headers,
                    output,
                } => commands::sync::send(&ctx, &kind, &data, endpoint, method, &headers, output),
                Command::Sync { kind, output } => {
                    commands::sync::sync(&ctx, kind.as_deref(), output)
                }
                Command::Watch { interval } => commands::sync::watch(&ctx, interval),
                Command::Init { .. } | Command::Completion { .. } => unreachable!(),
            }
        }
    }
}
