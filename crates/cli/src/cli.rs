// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

// Custom help template that groups commands into sections
const HELP_TEMPLATE: &str = "{about-with-newline}
{usage-heading} {usage}

{before-help}Options:
{options}{after-help}";

const COMMANDS_HELP: &str = "\
Queue:
  add         Enqueue a delivery for later replay
  list        List queued items
  stats       Show queue counts by status
  remove      Remove an item by id
  clear       Delete completed and failed items

Delivery:
  send        Deliver now, queueing on failure or while offline
  sync        Replay all due items
  watch       Watch connectivity and sync on reconnect

Setup:
  init        Initialize an outbox directory
  completion  Generate shell completions";

const QUICKSTART_HELP: &str = "\
Get started:
  outbox init https://api.example.com    Initialize against a backend
  outbox send form '{\"field\":1}'         Deliver (or queue) a form
  outbox list                            See what is waiting
  outbox sync                            Replay everything due";

#[derive(Parser)]
#[command(name = "outbox")]
#[command(about = "An offline-first delivery queue for HTTP requests")]
#[command(
    long_about = "An offline-first delivery queue for HTTP requests.\n\n\
    Requests made while offline (or that fail) are stored durably and\n\
    replayed against the backend once connectivity returns."
)]
#[command(help_template = HELP_TEMPLATE)]
#[command(before_help = COMMANDS_HELP)]
#[command(after_help = QUICKSTART_HELP)]
pub struct Cli {
    /// Treat the device as offline: never touch the network, queue everything
    #[arg(long, global = true)]
    pub offline: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    // ─────────────────────────────────────────────────────────────────────────
    // Queue
    // ─────────────────────────────────────────────────────────────────────────
    /// Enqueue a delivery for later replay
    #[command(after_help = "Examples:\n  \
        outbox add form '{\"field\":1}'                    Queue for /api/forms\n  \
        outbox add message '{\"text\":\"hi\"}' -H 'X-K: v'   Queue with a header\n  \
        outbox add custom '{}' --endpoint /api/custom    Queue for a custom path")]
    Add {
        /// Item kind (attendance, form, message, performance, training-plan, or custom)
        kind: String,

        /// JSON payload
        data: String,

        /// Endpoint path or absolute URL (default: derived from kind)
        #[arg(long)]
        endpoint: Option<String>,

        /// HTTP method
        #[arg(long, default_value = "POST")]
        method: String,

        /// Extra header as 'Name: value' (repeatable)
        #[arg(long = "header", short = 'H')]
        headers: Vec<String>,

        /// Replay attempts before the item is marked failed
        #[arg(long)]
        max_retries: Option<u32>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// List queued items
    List {
        /// Only items of this kind
        #[arg(long)]
        kind: Option<String>,

        /// Include completed and failed items
        #[arg(long)]
        all: bool,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Show queue counts by status
    Stats {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Remove an item by id
    #[command(arg_required_else_help = true)]
    Remove {
        /// Item id
        id: i64,
    },

    /// Delete completed and failed items
    Clear,

    // ─────────────────────────────────────────────────────────────────────────
    // Delivery
    // ─────────────────────────────────────────────────────────────────────────
    /// Deliver now, queueing on failure or while offline
    #[command(after_help = "Examples:\n  \
        outbox send attendance '{\"player\":\"p1\"}'   POST to /api/attendance\n  \
        outbox send form '{\"field\":1}' --offline    Queue without trying\n  \
        outbox send custom '{}' --endpoint /api/x   Deliver to a custom path")]
    Send {
        /// Item kind (attendance, form, message, performance, training-plan, or custom)
        kind: String,

        /// JSON payload
        data: String,

        /// Endpoint path or absolute URL (default: derived from kind)
        #[arg(long)]
        endpoint: Option<String>,

        /// HTTP method
        #[arg(long)]
        method: Option<String>,

        /// Extra header as 'Name: value' (repeatable)
        #[arg(long = "header", short = 'H')]
        headers: Vec<String>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Replay all due items
    Sync {
        /// Only items of this kind
        #[arg(long)]
        kind: Option<String>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Watch connectivity and sync on reconnect
    Watch {
        /// Probe interval in seconds (default: from config)
        #[arg(long)]
        interval: Option<u64>,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // Setup
    // ─────────────────────────────────────────────────────────────────────────
    /// Initialize an outbox directory
    Init {
        /// Backend base URL, e.g. https://api.example.com
        base_url: String,

        /// Directory to initialize (default: current directory)
        #[arg(long)]
        path: Option<String>,
    },

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
