// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use ob_core::SyncQueue;

use crate::config::{get_db_path, init_work_dir};
use crate::error::Result;

pub fn run(base_url: &str, path: Option<String>) -> Result<()> {
    let target_path = match path {
        Some(p) => PathBuf::from(p),
        None => std::env::current_dir()?,
    };

    let work_dir = init_work_dir(&target_path, base_url)?;

    // Create the database up front so the first enqueue cannot fail on a
    // missing file.
    SyncQueue::open(&get_db_path(&work_dir))?;

    println!("Initialized outbox at {}", work_dir.display());
    println!("Backend: {}", base_url);
    Ok(())
}
