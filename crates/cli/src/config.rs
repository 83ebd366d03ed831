// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Project configuration management.
//!
//! Configuration is stored in `.outbox/config.toml` and includes:
//! - `base_url`: The backend every relative endpoint is resolved against
//! - `[sync]`: Retry cap, watcher poll interval and health-check path

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

const WORK_DIR_NAME: &str = ".outbox";
const CONFIG_FILE_NAME: &str = "config.toml";
const DB_FILE_NAME: &str = "queue.db";
const GITIGNORE_FILE_NAME: &str = ".gitignore";

/// Project configuration stored in `.outbox/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Backend base URL, e.g. `https://api.example.com`.
    pub base_url: String,
    /// Sync engine settings.
    #[serde(default)]
    pub sync: SyncSettings,
}

/// Sync engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncSettings {
    /// Replay attempts before an item is marked `failed` (default: 3).
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Connectivity watcher poll interval in seconds (default: 30).
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    /// Path probed to decide online/offline (default: `/health`).
    #[serde(default = "default_health_path")]
    pub health_path: String,
}

impl Default for SyncSettings {
    fn default() -> Self {
        SyncSettings {
            max_retries: default_max_retries(),
            poll_interval_secs: default_poll_interval_secs(),
            health_path: default_health_path(),
        }
    }
}

fn default_max_retries() -> u32 {
    ob_core::DEFAULT_MAX_RETRIES
}

fn default_poll_interval_secs() -> u64 {
    30
}

fn default_health_path() -> String {
    "/health".to_string()
}

impl Config {
    /// Creates a new config for the given backend.
    pub fn new(base_url: impl Into<String>) -> Self {
        Config {
            base_url: base_url.into(),
            sync: SyncSettings::default(),
        }
    }

    /// Loads configuration from the given `.outbox/` directory.
    pub fn load(work_dir: &Path) -> Result<Self> {
        let config_path = work_dir.join(CONFIG_FILE_NAME);
        let content = fs::read_to_string(&config_path)
            .map_err(|e| Error::Config(format!("failed to read config: {}", e)))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Saves configuration to the given `.outbox/` directory.
    pub fn save(&self, work_dir: &Path) -> Result<()> {
        let config_path = work_dir.join(CONFIG_FILE_NAME);
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))?;
        fs::write(&config_path, content)?;
        Ok(())
    }

    /// Resolve an endpoint against the base URL. Absolute URLs pass through.
    pub fn api_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    /// URL probed by the connectivity watcher.
    pub fn health_url(&self) -> String {
        self.api_url(&self.sync.health_path)
    }
}

/// Find the .outbox directory by walking up from the current directory
pub fn find_work_dir() -> Result<PathBuf> {
    let mut current = std::env::current_dir()?;
    loop {
        let work_dir = current.join(WORK_DIR_NAME);
        if work_dir.is_dir() {
            return Ok(work_dir);
        }
        if !current.pop() {
            return Err(Error::NotInitialized);
        }
    }
}

/// Get the database path for a work directory
pub fn get_db_path(work_dir: &Path) -> PathBuf {
    work_dir.join(DB_FILE_NAME)
}

/// Initialize a new .outbox directory at the given path
pub fn init_work_dir(path: &Path, base_url: &str) -> Result<PathBuf> {
    let work_dir = path.join(WORK_DIR_NAME);

    if work_dir.exists() {
        return Err(Error::AlreadyInitialized(work_dir.display().to_string()));
    }

    fs::create_dir_all(&work_dir)?;

    let config = Config::new(base_url);
    config.save(&work_dir)?;
    write_gitignore(&work_dir)?;

    Ok(work_dir)
}

/// Keep the queue database out of version control.
fn write_gitignore(work_dir: &Path) -> Result<()> {
    let path = work_dir.join(GITIGNORE_FILE_NAME);
    fs::write(&path, "queue.db\nqueue.db-journal\nqueue.db-wal\nqueue.db-shm\n")?;
    Ok(())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
