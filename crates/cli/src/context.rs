// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared command context.
//!
//! Commands receive everything through [`AppContext`] instead of reaching
//! for ambient state, so tests can build a context over an in-memory queue
//! and a scripted transport.

use std::sync::Arc;

use ob_core::SyncQueue;

use crate::config::{find_work_dir, get_db_path, Config};
use crate::error::{Error, Result};
use crate::sync::{
    HttpTransport, NetworkStatus, OfflineClient, SyncProcessor, Transport,
};

/// Everything a command needs to run.
pub struct AppContext {
    pub config: Config,
    pub queue: SyncQueue,
    pub transport: Arc<dyn Transport>,
    pub connectivity: Arc<NetworkStatus>,
}

impl AppContext {
    /// Build the context for the current project.
    ///
    /// `offline` forces the connectivity flag off; commands then queue
    /// instead of touching the network.
    pub fn init(offline: bool) -> Result<Self> {
        let work_dir = find_work_dir()?;
        let config = Config::load(&work_dir)?;
        let queue = SyncQueue::open(&get_db_path(&work_dir))?;
        let transport: Arc<dyn Transport> =
            Arc::new(HttpTransport::new().map_err(|e| Error::Sync(e.to_string()))?);
        let connectivity = Arc::new(NetworkStatus::new(!offline));
        Ok(AppContext {
            config,
            queue,
            transport,
            connectivity,
        })
    }

    /// Processor over this context's transport.
    pub fn processor(&self) -> SyncProcessor {
        SyncProcessor::new(Arc::clone(&self.transport))
    }

    /// Offline-capable client over this context's connectivity and transport.
    pub fn offline_client(&self) -> OfflineClient {
        OfflineClient::new(self.connectivity.clone(), Arc::clone(&self.transport))
    }
}
