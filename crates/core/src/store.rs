// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! SQLite-backed durable store for sync items.
//!
//! The [`Store`] persists queued items across process restarts. Each public
//! operation runs as its own implicit transaction; SQLite serializes
//! concurrent access internally, so no application-level locking is needed.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::item::{Delivery, SyncItem, SyncStatus};

/// SQL schema for the sync queue database.
pub const SCHEMA: &str = r#"
-- One row per unit of deferred work
CREATE TABLE IF NOT EXISTS sync_items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    kind TEXT NOT NULL,
    data TEXT NOT NULL,
    endpoint TEXT NOT NULL,
    method TEXT NOT NULL DEFAULT 'POST',
    headers TEXT NOT NULL DEFAULT '[]',
    max_retries INTEGER NOT NULL DEFAULT 3,
    created_ms INTEGER NOT NULL,
    status TEXT NOT NULL DEFAULT 'pending',
    retry_count INTEGER NOT NULL DEFAULT 0,
    last_error TEXT
);

-- Indexes
CREATE INDEX IF NOT EXISTS idx_sync_items_kind ON sync_items(kind);
CREATE INDEX IF NOT EXISTS idx_sync_items_status ON sync_items(status);
CREATE INDEX IF NOT EXISTS idx_sync_items_created ON sync_items(created_ms);
"#;

/// Parse a string value from the database, returning a rusqlite error on
/// parse failure.
fn parse_db<T: std::str::FromStr>(
    value: &str,
    column: &str,
) -> std::result::Result<T, rusqlite::Error> {
    value.parse().map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(Error::CorruptedData(format!(
                "invalid value '{value}' in column '{column}'"
            ))),
        )
    })
}

/// Parse a JSON column from the database.
fn parse_json(value: &str, column: &str) -> std::result::Result<Value, rusqlite::Error> {
    serde_json::from_str(value).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(Error::CorruptedData(format!(
                "invalid JSON in column '{column}'"
            ))),
        )
    })
}

/// Parse the headers column (JSON array of name/value pairs).
fn parse_headers(value: &str) -> std::result::Result<Vec<(String, String)>, rusqlite::Error> {
    serde_json::from_str(value).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(Error::CorruptedData(
                "invalid JSON in column 'headers'".to_string(),
            )),
        )
    })
}

/// Map a full `sync_items` row to a [`SyncItem`].
fn row_to_item(row: &rusqlite::Row<'_>) -> std::result::Result<SyncItem, rusqlite::Error> {
    let data_raw: String = row.get("data")?;
    let headers_raw: String = row.get("headers")?;
    let status_raw: String = row.get("status")?;

    Ok(SyncItem {
        id: row.get("id")?,
        kind: row.get("kind")?,
        data: parse_json(&data_raw, "data")?,
        delivery: Delivery {
            endpoint: row.get("endpoint")?,
            method: row.get("method")?,
            headers: parse_headers(&headers_raw)?,
            max_retries: row.get("max_retries")?,
        },
        created_ms: row.get("created_ms")?,
        status: parse_db(&status_raw, "status")?,
        retry_count: row.get("retry_count")?,
        last_error: row.get("last_error")?,
    })
}

/// Durable store for sync items, keyed by auto-incrementing id.
#[derive(Debug)]
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (or create) the store at the given path.
    ///
    /// Idempotent: applies the schema on first use. Fails with
    /// [`Error::StorageUnavailable`] when the database cannot be opened.
    pub fn open(path: &Path) -> Result<Self> {
        let conn =
            Connection::open(path).map_err(|e| Error::StorageUnavailable(e.to_string()))?;
        conn.execute_batch(SCHEMA)?;
        Ok(Store { conn })
    }

    /// Open an in-memory store (tests and throwaway queues).
    pub fn open_in_memory() -> Result<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| Error::StorageUnavailable(e.to_string()))?;
        conn.execute_batch(SCHEMA)?;
        Ok(Store { conn })
    }

    /// Insert a new item, returning its assigned id. Never overwrites.
    pub fn add(
        &self,
        kind: &str,
        data: &Value,
        delivery: &Delivery,
        created_ms: i64,
    ) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO sync_items
                 (kind, data, endpoint, method, headers, max_retries,
                  created_ms, status, retry_count, last_error)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 0, NULL)",
            params![
                kind,
                data.to_string(),
                delivery.endpoint,
                delivery.method,
                serde_json::to_string(&delivery.headers)?,
                delivery.max_retries,
                created_ms,
                SyncStatus::Pending.as_str(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Fetch a single item by id. Absent ids yield `None`, not an error.
    pub fn get(&self, id: i64) -> Result<Option<SyncItem>> {
        let item = self
            .conn
            .query_row(
                "SELECT * FROM sync_items WHERE id = ?1",
                params![id],
                row_to_item,
            )
            .optional()?;
        Ok(item)
    }

    /// Fetch all items, oldest first.
    pub fn all(&self) -> Result<Vec<SyncItem>> {
        let mut stmt = self
            .conn
            .prepare("SELECT * FROM sync_items ORDER BY created_ms, id")?;
        let items = stmt
            .query_map([], row_to_item)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(items)
    }

    /// Fetch items whose status is one of `statuses`, optionally filtered by
    /// kind, oldest first. Returns an empty vec when nothing matches.
    pub fn by_status(&self, statuses: &[SyncStatus], kind: Option<&str>) -> Result<Vec<SyncItem>> {
        if statuses.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders = statuses
            .iter()
            .enumerate()
            .map(|(i, _)| format!("?{}", i + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let mut sql = format!(
            "SELECT * FROM sync_items WHERE status IN ({placeholders})"
        );
        if kind.is_some() {
            sql.push_str(&format!(" AND kind = ?{}", statuses.len() + 1));
        }
        sql.push_str(" ORDER BY created_ms, id");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut values: Vec<&dyn rusqlite::ToSql> = Vec::new();
        let status_strs: Vec<&str> = statuses.iter().map(SyncStatus::as_str).collect();
        for s in &status_strs {
            values.push(s);
        }
        if let Some(ref k) = kind {
            values.push(k);
        }
        let items = stmt
            .query_map(values.as_slice(), row_to_item)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(items)
    }

    /// Fetch items by kind, oldest first.
    pub fn by_kind(&self, kind: &str) -> Result<Vec<SyncItem>> {
        let mut stmt = self
            .conn
            .prepare("SELECT * FROM sync_items WHERE kind = ?1 ORDER BY created_ms, id")?;
        let items = stmt
            .query_map(params![kind], row_to_item)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(items)
    }

    /// Full-record upsert by id, used for status/metadata updates.
    pub fn put(&self, item: &SyncItem) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO sync_items
                 (id, kind, data, endpoint, method, headers, max_retries,
                  created_ms, status, retry_count, last_error)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                item.id,
                item.kind,
                item.data.to_string(),
                item.delivery.endpoint,
                item.delivery.method,
                serde_json::to_string(&item.delivery.headers)?,
                item.delivery.max_retries,
                item.created_ms,
                item.status.as_str(),
                item.retry_count,
                item.last_error,
            ],
        )?;
        Ok(())
    }

    /// Delete by id. Idempotent: deleting an absent id is a no-op.
    pub fn delete(&self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM sync_items WHERE id = ?1", params![id])?;
        Ok(())
    }

    /// Delete every item in one of the given statuses, returning the count
    /// removed.
    pub fn delete_by_status(&self, statuses: &[SyncStatus]) -> Result<usize> {
        if statuses.is_empty() {
            return Ok(0);
        }
        let placeholders = statuses
            .iter()
            .enumerate()
            .map(|(i, _)| format!("?{}", i + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("DELETE FROM sync_items WHERE status IN ({placeholders})");
        let status_strs: Vec<&str> = statuses.iter().map(SyncStatus::as_str).collect();
        let values: Vec<&dyn rusqlite::ToSql> =
            status_strs.iter().map(|s| s as &dyn rusqlite::ToSql).collect();
        let removed = self.conn.execute(&sql, values.as_slice())?;
        Ok(removed)
    }

    /// Count of items per status, as (status, count) pairs.
    pub fn counts_by_status(&self) -> Result<Vec<(SyncStatus, usize)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT status, COUNT(*) FROM sync_items GROUP BY status")?;
        let counts = stmt
            .query_map([], |row| {
                let status_raw: String = row.get(0)?;
                let count: i64 = row.get(1)?;
                Ok((parse_db::<SyncStatus>(&status_raw, "status")?, count as usize))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(counts)
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
