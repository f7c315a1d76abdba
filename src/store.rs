// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::LedgerResult;
use crate::models::Entry;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

pub const ENTRIES_KEY: &str = "expenses-v2";

/// Where the entry collection lives between runs.
pub trait EntryStore {
    fn load(&self) -> LedgerResult<Vec<Entry>>;
    fn save(&self, entries: &[Entry]) -> LedgerResult<()>;
}

pub fn kv_get(conn: &Connection, key: &str) -> LedgerResult<Option<String>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

pub fn kv_set(conn: &Connection, key: &str, value: &str) -> LedgerResult<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

/// Collection stored as one JSON document in the `settings` key-value table.
pub struct SqliteStore<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }
}

impl EntryStore for SqliteStore<'_> {
    fn load(&self) -> LedgerResult<Vec<Entry>> {
        let entries: Vec<Entry> = match kv_get(self.conn, ENTRIES_KEY)? {
            Some(raw) => serde_json::from_str(&raw)?,
            None => Vec::new(),
        };
        debug!(count = entries.len(), "loaded entries");
        Ok(entries)
    }

    fn save(&self, entries: &[Entry]) -> LedgerResult<()> {
        kv_set(self.conn, ENTRIES_KEY, &serde_json::to_string(entries)?)?;
        debug!(count = entries.len(), "saved entries");
        Ok(())
    }
}
