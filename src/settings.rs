// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::query::DEFAULT_PAGE_SIZE;
use crate::store::{kv_get, kv_set};
use anyhow::{bail, Context, Result};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

pub const SETTINGS_KEY: &str = "settings-v1";
pub const CURRENCIES: [&str; 4] = ["GBP", "USD", "EUR", "NGN"];
pub const LOCALES: [&str; 4] = ["en-GB", "en-US", "en-CA", "en-NG"];

/// Display preferences. Missing fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub currency: String,
    pub locale: String,
    pub page_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: "GBP".into(),
            locale: "en-GB".into(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Settings {
    pub fn load(conn: &Connection) -> Result<Self> {
        match kv_get(conn, SETTINGS_KEY)? {
            Some(raw) => serde_json::from_str(&raw).context("Stored settings are corrupt"),
            None => Ok(Self::default()),
        }
    }

    pub fn save(&self, conn: &Connection) -> Result<()> {
        kv_set(conn, SETTINGS_KEY, &serde_json::to_string(self)?)?;
        Ok(())
    }

    pub fn money(&self, amount: rust_decimal::Decimal) -> String {
        crate::utils::fmt_money(amount, &self.currency, &self.locale)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "currency" => {
                let ccy = value.to_uppercase();
                if !CURRENCIES.contains(&ccy.as_str()) {
                    bail!("Unsupported currency '{}' (use {})", value, CURRENCIES.join("|"));
                }
                self.currency = ccy;
            }
            "locale" => {
                if !LOCALES.contains(&value) {
                    bail!("Unsupported locale '{}' (use {})", value, LOCALES.join("|"));
                }
                self.locale = value.to_string();
            }
            "page-size" | "page_size" => {
                let n: usize = value
                    .parse()
                    .with_context(|| format!("Invalid page size '{}'", value))?;
                if n == 0 {
                    bail!("Page size must be at least 1");
                }
                self.page_size = n;
            }
            other => bail!("Unknown setting '{}' (use currency|locale|page-size)", other),
        }
        Ok(())
    }
}
