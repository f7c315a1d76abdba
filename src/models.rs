// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const UNCATEGORIZED: &str = "Uncategorized";

/// Largest accepted amount, 1,000,000,000,000. Keeps collection totals far from `Decimal::MAX`.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Grouping key shared by every occurrence of one recurring expense.
///
/// Composed once from title, amount and category when the recurring entry is
/// created, then carried unchanged on the entry and on every synthesized
/// occurrence. Later edits to the entry's fields never recompute it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecurringKey(String);

impl RecurringKey {
    pub fn compose(title: &str, amount: Decimal, category: Option<&str>) -> Self {
        Self(format!(
            "{}|{}|{}",
            title,
            amount.normalize(),
            category.unwrap_or("")
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RecurringKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for RecurringKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One ledger line item, in the persisted/exchanged record shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: String,
    pub title: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub date: String, // YYYY-MM-DD
    #[serde(default)]
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_key: Option<RecurringKey>,
}

impl Entry {
    pub fn is_recurring(&self) -> bool {
        self.recurring == Some(true)
    }

    /// `YYYY-MM` prefix of the date, if the date is long enough to have one.
    pub fn month_bucket(&self) -> Option<&str> {
        self.date.get(..7)
    }

    /// Non-empty category, `None` for absent or blank.
    pub fn category_name(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }

    pub fn category_label(&self) -> &str {
        self.category_name().unwrap_or(UNCATEGORIZED)
    }

    /// Stored key, falling back to the composed `title|amount|category` form.
    pub fn group_key(&self) -> RecurringKey {
        match &self.recurring_key {
            Some(k) => k.clone(),
            None => RecurringKey::compose(&self.title, self.amount, self.category.as_deref()),
        }
    }
}

/// Raw form input for a new entry, validated by the ledger before it becomes an [`Entry`].
#[derive(Debug, Clone, Default)]
pub struct EntryDraft {
    pub title: String,
    pub amount: String,
    pub category: String,
    pub date: String,
    pub recurring: bool,
}

/// Replacement values for an edit. Fields left `None` keep their current value.
#[derive(Debug, Clone, Default)]
pub struct EntryPatch {
    pub title: Option<String>,
    pub amount: Option<String>,
    pub category: Option<String>,
    pub date: Option<String>,
}
