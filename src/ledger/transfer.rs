// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Entry, MAX_AMOUNT};
use serde_json::Value;
use std::collections::HashSet;
use tracing::{info, warn};

/// Full collection as an indented JSON array.
pub fn export_json(entries: &[Entry]) -> LedgerResult<String> {
    Ok(serde_json::to_string_pretty(entries)?)
}

/// Parses an exported array. Every element needs a non-empty `title`, a
/// numeric `amount` within ±1,000,000,000,000 and a `date`; a missing `id`
/// is generated and ids must be unique. The whole document is rejected on
/// the first bad element.
pub fn parse_import(text: &str) -> LedgerResult<Vec<Entry>> {
    let result = parse_elements(text);
    match &result {
        Ok(entries) => info!(count = entries.len(), "import accepted"),
        Err(err) => warn!(error = %err, "import rejected"),
    }
    result
}

fn parse_elements(text: &str) -> LedgerResult<Vec<Entry>> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| LedgerError::Format(format!("not valid JSON ({})", e)))?;
    let Value::Array(items) = value else {
        return Err(LedgerError::Format("top-level value must be an array".into()));
    };

    let mut entries = Vec::with_capacity(items.len());
    let mut ids = HashSet::with_capacity(items.len());
    for (i, mut item) in items.into_iter().enumerate() {
        let Some(obj) = item.as_object_mut() else {
            return Err(LedgerError::Format(format!("element {} is not an object", i)));
        };

        let has_title = obj
            .get("title")
            .and_then(Value::as_str)
            .is_some_and(|t| !t.is_empty());
        let has_amount = obj.get("amount").is_some_and(Value::is_number);
        let has_date = obj
            .get("date")
            .and_then(Value::as_str)
            .is_some_and(|d| !d.is_empty());
        if !(has_title && has_amount && has_date) {
            return Err(LedgerError::Format(format!(
                "element {} is missing title, amount or date",
                i
            )));
        }

        // Server-issued ids are integers; keep them, as strings.
        let id = match obj.get("id") {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => super::new_entry_id(),
        };
        if !ids.insert(id.clone()) {
            return Err(LedgerError::Format(format!(
                "element {} repeats id '{}'",
                i, id
            )));
        }
        obj.insert("id".into(), Value::String(id));

        let entry: Entry = serde_json::from_value(item)
            .map_err(|e| LedgerError::Format(format!("element {}: {}", i, e)))?;
        if entry.amount.abs() > MAX_AMOUNT {
            return Err(LedgerError::Format(format!(
                "element {} amount {} is out of range",
                i, entry.amount
            )));
        }
        entries.push(entry);
    }
    Ok(entries)
}
