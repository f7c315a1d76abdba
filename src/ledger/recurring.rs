// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{LedgerError, LedgerResult};
use crate::ledger::month::YearMonth;
use crate::models::{Entry, RecurringKey};
use chrono::{NaiveDate, SecondsFormat, Utc};
use std::collections::{BTreeSet, HashMap};
use tracing::{info, warn};

/// Entries sharing one recurring key. The template is the first member seen.
#[derive(Debug)]
pub struct RecurringGroup<'a> {
    pub key: RecurringKey,
    pub template: &'a Entry,
    pub members: Vec<&'a Entry>,
}

impl RecurringGroup<'_> {
    /// Months already covered by the group. Fails on the first member whose date is malformed.
    pub fn months(&self) -> LedgerResult<BTreeSet<YearMonth>> {
        self.members
            .iter()
            .map(|e| {
                YearMonth::from_date_str(&e.date).ok_or_else(|| LedgerError::Materialize {
                    key: self.key.to_string(),
                    date: e.date.clone(),
                })
            })
            .collect()
    }

    /// Months in `[start, end]` with no occurrence yet.
    pub fn missing_months(&self, end: YearMonth) -> LedgerResult<Vec<YearMonth>> {
        let have = self.months()?;
        let Some(&start) = have.first() else {
            return Ok(Vec::new());
        };
        Ok(start.through(end).filter(|m| !have.contains(m)).collect())
    }
}

/// Recurring entries grouped by key, groups in first-seen order.
pub fn recurring_groups(entries: &[Entry]) -> Vec<RecurringGroup<'_>> {
    let mut groups: Vec<RecurringGroup<'_>> = Vec::new();
    let mut index: HashMap<RecurringKey, usize> = HashMap::new();
    for e in entries.iter().filter(|e| e.is_recurring()) {
        let key = e.group_key();
        match index.get(&key) {
            Some(&i) => groups[i].members.push(e),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(RecurringGroup {
                    key,
                    template: e,
                    members: vec![e],
                });
            }
        }
    }
    groups
}

#[derive(Debug)]
pub struct Materialized {
    pub entries: Vec<Entry>,
    pub changed: bool,
    pub added: usize,
    /// Groups skipped because a member's date could not be read.
    pub failures: Vec<LedgerError>,
}

/// Backfills one occurrence per missing month, from each group's earliest
/// month through the month of `today`. The input is left untouched; the
/// extended copy is returned with `changed` set iff anything was appended.
pub fn materialize(entries: &[Entry], today: NaiveDate) -> Materialized {
    let end = YearMonth::of(today);
    let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let mut out = entries.to_vec();
    let mut failures = Vec::new();
    let mut added = 0;

    for group in recurring_groups(entries) {
        let missing = match group.missing_months(end) {
            Ok(m) => m,
            Err(err) => {
                warn!(key = %group.key, error = %err, "skipping recurring group");
                failures.push(err);
                continue;
            }
        };
        for month in missing {
            out.push(occurrence(group.template, &group.key, month, &created_at));
            added += 1;
        }
    }

    if added > 0 {
        info!(added, through = %end, "materialized recurring entries");
    }
    Materialized {
        entries: out,
        changed: added > 0,
        added,
        failures,
    }
}

fn occurrence(template: &Entry, key: &RecurringKey, month: YearMonth, created_at: &str) -> Entry {
    Entry {
        id: crate::ledger::new_entry_id(),
        title: template.title.clone(),
        amount: template.amount,
        category: template.category.clone(),
        date: month.first_day(),
        created_at: created_at.to_string(),
        recurring: Some(true),
        recurring_key: Some(key.clone()),
    }
}
