// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{LedgerError, LedgerResult, ValidationError};
use crate::ledger::query::QueryState;
use crate::ledger::recurring::materialize;
use crate::ledger::view::{build_view, ViewModel};
use crate::models::{Entry, EntryDraft, EntryPatch, RecurringKey, MAX_AMOUNT};
use crate::utils::parse_decimal;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rust_decimal::Decimal;
use tracing::debug;

/// Row-level actions a front end can issue against the ledger.
#[derive(Debug, Clone)]
pub enum LedgerCommand {
    Create(EntryDraft),
    Edit { id: String, patch: EntryPatch },
    Delete { id: String },
    Cancel,
    Import(Vec<Entry>),
    Wipe,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    /// True when the collection differs and should be saved.
    pub changed: bool,
    /// Id of the entry created or edited, if any.
    pub id: Option<String>,
}

impl Outcome {
    fn unchanged() -> Self {
        Self::default()
    }

    fn touched(id: Option<String>) -> Self {
        Self { changed: true, id }
    }
}

#[derive(Debug, Default)]
pub struct Refresh {
    pub added: usize,
    pub failures: Vec<LedgerError>,
}

impl Refresh {
    pub fn changed(&self) -> bool {
        self.added > 0
    }
}

/// The entry collection plus the operations that change it. Loaded once by
/// the caller, mutated only through [`Ledger::apply`] and [`Ledger::refresh`].
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    entries: Vec<Entry>,
}

impl Ledger {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn find(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn apply(&mut self, cmd: LedgerCommand, now: DateTime<Utc>) -> LedgerResult<Outcome> {
        debug!(?cmd, "applying ledger command");
        match cmd {
            LedgerCommand::Create(draft) => {
                let entry = create_entry(draft, now)?;
                let id = entry.id.clone();
                self.entries.push(entry);
                Ok(Outcome::touched(Some(id)))
            }
            LedgerCommand::Edit { id, patch } => {
                let Some(idx) = self.entries.iter().position(|e| e.id == id) else {
                    return Ok(Outcome::unchanged());
                };
                let edited = edit_entry(&self.entries[idx], patch)?;
                self.entries[idx] = edited;
                Ok(Outcome::touched(Some(id)))
            }
            LedgerCommand::Delete { id } => {
                let before = self.entries.len();
                self.entries.retain(|e| e.id != id);
                Ok(Outcome {
                    changed: self.entries.len() != before,
                    id: None,
                })
            }
            LedgerCommand::Cancel => Ok(Outcome::unchanged()),
            LedgerCommand::Import(entries) => {
                self.entries = entries;
                Ok(Outcome::touched(None))
            }
            LedgerCommand::Wipe => {
                let changed = !self.entries.is_empty();
                self.entries.clear();
                Ok(Outcome { changed, id: None })
            }
        }
    }

    /// Backfills recurring occurrences through the month of `today`.
    pub fn refresh(&mut self, today: NaiveDate) -> Refresh {
        let m = materialize(&self.entries, today);
        if m.changed {
            self.entries = m.entries;
        }
        Refresh {
            added: m.added,
            failures: m.failures,
        }
    }

    pub fn view(&self, state: &QueryState, today: NaiveDate) -> ViewModel<'_> {
        build_view(&self.entries, state, today)
    }
}

fn create_entry(draft: EntryDraft, now: DateTime<Utc>) -> LedgerResult<Entry> {
    let title = validate_title(&draft.title)?;
    let amount = validate_amount(&draft.amount)?;
    let category = normalize_category(&draft.category);
    let date = if draft.date.trim().is_empty() {
        now.date_naive().format("%Y-%m-%d").to_string()
    } else {
        validate_date(&draft.date)?
    };
    let recurring_key = draft
        .recurring
        .then(|| RecurringKey::compose(&title, amount, category.as_deref()));

    Ok(Entry {
        id: crate::ledger::new_entry_id(),
        title,
        amount,
        category,
        date,
        created_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        recurring: draft.recurring.then_some(true),
        recurring_key,
    })
}

fn edit_entry(current: &Entry, patch: EntryPatch) -> LedgerResult<Entry> {
    let title = match patch.title {
        Some(t) => validate_title(&t)?,
        None => current.title.clone(),
    };
    let amount = match patch.amount {
        Some(a) => validate_amount(&a)?,
        None => current.amount,
    };
    let category = match patch.category {
        Some(c) => normalize_category(&c),
        None => current.category.clone(),
    };
    let date = match patch.date {
        Some(d) => validate_date(&d)?,
        None => current.date.clone(),
    };
    Ok(Entry {
        title,
        amount,
        category,
        date,
        ..current.clone()
    })
}

fn validate_title(raw: &str) -> Result<String, ValidationError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(title.to_string())
}

fn validate_amount(raw: &str) -> Result<Decimal, ValidationError> {
    let amount =
        parse_decimal(raw).map_err(|_| ValidationError::InvalidAmount(raw.to_string()))?;
    if amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount);
    }
    if amount > MAX_AMOUNT {
        return Err(ValidationError::AmountTooLarge);
    }
    Ok(amount)
}

fn validate_date(raw: &str) -> Result<String, ValidationError> {
    let date = raw.trim();
    if date.is_empty() {
        return Err(ValidationError::MissingDate);
    }
    crate::utils::parse_date(date).map_err(|_| ValidationError::InvalidDate(date.to_string()))?;
    Ok(date.to_string())
}

fn normalize_category(raw: &str) -> Option<String> {
    let c = raw.trim();
    (!c.is_empty()).then(|| c.to_string())
}
