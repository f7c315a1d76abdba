// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::categories::categories;
use crate::ledger::query::{filter_entries, paginate, sort_entries, Page, QueryState};
use crate::ledger::summary::{aggregate, Summary};
use crate::models::Entry;
use chrono::NaiveDate;
use serde::Serialize;

/// Everything a renderer needs for one screen of the ledger.
#[derive(Debug, Clone, Serialize)]
pub struct ViewModel<'a> {
    pub page: Page<'a>,
    pub summary: Summary,
    pub categories: Vec<String>,
}

/// Pure projection of the (already materialized) collection.
pub fn build_view<'a>(entries: &'a [Entry], state: &QueryState, today: NaiveDate) -> ViewModel<'a> {
    let filtered = filter_entries(entries, &state.filter);
    let mut sorted = filtered.clone();
    sort_entries(&mut sorted, state.sort);
    let page = paginate(&sorted, state.pagination);
    // Breakdown follows collection order, not the listing's sort.
    let summary = aggregate(entries, &filtered, &page.rows, today);
    ViewModel {
        page,
        summary,
        categories: categories(entries),
    }
}
