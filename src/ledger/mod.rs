// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Ledger computation engine: recurring backfill, listing queries,
//! aggregates and the category index. Nothing in here performs I/O.

pub mod categories;
pub mod commands;
pub mod month;
pub mod query;
pub mod recurring;
pub mod summary;
pub mod transfer;
pub mod view;

pub use categories::categories;
pub use commands::{Ledger, LedgerCommand, Outcome, Refresh};
pub use month::YearMonth;
pub use query::{query, Filter, Page, Pagination, QueryState, SortDirection, SortKey, SortSpec};
pub use recurring::{materialize, recurring_groups, Materialized, RecurringGroup};
pub use summary::{aggregate, CategorySlice, Summary};
pub use view::{build_view, ViewModel};

pub(crate) fn new_entry_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
