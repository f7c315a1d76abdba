// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Entry;
use crate::utils::fold_cmp;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Date,
    Title,
    Category,
    Amount,
}

impl SortKey {
    /// Text columns start ascending, date and amount start newest/largest first.
    pub fn default_direction(self) -> SortDirection {
        match self {
            SortKey::Title | SortKey::Category => SortDirection::Asc,
            SortKey::Date | SortKey::Amount => SortDirection::Desc,
        }
    }

    fn compare(self, a: &Entry, b: &Entry) -> Ordering {
        match self {
            SortKey::Amount => a.amount.cmp(&b.amount),
            SortKey::Date => a.date.cmp(&b.date),
            SortKey::Title => fold_cmp(&a.title, &b.title),
            SortKey::Category => fold_cmp(
                a.category.as_deref().unwrap_or(""),
                b.category.as_deref().unwrap_or(""),
            ),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "date" => Ok(SortKey::Date),
            "title" => Ok(SortKey::Title),
            "category" => Ok(SortKey::Category),
            "amount" => Ok(SortKey::Amount),
            other => Err(format!(
                "Unknown sort key '{}' (use date|title|category|amount)",
                other
            )),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SortKey::Date => "date",
            SortKey::Title => "title",
            SortKey::Category => "category",
            SortKey::Amount => "amount",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(format!("Unknown sort direction '{}' (use asc|desc)", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(key: SortKey, direction: Option<SortDirection>) -> Self {
        Self {
            key,
            direction: direction.unwrap_or_else(|| key.default_direction()),
        }
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::new(SortKey::Date, Some(SortDirection::Desc))
    }
}

/// AND-combined filters. Blank values are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    /// `YYYY-MM`, compared against the date's month prefix.
    pub month: Option<String>,
    /// Exact, case-sensitive.
    pub category: Option<String>,
    /// Case-insensitive substring of the title.
    pub search: Option<String>,
}

impl Filter {
    pub fn matches(&self, e: &Entry) -> bool {
        if let Some(m) = non_blank(&self.month) {
            if e.month_bucket() != Some(m) {
                return false;
            }
        }
        if let Some(c) = non_blank(&self.category) {
            if e.category.as_deref() != Some(c) {
                return false;
            }
        }
        if let Some(s) = non_blank(&self.search) {
            let needle = s.trim().to_lowercase();
            if !needle.is_empty() && !e.title.to_lowercase().contains(&needle) {
                return false;
            }
        }
        true
    }
}

fn non_blank(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub page_size: usize,
}

impl Pagination {
    pub fn new(page: usize, page_size: usize) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

/// Caller-owned listing state.
#[derive(Debug, Clone, Default)]
pub struct QueryState {
    pub sort: SortSpec,
    pub filter: Filter,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<'a> {
    pub rows: Vec<&'a Entry>,
    pub total: usize,
    pub total_pages: usize,
    pub page: usize,
}

pub fn filter_entries<'a>(entries: &'a [Entry], filter: &Filter) -> Vec<&'a Entry> {
    entries.iter().filter(|e| filter.matches(e)).collect()
}

/// Stable: rows comparing equal keep their input order in both directions.
pub fn sort_entries(rows: &mut [&Entry], spec: SortSpec) {
    rows.sort_by(|a, b| {
        let ord = spec.key.compare(a, b);
        match spec.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}

/// Slices one page. Out-of-range page numbers are clamped into `[1, total_pages]`.
pub fn paginate<'a>(rows: &[&'a Entry], pagination: Pagination) -> Page<'a> {
    let size = pagination.page_size.max(1);
    let total = rows.len();
    let total_pages = total.div_ceil(size).max(1);
    let page = pagination.page.clamp(1, total_pages);
    let start = (page - 1) * size;
    let end = (start + size).min(total);
    Page {
        rows: rows.get(start..end).unwrap_or_default().to_vec(),
        total,
        total_pages,
        page,
    }
}

pub fn query<'a>(entries: &'a [Entry], state: &QueryState) -> Page<'a> {
    let mut rows = filter_entries(entries, &state.filter);
    sort_entries(&mut rows, state.sort);
    paginate(&rows, state.pagination)
}
