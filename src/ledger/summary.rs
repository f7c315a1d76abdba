// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::month::YearMonth;
use crate::models::Entry;
use crate::utils::{hsl_css, label_hue};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySlice {
    pub label: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    /// Fraction of the filtered total, 0 when that total is 0.
    #[serde(with = "rust_decimal::serde::float")]
    pub share: Decimal,
    pub hue: u16,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    #[serde(with = "rust_decimal::serde::float")]
    pub current_month_total: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub all_time_total: Decimal,
    pub entry_count: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub page_total: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub filtered_total: Decimal,
    pub category_breakdown: Vec<CategorySlice>,
}

/// Month and all-time figures ignore filters and paging; `page_total` covers
/// only the visible page and the breakdown only the filtered set.
pub fn aggregate(
    all: &[Entry],
    filtered: &[&Entry],
    page: &[&Entry],
    today: NaiveDate,
) -> Summary {
    let this_month = YearMonth::of(today).to_string();
    let current_month_total = total(
        all.iter()
            .filter(|e| e.month_bucket() == Some(this_month.as_str())),
    );
    let all_time_total = total(all.iter());
    let page_total = total(page.iter().copied());
    let (filtered_total, category_breakdown) = category_breakdown(filtered);

    Summary {
        current_month_total,
        all_time_total,
        entry_count: all.len(),
        page_total,
        filtered_total,
        category_breakdown,
    }
}

/// Saturates at `Decimal::MAX` instead of overflowing.
fn total<'a>(entries: impl Iterator<Item = &'a Entry>) -> Decimal {
    entries.fold(Decimal::ZERO, |acc, e| acc.saturating_add(e.amount))
}

/// Per-category sums in first-seen order, plus the filtered total they add up to.
pub fn category_breakdown(filtered: &[&Entry]) -> (Decimal, Vec<CategorySlice>) {
    let mut order: Vec<&str> = Vec::new();
    let mut sums: HashMap<&str, Decimal> = HashMap::new();
    for e in filtered {
        let label = e.category_label();
        let slot = sums.entry(label).or_insert_with(|| {
            order.push(label);
            Decimal::ZERO
        });
        *slot = slot.saturating_add(e.amount);
    }

    let filtered_total = sums
        .values()
        .fold(Decimal::ZERO, |acc, v| acc.saturating_add(*v));
    let slices = order
        .into_iter()
        .map(|label| {
            let sum = sums[label];
            let share = sum.checked_div(filtered_total).unwrap_or(Decimal::ZERO);
            let hue = label_hue(label);
            CategorySlice {
                label: label.to_string(),
                total: sum,
                share,
                hue,
                color: hsl_css(hue),
            }
        })
        .collect();
    (filtered_total, slices)
}
