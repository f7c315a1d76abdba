// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Entry;
use crate::utils::collate;
use std::collections::BTreeSet;

/// Distinct non-empty categories (case-sensitive), in display order.
pub fn categories(entries: &[Entry]) -> Vec<String> {
    let set: BTreeSet<&str> = entries.iter().filter_map(Entry::category_name).collect();
    let mut out: Vec<String> = set.into_iter().map(str::to_string).collect();
    out.sort_by(|a, b| collate(a, b));
    out
}
