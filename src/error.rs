// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

pub type LedgerResult<T> = std::result::Result<T, LedgerError>;

/// Rejections raised on the create/edit path. No mutation happens when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title must not be empty")]
    EmptyTitle,
    #[error("Invalid amount '{0}'")]
    InvalidAmount(String),
    #[error("Amount must be greater than zero")]
    NonPositiveAmount,
    #[error("Amount must not exceed 1,000,000,000,000")]
    AmountTooLarge,
    #[error("Date is required")]
    MissingDate,
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Import rejected: {0}")]
    Format(String),
    #[error("Recurring group '{key}' has malformed date '{date}'")]
    Materialize { key: String, date: String },
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
