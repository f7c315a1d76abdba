// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::sync::Once;

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("static date pattern"));
static MONTH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}$").expect("static month pattern"));

static TRACING_INIT: Once = Once::new();

/// Installs the stderr `fmt` subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("spendbook=warn"));
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

/// Strict `YYYY-MM-DD`: zero padded, four digit year, real calendar day.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    if !DATE_RE.is_match(s) {
        anyhow::bail!("Invalid date '{}', expected YYYY-MM-DD", s);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn is_month_key(s: &str) -> bool {
    MONTH_RE.is_match(s)
}

pub fn parse_month(s: &str) -> Result<String> {
    if !is_month_key(s) {
        anyhow::bail!("Invalid month '{}', expected YYYY-MM", s);
    }
    NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    Ok(s.to_string())
}

/// Plain (`24.50`) or exponent (`1e3`, `2.5E2`) notation.
pub fn parse_decimal(s: &str) -> Result<Decimal> {
    let t = s.trim();
    t.parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(t))
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Case-insensitive comparison; strings differing only by case compare equal.
pub fn fold_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Display ordering for labels: case-insensitive first, lowercase ahead of uppercase on ties.
pub fn collate(a: &str, b: &str) -> Ordering {
    fold_cmp(a, b).then_with(|| b.cmp(a))
}

/// Stable hue in `0..360` for a label. Same 31-multiplier hash over UTF-16
/// units with 32-bit wrap that browsers' `hashCode` idiom produces, so colors
/// match those already shown for existing data.
pub fn label_hue(label: &str) -> u16 {
    let mut h: i32 = 0;
    for unit in label.encode_utf16() {
        h = h.wrapping_shl(5).wrapping_sub(h).wrapping_add(i32::from(unit));
    }
    (i64::from(h).abs() % 360) as u16
}

pub fn hsl_css(hue: u16) -> String {
    format!("hsl({} 70% 45%)", hue)
}

fn currency_symbol(ccy: &str, locale: &str) -> String {
    match (ccy, locale) {
        ("GBP", _) => "£".into(),
        ("EUR", _) => "€".into(),
        ("USD", "en-US") => "$".into(),
        ("USD", _) => "US$".into(),
        ("NGN", "en-NG") => "₦".into(),
        (other, _) => format!("{} ", other),
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Display-only money formatting. Amounts stay raw `Decimal` everywhere else.
pub fn fmt_money(amount: Decimal, ccy: &str, locale: &str) -> String {
    let rounded = amount.abs().round_dp(2);
    let text = format!("{:.2}", rounded);
    let (int_part, frac) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let sign = if amount.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!(
        "{}{}{}.{}",
        sign,
        currency_symbol(ccy, locale),
        group_thousands(int_part),
        frac
    )
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
