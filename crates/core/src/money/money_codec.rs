//! Currency codec for the single supported locale (pt-BR, BRL).
//!
//! Accepted representations:
//! - a numeric amount (`1234.56`)
//! - a bare digit string, always read as integer cents (`"123456"` -> `1234.56`)
//! - a partially typed decimal string using `,` or `.` as fraction separator
//! - an already formatted currency string (`"R$ 1.234,56"`)
//!
//! All amounts are rounded to cents so that `to_amount(to_display(to_amount(x)))`
//! always equals `to_amount(x)`.

use std::str::FromStr;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::{CURRENCY_PREFIX, DISPLAY_DECIMAL_PRECISION};

/// Separator between the currency symbol and the digits, as emitted by pt-BR
/// locale formatting.
const SYMBOL_SEPARATOR: char = '\u{a0}';

/// Raw money value coming from a form field or from storage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoneyInput<'a> {
    Amount(f64),
    Text(&'a str),
    Empty,
}

impl From<f64> for MoneyInput<'_> {
    fn from(value: f64) -> Self {
        MoneyInput::Amount(value)
    }
}

impl From<Option<f64>> for MoneyInput<'_> {
    fn from(value: Option<f64>) -> Self {
        value.map_or(MoneyInput::Empty, MoneyInput::Amount)
    }
}

impl<'a> From<&'a str> for MoneyInput<'a> {
    fn from(value: &'a str) -> Self {
        MoneyInput::Text(value)
    }
}

impl<'a> From<&'a String> for MoneyInput<'a> {
    fn from(value: &'a String) -> Self {
        MoneyInput::Text(value.as_str())
    }
}

/// Formats a raw value as a currency string with exactly two fractional digits.
///
/// Empty, zero and unparseable input yield an empty string. Strings that are
/// already formatted are returned unchanged.
pub fn to_display<'a>(raw: impl Into<MoneyInput<'a>>) -> String {
    let raw = raw.into();
    if let MoneyInput::Text(text) = raw {
        if is_formatted(text) {
            return text.to_string();
        }
    }

    match parse(raw) {
        Some(amount) if !amount.is_zero() => format_decimal(amount),
        _ => String::new(),
    }
}

/// Converts a raw value to a numeric amount. Non-numeric or empty input yields `0.0`.
pub fn to_amount<'a>(raw: impl Into<MoneyInput<'a>>) -> f64 {
    parse(raw.into())
        .and_then(|amount| amount.to_f64())
        .unwrap_or(0.0)
}

/// Formats an amount unconditionally, zero included (`"R$ 0,00"`).
pub fn format_amount(amount: f64) -> String {
    Decimal::from_f64(amount)
        .map(format_decimal)
        .unwrap_or_default()
}

fn is_formatted(text: &str) -> bool {
    let trimmed = text.trim_start();
    let unsigned = trimmed.strip_prefix('-').unwrap_or(trimmed);
    unsigned.starts_with(CURRENCY_PREFIX)
}

fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(
        DISPLAY_DECIMAL_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    )
}

fn parse(raw: MoneyInput<'_>) -> Option<Decimal> {
    let amount = match raw {
        MoneyInput::Empty => None,
        MoneyInput::Amount(value) => Decimal::from_f64(value),
        MoneyInput::Text(text) => parse_text(text),
    }?;
    Some(round_to_cents(amount))
}

fn parse_text(text: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, trimmed),
    };
    let (formatted, body) = match unsigned.strip_prefix(CURRENCY_PREFIX) {
        Some(rest) => (true, rest),
        None => (false, unsigned),
    };

    let cleaned: String = body
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();
    if !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    let magnitude = if !formatted && cleaned.chars().all(|c| c.is_ascii_digit()) {
        // Raw keystrokes: the digits are cents.
        Decimal::from_str(&cleaned).ok()? / Decimal::ONE_HUNDRED
    } else {
        let separator = if formatted {
            Some(',')
        } else {
            fraction_separator(&cleaned)
        };
        Decimal::from_str(&normalize(&cleaned, separator)).ok()?
    };

    Some(if negative { -magnitude } else { magnitude })
}

/// Picks the fraction separator of an unformatted decimal string.
///
/// When both separators appear the last one is the fraction separator. A
/// separator that repeats is a thousands separator.
fn fraction_separator(cleaned: &str) -> Option<char> {
    let last_comma = cleaned.rfind(',');
    let last_dot = cleaned.rfind('.');
    match (last_comma, last_dot) {
        (Some(comma), Some(dot)) => Some(if comma > dot { ',' } else { '.' }),
        (Some(_), None) if cleaned.matches(',').count() == 1 => Some(','),
        (None, Some(_)) if cleaned.matches('.').count() == 1 => Some('.'),
        _ => None,
    }
}

fn normalize(cleaned: &str, separator: Option<char>) -> String {
    let normalized: String = cleaned
        .chars()
        .filter_map(|c| match c {
            c if c.is_ascii_digit() => Some(c),
            c if Some(c) == separator => Some('.'),
            _ => None,
        })
        .collect();
    let trimmed = normalized.trim_end_matches('.');
    if trimmed.starts_with('.') {
        format!("0{}", trimmed)
    } else {
        trimmed.to_string()
    }
}

fn format_decimal(amount: Decimal) -> String {
    let rounded = round_to_cents(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let text = format!("{:.2}", rounded.abs());
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    format!(
        "{}{}{}{},{}",
        sign,
        CURRENCY_PREFIX,
        SYMBOL_SEPARATOR,
        group_thousands(whole),
        fraction
    )
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }
    grouped
}
