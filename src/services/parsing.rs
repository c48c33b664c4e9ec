//! Cell-level token parsing shared by the source adapters.

use std::str::FromStr;

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;

use crate::error::ValueParseError;
use crate::models::quote::{Price, QUOTE_DATE_FORMAT};

lazy_static! {
    /// Leading number with an optional `.` or `,` fraction of up to 4 digits.
    static ref PRICE_PATTERN: Regex =
        Regex::new(r"^(\d+(?:[.,]\d{1,4})?)").expect("Invalid regex pattern");

    /// Leading `DD.MM.YYYY` date.
    static ref DATE_PATTERN: Regex =
        Regex::new(r"^(\d{2}\.\d{2}\.\d{4})").expect("Invalid regex pattern");
}

/// Normalize a price cell to a plain `1234.56` token.
///
/// Whitespace (including thousands-separator spaces) is removed and a decimal
/// comma becomes a dot. Trailing text after the number is ignored.
pub fn normalize_price_token(text: &str) -> Result<String, ValueParseError> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    PRICE_PATTERN
        .captures(&compact)
        .map(|caps| caps[1].replace(',', "."))
        .ok_or_else(|| ValueParseError::Price(text.trim().to_string()))
}

/// Parse a price cell into a decimal.
pub fn parse_price_strict(text: &str) -> Result<Decimal, ValueParseError> {
    let token = normalize_price_token(text)?;
    Decimal::from_str(&token).map_err(|_| ValueParseError::Price(text.trim().to_string()))
}

/// Parse a price cell, falling back to the "unavailable" sentinel.
pub fn parse_price(text: &str) -> Price {
    parse_price_strict(text)
        .map(Price::Available)
        .unwrap_or(Price::Unavailable)
}

/// Parse a `DD.MM.YYYY` date cell.
pub fn parse_date(text: &str) -> Result<NaiveDate, ValueParseError> {
    let trimmed = text.trim();
    let caps = DATE_PATTERN
        .captures(trimmed)
        .ok_or_else(|| ValueParseError::Date(trimmed.to_string()))?;
    NaiveDate::parse_from_str(&caps[1], QUOTE_DATE_FORMAT)
        .map_err(|_| ValueParseError::Date(trimmed.to_string()))
}
