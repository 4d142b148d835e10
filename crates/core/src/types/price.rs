//! Price parsing.
//!
//! Prices travel as plain JSON numbers in the shop's single currency. Text
//! input from forms and loosely typed backend payloads both funnel through
//! [`parse_price`], so the non-negative, finite invariant holds everywhere a
//! price enters the system.

use serde_json::Value;

/// Errors that can occur when parsing a price.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input string is empty.
    #[error("price cannot be empty")]
    Empty,
    /// The input is not a number.
    #[error("price must be a number")]
    NotANumber,
    /// The input parsed to infinity or NaN.
    #[error("price must be finite")]
    NotFinite,
    /// The input is below zero.
    #[error("price cannot be negative")]
    Negative,
}

/// Parse a price from user or wire text.
///
/// Surrounding whitespace is ignored.
///
/// # Errors
///
/// Returns an error if the input is empty, not a number, not finite, or
/// negative.
///
/// # Examples
///
/// ```
/// use product_dashboard_core::parse_price;
///
/// assert_eq!(parse_price(" 19.99 "), Ok(19.99));
/// assert!(parse_price("abc").is_err());
/// assert!(parse_price("-1").is_err());
/// ```
pub fn parse_price(input: &str) -> Result<f64, PriceError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(PriceError::Empty);
    }

    let value: f64 = trimmed.parse().map_err(|_| PriceError::NotANumber)?;
    check(value)
}

/// Read a price out of an arbitrary JSON value.
///
/// Accepts numbers and numeric strings; everything else (including invalid
/// numbers) yields `None`.
#[must_use]
pub fn price_from_json(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().and_then(|v| check(v).ok()),
        Value::String(s) => parse_price(s).ok(),
        _ => None,
    }
}

fn check(value: f64) -> Result<f64, PriceError> {
    if !value.is_finite() {
        return Err(PriceError::NotFinite);
    }
    if value < 0.0 {
        return Err(PriceError::Negative);
    }
    Ok(value)
}
