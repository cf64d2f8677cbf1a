//! Decimal amounts: parsing from user input and the storage encoding.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are `rust_decimal::Decimal` in memory and canonical decimal text on
//! disk, so a value read back is exactly the value written, scale included.

use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors produced while turning text into an amount.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    /// The input was empty or whitespace.
    #[error("amount is empty")]
    Empty,

    /// The input is not a decimal number.
    #[error("amount is not a number: {0:?}")]
    NotANumber(String),
}

/// Parses a user-supplied amount.
///
/// Surrounding whitespace and thousands separators (`1,250.50`) are accepted.
///
/// # Errors
///
/// Returns `AmountError` if the input is empty or not a decimal number.
pub fn parse_amount(input: &str) -> Result<Decimal, AmountError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AmountError::Empty);
    }
    let cleaned: String = trimmed.chars().filter(|c| *c != ',').collect();
    Decimal::from_str(&cleaned).map_err(|_| AmountError::NotANumber(input.to_string()))
}

/// Encodes an amount for a TEXT column.
#[must_use]
pub fn to_storage(amount: Decimal) -> String {
    amount.to_string()
}

/// Decodes an amount written by [`to_storage`].
///
/// An empty column reads as zero; rows created before an amount was set carry
/// no text.
///
/// # Errors
///
/// Returns `AmountError::NotANumber` if the column holds something else.
pub fn from_storage(raw: &str) -> Result<Decimal, AmountError> {
    if raw.trim().is_empty() {
        return Ok(Decimal::ZERO);
    }
    Decimal::from_str(raw.trim()).map_err(|_| AmountError::NotANumber(raw.to_string()))
}

#[cfg(test)]
#[path = "money_tests.rs"]
mod tests;
