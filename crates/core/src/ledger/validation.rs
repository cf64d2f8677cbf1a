//! Validation for credits and debits.
//!
//! Runs before any write, so a rejected request leaves storage untouched.

use rust_decimal::Decimal;

use super::error::LedgerError;
use super::types::{NewCredit, NewDebit};
use crate::template::{self, TemplateSlot};

/// Validates a credit.
///
/// # Errors
///
/// Returns `LedgerError::MalformedInput` if there are no line items, a line
/// item names an unknown budget item, or an amount is not positive.
pub fn validate_credit(credit: &NewCredit) -> Result<(), LedgerError> {
    if credit.line_items.is_empty() {
        return Err(LedgerError::MalformedInput(
            "a credit needs at least one line item".into(),
        ));
    }
    for line in &credit.line_items {
        known_item(&line.item_id)?;
        positive(line.amount, &line.item_id)?;
    }
    Ok(())
}

/// Validates a debit and returns the template slot it is charged to.
///
/// # Errors
///
/// Returns `LedgerError::MalformedInput` if the item is unknown, the amount
/// is not positive, or the description is blank.
pub fn validate_debit(debit: &NewDebit) -> Result<&'static TemplateSlot, LedgerError> {
    let slot = known_item(&debit.item_id)?;
    positive(debit.amount, &debit.item_id)?;
    if debit.description.trim().is_empty() {
        return Err(LedgerError::MalformedInput(
            "a debit needs a description".into(),
        ));
    }
    Ok(slot)
}

fn known_item(item_id: &str) -> Result<&'static TemplateSlot, LedgerError> {
    template::by_item_key(item_id)
        .ok_or_else(|| LedgerError::MalformedInput(format!("unknown budget item: {item_id}")))
}

fn positive(amount: Decimal, item_id: &str) -> Result<(), LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::MalformedInput(format!(
            "amount for {item_id} must be greater than zero"
        )));
    }
    Ok(())
}
