//! Available funds per budget item.
//!
//! Credited money is the ceiling for spending: an item's balance is what
//! has been credited to it minus what has been paid out of it. The budgeted
//! allocation is reported alongside but never limits a payment.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use super::error::LedgerError;
use super::types::{Credit, Debit};
use crate::budget::BudgetLine;

/// Funds position of one budget item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundsPosition {
    /// Allocated in the budget.
    pub budgeted: Decimal,
    /// Sum of credit line items for the item.
    pub credited: Decimal,
    /// Sum of debits against the item.
    pub spent: Decimal,
    /// Credited minus spent.
    pub balance: Decimal,
}

/// Funds position of every item in a financial year, keyed by item key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AvailableFunds {
    by_item: BTreeMap<String, FundsPosition>,
}

impl AvailableFunds {
    /// Aggregates budget lines, credits, and debits into per-item positions.
    ///
    /// Items that were credited or spent without a budget line still appear,
    /// with nothing budgeted.
    #[must_use]
    pub fn compute(lines: &[BudgetLine], credits: &[Credit], debits: &[Debit]) -> Self {
        let mut by_item: BTreeMap<String, FundsPosition> = lines
            .iter()
            .map(|line| {
                let position = FundsPosition {
                    budgeted: line.total_allocation,
                    ..FundsPosition::default()
                };
                (line.item_key.clone(), position)
            })
            .collect();

        for line in credits.iter().flat_map(|c| &c.line_items) {
            by_item.entry(line.item_id.clone()).or_default().credited += line.amount;
        }
        for debit in debits {
            by_item.entry(debit.item_id.clone()).or_default().spent += debit.amount;
        }
        for position in by_item.values_mut() {
            position.balance = position.credited - position.spent;
        }

        Self { by_item }
    }

    /// Position of one item.
    #[must_use]
    pub fn get(&self, item_id: &str) -> Option<&FundsPosition> {
        self.by_item.get(item_id)
    }

    /// Credited minus spent for an item, zero if it has no activity.
    #[must_use]
    pub fn balance(&self, item_id: &str) -> Decimal {
        self.get(item_id).map_or(Decimal::ZERO, |p| p.balance)
    }

    /// Checks that `amount` can be paid out of `item_id`.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InsufficientFunds` when the amount exceeds the
    /// item's credited balance.
    pub fn ensure_can_spend(&self, item_id: &str, amount: Decimal) -> Result<(), LedgerError> {
        let available = self.balance(item_id);
        if amount > available {
            return Err(LedgerError::InsufficientFunds {
                item_id: item_id.to_string(),
                available,
                requested: amount,
            });
        }
        Ok(())
    }

    /// Iterates positions in item-key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FundsPosition)> {
        self.by_item.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of items with a position.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_item.len()
    }

    /// True when there is no budget and no activity.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_item.is_empty()
    }
}
