//! Budget service: seeding, allocation validation, and spending.

use std::collections::{BTreeSet, HashMap};

use rust_decimal::Decimal;

use super::types::{
    Budget, BudgetItemView, BudgetLine, BudgetLineUpdate, BudgetReport, LineSpending,
    ValidatedUpdate, zero_allocations,
};
use crate::ledger::{Debit, LedgerError};
use crate::template::{self, TEMPLATE};

/// Budget service for business logic.
pub struct BudgetService;

impl BudgetService {
    /// The 42 zero-allocation lines a new budget starts with.
    #[must_use]
    pub fn seed_lines() -> Vec<BudgetLine> {
        TEMPLATE.iter().map(BudgetLine::seeded).collect()
    }

    /// Validates a batch of allocation updates.
    ///
    /// The whole batch is checked before anything is written, so one bad
    /// update rejects all of them. Months missing from an update are filled
    /// in as zero.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::MalformedInput` if an update has no slot, names a
    /// slot outside the template, repeats a slot, or carries a negative amount.
    pub fn validate_updates(
        updates: &[BudgetLineUpdate],
    ) -> Result<Vec<ValidatedUpdate>, LedgerError> {
        let mut seen = BTreeSet::new();
        let mut validated = Vec::with_capacity(updates.len());

        for (index, update) in updates.iter().enumerate() {
            let slot = update.slot.ok_or_else(|| {
                LedgerError::MalformedInput(format!("update {index} has no template slot"))
            })?;
            let template = template::by_slot(slot).ok_or_else(|| {
                LedgerError::MalformedInput(format!("template slot {slot} does not exist"))
            })?;
            if !seen.insert(slot) {
                return Err(LedgerError::MalformedInput(format!(
                    "template slot {slot} appears more than once"
                )));
            }
            if update.total_allocation < Decimal::ZERO {
                return Err(LedgerError::MalformedInput(format!(
                    "allocation for slot {slot} cannot be negative"
                )));
            }
            if let Some((month, _)) = update
                .monthly_allocations
                .iter()
                .find(|(_, amount)| **amount < Decimal::ZERO)
            {
                return Err(LedgerError::MalformedInput(format!(
                    "{month} allocation for slot {slot} cannot be negative"
                )));
            }

            let mut monthly_allocations = zero_allocations();
            monthly_allocations.extend(update.monthly_allocations.iter().map(|(m, a)| (*m, *a)));

            validated.push(ValidatedUpdate {
                template,
                total_allocation: update.total_allocation,
                monthly_allocations,
            });
        }

        Ok(validated)
    }

    /// Allocation, spending, and remaining balance for each line.
    #[must_use]
    pub fn compute_spending(lines: &[BudgetLine], debits: &[Debit]) -> Vec<LineSpending> {
        let spent = spent_by_item(debits);
        lines
            .iter()
            .map(|line| {
                let spent = spent.get(line.item_key.as_str()).copied().unwrap_or_default();
                LineSpending {
                    slot: line.slot,
                    item_id: line.item_key.clone(),
                    allocated: line.total_allocation,
                    spent,
                    balance: line.total_allocation - spent,
                }
            })
            .collect()
    }

    /// Joins a budget with its debits for display.
    #[must_use]
    pub fn report(budget: Budget, debits: &[Debit]) -> BudgetReport {
        let spent = spent_by_item(debits);
        let items = budget
            .lines
            .into_iter()
            .map(|line| {
                let spent = spent.get(line.item_key.as_str()).copied().unwrap_or_default();
                BudgetItemView {
                    balance: line.total_allocation - spent,
                    spent,
                    line,
                }
            })
            .collect();

        BudgetReport {
            financial_year: budget.financial_year,
            school_name: budget.school_name,
            total_grant: budget.total_grant,
            items,
        }
    }
}

fn spent_by_item(debits: &[Debit]) -> HashMap<&str, Decimal> {
    let mut spent: HashMap<&str, Decimal> = HashMap::new();
    for debit in debits {
        *spent.entry(debit.item_id.as_str()).or_default() += debit.amount;
    }
    spent
}
