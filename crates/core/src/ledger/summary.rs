//! Year-level grant summary for the dashboard.

use rust_decimal::Decimal;
use serde::Serialize;

use super::types::{Credit, Debit};
use crate::budget::BudgetLine;

/// Totals for one financial year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantSummary {
    /// Grant from settings.
    pub total_grant: Decimal,
    /// Sum of budget allocations.
    pub total_budgeted: Decimal,
    /// Sum of all credits.
    pub total_credited: Decimal,
    /// Sum of all debits.
    pub total_spent: Decimal,
    /// Credited minus spent.
    pub cash_balance: Decimal,
    /// Grant not yet allocated to any line.
    pub unallocated: Decimal,
    /// Credits per fiscal month, April first.
    pub monthly_credits: [Decimal; 12],
    /// Debits per fiscal month, April first.
    pub monthly_debits: [Decimal; 12],
}

impl GrantSummary {
    /// Builds the summary from a year's rows.
    #[must_use]
    pub fn compute(
        total_grant: Decimal,
        lines: &[BudgetLine],
        credits: &[Credit],
        debits: &[Debit],
    ) -> Self {
        let mut monthly_credits = [Decimal::ZERO; 12];
        let mut monthly_debits = [Decimal::ZERO; 12];

        for credit in credits {
            monthly_credits[credit.month.fiscal_index()] += credit.total();
        }
        for debit in debits {
            monthly_debits[debit.month.fiscal_index()] += debit.amount;
        }

        let total_budgeted: Decimal = lines.iter().map(|l| l.total_allocation).sum();
        let total_credited: Decimal = monthly_credits.iter().sum();
        let total_spent: Decimal = monthly_debits.iter().sum();

        Self {
            total_grant,
            total_budgeted,
            total_credited,
            total_spent,
            cash_balance: total_credited - total_spent,
            unallocated: total_grant - total_budgeted,
            monthly_credits,
            monthly_debits,
        }
    }
}
