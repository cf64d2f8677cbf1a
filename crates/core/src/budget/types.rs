//! Budget domain types.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::fiscal::{FinancialYear, Month};
use crate::template::TemplateSlot;

/// Planned spend per month. Keys sort April first.
pub type MonthlyAllocations = BTreeMap<Month, Decimal>;

/// All twelve months at zero.
#[must_use]
pub fn zero_allocations() -> MonthlyAllocations {
    Month::ALL.into_iter().map(|m| (m, Decimal::ZERO)).collect()
}

/// One of the 42 lines of a tenant's budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetLine {
    /// Template slot.
    pub slot: u16,
    /// Item key, e.g. `pow1_row1`.
    #[serde(rename = "id")]
    pub item_key: String,
    /// Program of work number.
    #[serde(rename = "powNo")]
    pub program_no: u16,
    /// Program of work name.
    #[serde(rename = "powName")]
    pub program_name: String,
    /// Sub-activity.
    pub sub_activity: String,
    /// Sub-item description.
    #[serde(rename = "subItemDescription")]
    pub description: String,
    /// Vote code.
    pub code: String,
    /// Total allocated for the year.
    pub total_allocation: Decimal,
    /// Allocation split by month.
    pub monthly_allocations: MonthlyAllocations,
}

impl BudgetLine {
    /// A zero-allocation line copied from its template slot.
    #[must_use]
    pub fn seeded(template: &TemplateSlot) -> Self {
        Self {
            slot: template.slot,
            item_key: template.item_key(),
            program_no: template.program_no,
            program_name: template.program_name.to_string(),
            sub_activity: template.sub_activity.to_string(),
            description: template.description.to_string(),
            code: template.code.to_string(),
            total_allocation: Decimal::ZERO,
            monthly_allocations: zero_allocations(),
        }
    }
}

/// A tenant's budget for one financial year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    /// Financial year.
    pub financial_year: FinancialYear,
    /// School name from settings.
    pub school_name: String,
    /// Grant from settings.
    pub total_grant: Decimal,
    /// Lines in slot order. Empty until the budget has been seeded.
    pub lines: Vec<BudgetLine>,
}

impl Budget {
    /// True once the 42 lines exist.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        !self.lines.is_empty()
    }

    /// Sum of every line's allocation.
    #[must_use]
    pub fn total_allocated(&self) -> Decimal {
        self.lines.iter().map(|l| l.total_allocation).sum()
    }
}

/// An allocation change submitted for one line.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetLineUpdate {
    /// Target slot. Updates without one are rejected.
    pub slot: Option<u16>,
    /// New yearly total.
    pub total_allocation: Decimal,
    /// New monthly split. Missing months are stored as zero.
    #[serde(default)]
    pub monthly_allocations: MonthlyAllocations,
}

/// An update that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUpdate {
    /// The slot it targets.
    pub template: &'static TemplateSlot,
    /// New yearly total.
    pub total_allocation: Decimal,
    /// All twelve months.
    pub monthly_allocations: MonthlyAllocations,
}

/// Allocation against spending for one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineSpending {
    /// Template slot.
    pub slot: u16,
    /// Item key.
    pub item_id: String,
    /// Allocated for the year.
    pub allocated: Decimal,
    /// Sum of debits against the item.
    pub spent: Decimal,
    /// Allocated minus spent.
    pub balance: Decimal,
}

/// A budget line with its spending, as shown on the budget screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetItemView {
    /// The line.
    #[serde(flatten)]
    pub line: BudgetLine,
    /// Sum of debits against the line.
    pub spent: Decimal,
    /// Allocation minus spent.
    pub balance: Decimal,
}

/// The budget screen: header fields and every line with spending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetReport {
    /// Financial year.
    pub financial_year: FinancialYear,
    /// School name.
    pub school_name: String,
    /// Grant from settings.
    pub total_grant: Decimal,
    /// Lines in slot order.
    pub items: Vec<BudgetItemView>,
}
