//! Budget lines, allocation updates, and per-line spending.

pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use service::BudgetService;
pub use types::{
    Budget, BudgetItemView, BudgetLine, BudgetLineUpdate, BudgetReport, LineSpending,
    MonthlyAllocations, ValidatedUpdate, zero_allocations,
};
