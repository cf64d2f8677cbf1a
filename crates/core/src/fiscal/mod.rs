//! Financial year and fiscal month handling.

pub mod month;
pub mod year;

pub use month::{Month, MonthParseError};
pub use year::{FinancialYear, FinancialYearError};
