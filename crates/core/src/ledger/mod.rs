//! Grant ledger logic.
//!
//! This module implements the money side of a school grant:
//! - Credits (grant receipts split across budget items)
//! - Debits (payments charged to one budget item)
//! - Available funds per item
//! - The year-level grant summary
//! - Error types shared by every ledger operation

pub mod balance;
pub mod error;
pub mod summary;
pub mod types;
pub mod validation;


pub use balance::{AvailableFunds, FundsPosition};
pub use error::{AccessDenied, LedgerError};
pub use summary::GrantSummary;
pub use types::{Credit, CreditLineItem, Debit, NewCredit, NewDebit};
pub use validation::{validate_credit, validate_debit};
