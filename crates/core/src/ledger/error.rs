//! Ledger error types.
//!
//! Every operation that touches tenant data reports failure through
//! `LedgerError`. Storage drivers classify their own errors into these
//! variants so callers never match on database-specific codes.

use rust_decimal::Decimal;
use thiserror::Error;

use grantbook_shared::{AppError, ErrorKind};
use grantbook_shared::types::AmountError;

use crate::fiscal::{FinancialYearError, MonthParseError};

/// Why a tenant was refused access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessDenied {
    /// An operator locked the account.
    #[error("Account is locked. Contact the administrator.")]
    Locked,

    /// The account has been deactivated.
    #[error("Account is inactive. Contact the administrator.")]
    Inactive,

    /// The free trial ran out.
    #[error("Your trial period has expired. Please contact the administrator to subscribe.")]
    TrialExpired,

    /// A paid subscription ran out.
    #[error("Your subscription has expired. Please contact the administrator to renew.")]
    SubscriptionExpired,
}

/// Errors that can occur during ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    // ========== Scoping ==========
    /// No tenant was resolved for the request.
    #[error("No tenant is associated with this request")]
    NotAuthorized,

    /// The tenant may not use the ledger right now.
    #[error("{0}")]
    AccessDenied(AccessDenied),

    // ========== Lookup ==========
    /// The referenced row does not exist within the caller's scope.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of row.
        entity: &'static str,
        /// Identifier as supplied.
        id: String,
    },

    // ========== Input ==========
    /// Input failed validation before any write.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// A debit would spend more than has been credited to its item.
    #[error("Insufficient funds on {item_id}: available {available}, requested {requested}")]
    InsufficientFunds {
        /// Budget item key.
        item_id: String,
        /// Credited minus spent before this debit.
        available: Decimal,
        /// Amount of the rejected debit.
        requested: Decimal,
    },

    // ========== Storage ==========
    /// A uniqueness or foreign key rule rejected the write.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// The store was busy for longer than the configured timeout.
    #[error("Store is busy, try again: {0}")]
    Contention(String),

    /// Any other storage failure.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl LedgerError {
    /// Shorthand for a missing row.
    #[must_use]
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Returns true when the same request may succeed if retried.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Contention(_))
    }
}

impl From<AccessDenied> for LedgerError {
    fn from(reason: AccessDenied) -> Self {
        Self::AccessDenied(reason)
    }
}

impl From<FinancialYearError> for LedgerError {
    fn from(err: FinancialYearError) -> Self {
        Self::MalformedInput(err.to_string())
    }
}

impl From<MonthParseError> for LedgerError {
    fn from(err: MonthParseError) -> Self {
        Self::MalformedInput(err.to_string())
    }
}

impl From<AmountError> for LedgerError {
    fn from(err: AmountError) -> Self {
        Self::MalformedInput(err.to_string())
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        let kind = match &err {
            LedgerError::NotAuthorized => ErrorKind::NoTenant,
            LedgerError::AccessDenied(_) => ErrorKind::AccessDenied,
            LedgerError::NotFound { .. } => ErrorKind::NotFound,
            LedgerError::MalformedInput(_) => ErrorKind::Rejected,
            LedgerError::InsufficientFunds { .. } | LedgerError::ConstraintViolation(_) => {
                ErrorKind::Conflict
            }
            LedgerError::Contention(_) => ErrorKind::Busy,
            LedgerError::Storage(_) => ErrorKind::Storage,
        };
        Self::new(kind, err.to_string())
    }
}
