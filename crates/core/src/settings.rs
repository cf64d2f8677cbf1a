//! Per-tenant school settings.
//!
//! Settings are optional: a tenant that never saved any still reads a full
//! record with the defaults below.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::LedgerError;

/// Default ministry shown on reports.
pub const DEFAULT_MINISTRY: &str = "Education";

/// School settings for one financial year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// School name printed on documents.
    pub school_name: String,
    /// Postal address.
    pub school_address: String,
    /// Ministry or department.
    pub ministry_department: String,
    /// Total grant for the year.
    pub total_grant: Decimal,
    /// Person who compiled the budget.
    pub compiled_by: String,
    /// Person who enters vouchers.
    pub entered_by: String,
    /// Authorizing officer.
    pub authorizing_officer: String,
    /// Authorizing officer's appointment.
    pub authorizing_appointment: String,
    /// Counter-signing officer.
    pub counter_sign: String,
    /// Counter-signing officer's appointment.
    pub counter_appointment: String,
    /// False when these are defaults rather than a stored row.
    #[serde(skip_deserializing)]
    pub is_persisted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            school_name: String::new(),
            school_address: String::new(),
            ministry_department: DEFAULT_MINISTRY.to_string(),
            total_grant: Decimal::ZERO,
            compiled_by: String::new(),
            entered_by: String::new(),
            authorizing_officer: String::new(),
            authorizing_appointment: String::new(),
            counter_sign: String::new(),
            counter_appointment: String::new(),
            is_persisted: false,
        }
    }
}

impl Settings {
    /// Checks values before they are saved.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::MalformedInput` if the grant is negative.
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.total_grant < Decimal::ZERO {
            return Err(LedgerError::MalformedInput(
                "total grant cannot be negative".into(),
            ));
        }
        Ok(())
    }
}
