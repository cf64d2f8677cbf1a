//! Ledger domain types: credits (grant receipts) and debits (payments).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use grantbook_shared::types::{CreditId, DebitId};

use crate::fiscal::Month;

/// A share of a credit assigned to one budget item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditLineItem {
    /// Budget item key, e.g. `pow1_row1`.
    pub item_id: String,
    /// Amount credited to the item.
    pub amount: Decimal,
}

/// Input for recording grant money received.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCredit {
    /// Date the money arrived.
    pub date_received: NaiveDate,
    /// Fiscal month it is booked in.
    pub month: Month,
    /// Split across budget items.
    pub line_items: Vec<CreditLineItem>,
    /// Free text.
    #[serde(default)]
    pub remarks: String,
}

/// A stored credit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Credit {
    /// External id, `credit_<n>`.
    pub id: CreditId,
    /// Date the money arrived.
    pub date_received: NaiveDate,
    /// Fiscal month it is booked in.
    pub month: Month,
    /// Split across budget items.
    pub line_items: Vec<CreditLineItem>,
    /// Free text.
    pub remarks: String,
}

impl Credit {
    /// Sum of all line items.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.line_items.iter().map(|l| l.amount).sum()
    }
}

/// Input for recording a payment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDebit {
    /// Date paid.
    pub date_paid: NaiveDate,
    /// Fiscal month it is booked in.
    pub month: Month,
    /// Budget item key the payment is charged to.
    pub item_id: String,
    /// What was bought.
    pub description: String,
    /// Amount paid.
    pub amount: Decimal,
    /// Payee.
    #[serde(default)]
    pub supplier_name: String,
    /// Payee's position or role.
    #[serde(default)]
    pub position: String,
}

/// A stored payment.
///
/// Document numbers start empty and are assigned on first request, one
/// number sequence per document type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Debit {
    /// External id, `debit_<n>`.
    pub id: DebitId,
    /// Payment voucher number.
    pub document_number: Option<String>,
    /// Loose minute number.
    pub loose_minute_number: Option<String>,
    /// Receipt number.
    pub receipt_number: Option<String>,
    /// Date paid.
    pub date_paid: NaiveDate,
    /// Fiscal month it is booked in.
    pub month: Month,
    /// Budget item key.
    pub item_id: String,
    /// Sub-item description copied from the template.
    pub sub_item_description: String,
    /// Vote code copied from the template.
    pub code: String,
    /// What was bought.
    pub description: String,
    /// Amount paid.
    pub amount: Decimal,
    /// Payee.
    pub supplier_name: String,
    /// Payee's position or role.
    pub position: String,
}
