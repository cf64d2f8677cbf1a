//! Row to domain conversions.
//!
//! A row that cannot be read back (bad decimal text, unknown month) is
//! reported as `LedgerError::Storage`; it can only come from outside writes.

use std::str::FromStr;

use rust_decimal::Decimal;

use grantbook_core::budget::{BudgetLine, MonthlyAllocations, zero_allocations};
use grantbook_core::fiscal::Month;
use grantbook_core::ledger::{Credit, CreditLineItem, Debit, LedgerError};
use grantbook_core::settings::Settings;
use grantbook_core::tenant::{MessageKind, SubscriptionMessage, SubscriptionStatus, Tenant};
use grantbook_shared::types::{CreditId, DebitId, MessageId, TenantId, from_storage};

use crate::entities::{budget_lines, credits, debits, settings, subscription_messages, tenants};

pub(crate) fn decimal(raw: &str, column: &str) -> Result<Decimal, LedgerError> {
    from_storage(raw).map_err(|e| LedgerError::Storage(format!("{column}: {e}")))
}

pub(crate) fn month(raw: &str) -> Result<Month, LedgerError> {
    Month::from_str(raw).map_err(|e| LedgerError::Storage(e.to_string()))
}

pub(crate) fn allocations_to_json(allocations: &MonthlyAllocations) -> Result<String, LedgerError> {
    serde_json::to_string(allocations).map_err(|e| LedgerError::Storage(e.to_string()))
}

pub(crate) fn line_items_to_json(items: &[CreditLineItem]) -> Result<String, LedgerError> {
    serde_json::to_string(items).map_err(|e| LedgerError::Storage(e.to_string()))
}

impl budget_lines::Model {
    pub(crate) fn into_line(self) -> Result<BudgetLine, LedgerError> {
        let stored: MonthlyAllocations = serde_json::from_str(&self.monthly_allocations)
            .map_err(|e| LedgerError::Storage(format!("monthly_allocations: {e}")))?;
        let mut monthly_allocations = zero_allocations();
        monthly_allocations.extend(stored);

        Ok(BudgetLine {
            slot: u16::try_from(self.template_slot)
                .map_err(|e| LedgerError::Storage(format!("template_slot: {e}")))?,
            item_key: self.item_key,
            program_no: u16::try_from(self.program_no)
                .map_err(|e| LedgerError::Storage(format!("program_no: {e}")))?,
            program_name: self.program_name,
            sub_activity: self.sub_activity,
            description: self.description,
            code: self.code,
            total_allocation: decimal(&self.total_allocation, "total_allocation")?,
            monthly_allocations,
        })
    }
}

impl credits::Model {
    pub(crate) fn into_credit(self) -> Result<Credit, LedgerError> {
        let line_items: Vec<CreditLineItem> = serde_json::from_str(&self.line_items)
            .map_err(|e| LedgerError::Storage(format!("line_items: {e}")))?;
        Ok(Credit {
            id: CreditId::new(self.id),
            date_received: self.date_received,
            month: month(&self.month)?,
            line_items,
            remarks: self.remarks,
        })
    }
}

impl debits::Model {
    pub(crate) fn into_debit(self) -> Result<Debit, LedgerError> {
        Ok(Debit {
            id: DebitId::new(self.id),
            document_number: self.document_number,
            loose_minute_number: self.loose_minute_number,
            receipt_number: self.receipt_number,
            date_paid: self.date_paid,
            month: month(&self.month)?,
            amount: decimal(&self.amount, "amount")?,
            item_id: self.item_id,
            sub_item_description: self.sub_item_description,
            code: self.code,
            description: self.description,
            supplier_name: self.supplier_name,
            position: self.position,
        })
    }
}

impl settings::Model {
    pub(crate) fn into_settings(self) -> Result<Settings, LedgerError> {
        Ok(Settings {
            total_grant: decimal(&self.total_grant, "total_grant")?,
            school_name: self.school_name,
            school_address: self.school_address,
            ministry_department: self.ministry_department,
            compiled_by: self.compiled_by,
            entered_by: self.entered_by,
            authorizing_officer: self.authorizing_officer,
            authorizing_appointment: self.authorizing_appointment,
            counter_sign: self.counter_sign,
            counter_appointment: self.counter_appointment,
            is_persisted: true,
        })
    }
}

impl tenants::Model {
    pub(crate) fn into_tenant(self) -> Result<Tenant, LedgerError> {
        Ok(Tenant {
            id: TenantId::new(self.id),
            subscription_status: SubscriptionStatus::from_str(&self.subscription_status)
                .map_err(LedgerError::Storage)?,
            school_name: self.school_name,
            username: self.username,
            is_active: self.is_active,
            is_locked: self.is_locked,
            subscription_start: self.subscription_start,
            subscription_end: self.subscription_end,
            last_access_at: self.last_access_at,
            created_at: self.created_at,
        })
    }
}

impl subscription_messages::Model {
    pub(crate) fn into_message(self) -> Result<SubscriptionMessage, LedgerError> {
        Ok(SubscriptionMessage {
            id: MessageId::new(self.id),
            tenant_id: TenantId::new(self.tenant_id),
            kind: MessageKind::from_str(&self.message_type).map_err(LedgerError::Storage)?,
            message: self.message,
            is_read: self.is_read,
            sent_at: self.sent_at,
        })
    }
}
