//! Document sequencer: gapless voucher, loose minute, and receipt numbers.
//!
//! Assignment runs in one transaction whose first statement writes the
//! tenant's `document_sequences` row. In WAL mode that takes the database
//! write lock before anything is read, so concurrent assignments queue on
//! the busy timeout instead of reading the same maximum. The next number is
//! recomputed from the debits themselves every time, which keeps the
//! sequence dense after the newest numbered debit is deleted.

use chrono::Utc;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, QuerySelect, Set, TransactionTrait,
};
use tracing::info;

use grantbook_core::ledger::LedgerError;
use grantbook_core::sequence::{self, DocumentType};
use grantbook_core::tenant::TenantContext;
use grantbook_shared::types::DebitId;

use super::ledger::find_debit;
use crate::entities::{debits, document_sequences};
use crate::error::classify;

/// Assigns document numbers to debits.
pub struct DocumentSequencer {
    db: DatabaseConnection,
}

impl DocumentSequencer {
    /// Creates a new sequencer.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns the debit's number for `kind`, assigning the next one if it
    /// has none yet.
    ///
    /// Asking again for a debit that already has a number returns that
    /// number and writes nothing.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NotFound` if the debit does not exist in the
    /// tenant's year, and `LedgerError::Contention` if the store stayed
    /// locked past the busy timeout.
    pub async fn assign(
        &self,
        ctx: &TenantContext,
        debit_ref: &str,
        kind: DocumentType,
    ) -> Result<String, LedgerError> {
        let id = DebitId::parse_external(debit_ref)
            .map_err(|_| LedgerError::not_found("Debit", debit_ref))?;

        // Fast path: already numbered, no lock needed.
        let existing = find_debit(&self.db, ctx, id)
            .await?
            .ok_or_else(|| LedgerError::not_found("Debit", debit_ref))?;
        if let Some(number) = issued(&existing, kind) {
            return Ok(number);
        }

        let txn = self.db.begin().await.map_err(classify)?;
        lock_sequence_row(&txn, ctx).await?;

        // Another assignment may have numbered the debit while we waited.
        let debit = find_debit(&txn, ctx, id)
            .await?
            .ok_or_else(|| LedgerError::not_found("Debit", debit_ref))?;
        if let Some(number) = issued(&debit, kind) {
            txn.commit().await.map_err(classify)?;
            return Ok(number);
        }

        let column = debit_column(kind);
        let values: Vec<Option<String>> = debits::Entity::find()
            .select_only()
            .column(column)
            .filter(debits::Column::TenantId.eq(ctx.tenant_id().into_inner()))
            .filter(debits::Column::FinancialYear.eq(ctx.financial_year().as_str()))
            .into_tuple()
            .all(&txn)
            .await
            .map_err(classify)?;

        let next = sequence::next_number(values.iter().map(Option::as_deref));
        let number = sequence::format_number(next);
        let last_no = i64::try_from(next)
            .map_err(|_| LedgerError::Storage(format!("{kind} sequence overflow")))?;

        debits::Entity::update_many()
            .col_expr(column, Expr::value(number.clone()))
            .filter(debits::Column::Id.eq(id.into_inner()))
            .filter(debits::Column::TenantId.eq(ctx.tenant_id().into_inner()))
            .exec(&txn)
            .await
            .map_err(classify)?;

        document_sequences::Entity::update_many()
            .col_expr(sequence_column(kind), Expr::value(last_no))
            .col_expr(document_sequences::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(document_sequences::Column::TenantId.eq(ctx.tenant_id().into_inner()))
            .filter(document_sequences::Column::FinancialYear.eq(ctx.financial_year().as_str()))
            .exec(&txn)
            .await
            .map_err(classify)?;

        txn.commit().await.map_err(classify)?;

        info!(
            tenant_id = %ctx.tenant_id(),
            financial_year = %ctx.financial_year(),
            debit_id = %id,
            kind = %kind,
            number = %number,
            "document number assigned"
        );
        Ok(number)
    }
}

/// Creates the tenant's sequence row if needed. Always a write statement,
/// even when the row exists, so it acquires the write lock.
async fn lock_sequence_row(txn: &DatabaseTransaction, ctx: &TenantContext) -> Result<(), LedgerError> {
    let row = document_sequences::ActiveModel {
        id: NotSet,
        tenant_id: Set(ctx.tenant_id().into_inner()),
        financial_year: Set(ctx.financial_year().to_string()),
        voucher_last_no: Set(0),
        loose_minute_last_no: Set(0),
        receipt_last_no: Set(0),
        updated_at: Set(Utc::now()),
    };

    document_sequences::Entity::insert(row)
        .on_conflict(
            OnConflict::columns([
                document_sequences::Column::TenantId,
                document_sequences::Column::FinancialYear,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(txn)
        .await
        .map_err(classify)?;
    Ok(())
}

fn issued(debit: &debits::Model, kind: DocumentType) -> Option<String> {
    let value = match kind {
        DocumentType::Voucher => &debit.document_number,
        DocumentType::LooseMinute => &debit.loose_minute_number,
        DocumentType::Receipt => &debit.receipt_number,
    };
    value.as_deref().map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

const fn debit_column(kind: DocumentType) -> debits::Column {
    match kind {
        DocumentType::Voucher => debits::Column::DocumentNumber,
        DocumentType::LooseMinute => debits::Column::LooseMinuteNumber,
        DocumentType::Receipt => debits::Column::ReceiptNumber,
    }
}

const fn sequence_column(kind: DocumentType) -> document_sequences::Column {
    match kind {
        DocumentType::Voucher => document_sequences::Column::VoucherLastNo,
        DocumentType::LooseMinute => document_sequences::Column::LooseMinuteLastNo,
        DocumentType::Receipt => document_sequences::Column::ReceiptLastNo,
    }
}
