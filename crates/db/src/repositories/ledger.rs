//! Ledger repository: credits, debits, and the views built on them.
//!
//! Credits and debits are append-only. Every query filters by tenant and
//! financial year, and deletes filter by tenant, so a row belonging to
//! another school is indistinguishable from one that does not exist.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::{info, warn};

use grantbook_core::budget::{BudgetReport, BudgetService, LineSpending};
use grantbook_core::ledger::{
    AvailableFunds, Credit, Debit, GrantSummary, LedgerError, NewCredit, NewDebit,
    validate_credit, validate_debit,
};
use grantbook_core::template::TemplateSlot;
use grantbook_core::tenant::TenantContext;
use grantbook_shared::types::{CreditId, DebitId, to_storage};

use super::budget::{load_budget, load_lines};
use super::convert::line_items_to_json;
use super::settings::load_settings;
use crate::entities::{credits, debits};
use crate::error::classify;

/// Repository for ledger operations.
pub struct LedgerRepository {
    db: DatabaseConnection,
}

impl LedgerRepository {
    /// Creates a new ledger repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    // ========================================================================
    // Credits
    // ========================================================================

    /// Records grant money received.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::MalformedInput` if the credit has no line items,
    /// names an unknown item, or carries a non-positive amount.
    pub async fn add_credit(
        &self,
        ctx: &TenantContext,
        input: NewCredit,
    ) -> Result<Credit, LedgerError> {
        validate_credit(&input)?;

        let row = credits::ActiveModel {
            id: NotSet,
            tenant_id: Set(ctx.tenant_id().into_inner()),
            financial_year: Set(ctx.financial_year().to_string()),
            date_received: Set(input.date_received),
            month: Set(input.month.to_string()),
            line_items: Set(line_items_to_json(&input.line_items)?),
            remarks: Set(input.remarks),
            created_at: Set(Utc::now()),
        }
        .insert(&self.db)
        .await
        .map_err(classify)?;

        let credit = row.into_credit()?;
        info!(
            tenant_id = %ctx.tenant_id(),
            credit_id = %credit.id,
            total = %credit.total(),
            "credit recorded"
        );
        Ok(credit)
    }

    /// Lists the year's credits by date received.
    pub async fn list_credits(&self, ctx: &TenantContext) -> Result<Vec<Credit>, LedgerError> {
        load_credits(&self.db, ctx).await
    }

    /// Deletes a credit. Returns false if no such credit belongs to the tenant.
    pub async fn delete_credit(
        &self,
        ctx: &TenantContext,
        external_id: &str,
    ) -> Result<bool, LedgerError> {
        let Ok(id) = CreditId::parse_external(external_id) else {
            return Ok(false);
        };
        let result = credits::Entity::delete_many()
            .filter(credits::Column::Id.eq(id.into_inner()))
            .filter(credits::Column::TenantId.eq(ctx.tenant_id().into_inner()))
            .exec(&self.db)
            .await
            .map_err(classify)?;

        let deleted = result.rows_affected > 0;
        if deleted {
            info!(tenant_id = %ctx.tenant_id(), credit_id = %id, "credit deleted");
        }
        Ok(deleted)
    }

    // ========================================================================
    // Debits
    // ========================================================================

    /// Records a payment.
    ///
    /// Document numbers are left empty; see `DocumentSequencer::assign`.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::MalformedInput` if the item is unknown, the
    /// amount is not positive, or the description is blank.
    pub async fn add_debit(&self, ctx: &TenantContext, input: NewDebit) -> Result<Debit, LedgerError> {
        let template = validate_debit(&input)?;
        let row = debit_row(ctx, template, input)
            .insert(&self.db)
            .await
            .map_err(classify)?;

        let debit = row.into_debit()?;
        info!(
            tenant_id = %ctx.tenant_id(),
            debit_id = %debit.id,
            item_id = %debit.item_id,
            amount = %debit.amount,
            "debit recorded"
        );
        Ok(debit)
    }

    /// Records a payment only if the item has enough credited funds.
    ///
    /// The debit is inserted first, which takes the write lock, and the
    /// item's balance is then checked inside the same transaction. Two
    /// concurrent payments therefore cannot both spend the same money.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InsufficientFunds` if the amount exceeds the
    /// item's credited balance, plus the errors of `add_debit`.
    pub async fn add_debit_within_funds(
        &self,
        ctx: &TenantContext,
        input: NewDebit,
    ) -> Result<Debit, LedgerError> {
        let template = validate_debit(&input)?;

        let txn = self.db.begin().await.map_err(classify)?;
        let row = debit_row(ctx, template, input)
            .insert(&txn)
            .await
            .map_err(classify)?;

        let credits = load_credits(&txn, ctx).await?;
        let others: Vec<Debit> = load_debits(&txn, ctx)
            .await?
            .into_iter()
            .filter(|d| d.id.into_inner() != row.id && d.item_id == row.item_id)
            .collect();
        let funds = AvailableFunds::compute(&[], &credits, &others);

        let debit = row.into_debit()?;
        if let Err(err) = funds.ensure_can_spend(&debit.item_id, debit.amount) {
            txn.rollback().await.map_err(classify)?;
            warn!(
                tenant_id = %ctx.tenant_id(),
                item_id = %debit.item_id,
                amount = %debit.amount,
                "debit rejected for insufficient funds"
            );
            return Err(err);
        }
        txn.commit().await.map_err(classify)?;

        info!(
            tenant_id = %ctx.tenant_id(),
            debit_id = %debit.id,
            item_id = %debit.item_id,
            amount = %debit.amount,
            "debit recorded"
        );
        Ok(debit)
    }

    /// Lists the year's debits by date paid.
    pub async fn list_debits(&self, ctx: &TenantContext) -> Result<Vec<Debit>, LedgerError> {
        load_debits(&self.db, ctx).await
    }

    /// Looks up one debit within the tenant's year.
    pub async fn get_debit(
        &self,
        ctx: &TenantContext,
        external_id: &str,
    ) -> Result<Option<Debit>, LedgerError> {
        let Ok(id) = DebitId::parse_external(external_id) else {
            return Ok(None);
        };
        find_debit(&self.db, ctx, id)
            .await?
            .map(debits::Model::into_debit)
            .transpose()
    }

    /// Deletes a debit. Returns false if no such debit belongs to the tenant.
    ///
    /// Deleting the newest numbered debit frees its document numbers for
    /// the next assignment.
    pub async fn delete_debit(
        &self,
        ctx: &TenantContext,
        external_id: &str,
    ) -> Result<bool, LedgerError> {
        let Ok(id) = DebitId::parse_external(external_id) else {
            return Ok(false);
        };
        let result = debits::Entity::delete_many()
            .filter(debits::Column::Id.eq(id.into_inner()))
            .filter(debits::Column::TenantId.eq(ctx.tenant_id().into_inner()))
            .exec(&self.db)
            .await
            .map_err(classify)?;

        let deleted = result.rows_affected > 0;
        if deleted {
            info!(tenant_id = %ctx.tenant_id(), debit_id = %id, "debit deleted");
        }
        Ok(deleted)
    }

    // ========================================================================
    // Views
    // ========================================================================

    /// Budgeted, credited, spent, and balance for every item.
    pub async fn available_funds(&self, ctx: &TenantContext) -> Result<AvailableFunds, LedgerError> {
        let txn = self.db.begin().await.map_err(classify)?;
        let lines = load_lines(&txn, ctx).await?;
        let credits = load_credits(&txn, ctx).await?;
        let debits = load_debits(&txn, ctx).await?;
        txn.commit().await.map_err(classify)?;

        Ok(AvailableFunds::compute(&lines, &credits, &debits))
    }

    /// Allocation against spending for each budget line.
    pub async fn spending(&self, ctx: &TenantContext) -> Result<Vec<LineSpending>, LedgerError> {
        let txn = self.db.begin().await.map_err(classify)?;
        let lines = load_lines(&txn, ctx).await?;
        let debits = load_debits(&txn, ctx).await?;
        txn.commit().await.map_err(classify)?;

        Ok(BudgetService::compute_spending(&lines, &debits))
    }

    /// The budget screen: every line with its spending.
    pub async fn budget_report(&self, ctx: &TenantContext) -> Result<BudgetReport, LedgerError> {
        let txn = self.db.begin().await.map_err(classify)?;
        let budget = load_budget(&txn, ctx).await?;
        let debits = load_debits(&txn, ctx).await?;
        txn.commit().await.map_err(classify)?;

        Ok(BudgetService::report(budget, &debits))
    }

    /// Year totals and monthly credit and debit series.
    pub async fn grant_summary(&self, ctx: &TenantContext) -> Result<GrantSummary, LedgerError> {
        let txn = self.db.begin().await.map_err(classify)?;
        let settings = load_settings(&txn, ctx).await?;
        let lines = load_lines(&txn, ctx).await?;
        let credits = load_credits(&txn, ctx).await?;
        let debits = load_debits(&txn, ctx).await?;
        txn.commit().await.map_err(classify)?;

        Ok(GrantSummary::compute(
            settings.total_grant,
            &lines,
            &credits,
            &debits,
        ))
    }
}

fn debit_row(ctx: &TenantContext, template: &TemplateSlot, input: NewDebit) -> debits::ActiveModel {
    debits::ActiveModel {
        id: NotSet,
        tenant_id: Set(ctx.tenant_id().into_inner()),
        financial_year: Set(ctx.financial_year().to_string()),
        document_number: Set(None),
        loose_minute_number: Set(None),
        receipt_number: Set(None),
        date_paid: Set(input.date_paid),
        month: Set(input.month.to_string()),
        item_id: Set(template.item_key()),
        sub_item_description: Set(template.description.to_string()),
        code: Set(template.code.to_string()),
        description: Set(input.description.trim().to_string()),
        amount: Set(to_storage(input.amount)),
        supplier_name: Set(input.supplier_name),
        position: Set(input.position),
        created_at: Set(Utc::now()),
    }
}

pub(crate) async fn find_debit<C: ConnectionTrait>(
    conn: &C,
    ctx: &TenantContext,
    id: DebitId,
) -> Result<Option<debits::Model>, LedgerError> {
    debits::Entity::find()
        .filter(debits::Column::Id.eq(id.into_inner()))
        .filter(debits::Column::TenantId.eq(ctx.tenant_id().into_inner()))
        .filter(debits::Column::FinancialYear.eq(ctx.financial_year().as_str()))
        .one(conn)
        .await
        .map_err(classify)
}

pub(crate) async fn load_credits<C: ConnectionTrait>(
    conn: &C,
    ctx: &TenantContext,
) -> Result<Vec<Credit>, LedgerError> {
    credits::Entity::find()
        .filter(credits::Column::TenantId.eq(ctx.tenant_id().into_inner()))
        .filter(credits::Column::FinancialYear.eq(ctx.financial_year().as_str()))
        .order_by_asc(credits::Column::DateReceived)
        .order_by_asc(credits::Column::Id)
        .all(conn)
        .await
        .map_err(classify)?
        .into_iter()
        .map(credits::Model::into_credit)
        .collect()
}

pub(crate) async fn load_debits<C: ConnectionTrait>(
    conn: &C,
    ctx: &TenantContext,
) -> Result<Vec<Debit>, LedgerError> {
    debits::Entity::find()
        .filter(debits::Column::TenantId.eq(ctx.tenant_id().into_inner()))
        .filter(debits::Column::FinancialYear.eq(ctx.financial_year().as_str()))
        .order_by_asc(debits::Column::DatePaid)
        .order_by_asc(debits::Column::Id)
        .all(conn)
        .await
        .map_err(classify)?
        .into_iter()
        .map(debits::Model::into_debit)
        .collect()
}
