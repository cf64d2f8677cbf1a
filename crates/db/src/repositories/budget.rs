//! Budget repository: the template reconciler.
//!
//! Seeding and saving both lean on the `(tenant_id, financial_year,
//! template_slot)` unique key. Seeding inserts with `ON CONFLICT DO NOTHING`
//! so any number of concurrent callers end with exactly 42 rows, and saving
//! upserts so an update can never create a second row for a slot.

use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::info;

use grantbook_core::budget::{Budget, BudgetLine, BudgetLineUpdate, BudgetService};
use grantbook_core::ledger::LedgerError;
use grantbook_core::template::{TEMPLATE, TemplateSlot};
use grantbook_core::tenant::TenantContext;
use grantbook_shared::types::to_storage;

use super::convert::allocations_to_json;
use super::settings::load_settings;
use crate::entities::{budget_lines, tenants};
use crate::error::classify;

/// Repository for budget operations.
pub struct BudgetRepository {
    db: DatabaseConnection,
}

impl BudgetRepository {
    /// Creates a new budget repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    // ========================================================================
    // Reconciliation
    // ========================================================================

    /// Makes sure all 42 template lines exist for the tenant and year.
    ///
    /// Existing lines are left untouched. Returns how many lines this call
    /// inserted, which is zero when the budget was already complete.
    pub async fn ensure_budget_seeded(&self, ctx: &TenantContext) -> Result<u64, LedgerError> {
        let txn = self.db.begin().await.map_err(classify)?;
        let inserted = seed_lines(&txn, ctx).await?;
        txn.commit().await.map_err(classify)?;

        if inserted > 0 {
            info!(
                tenant_id = %ctx.tenant_id(),
                financial_year = %ctx.financial_year(),
                inserted,
                "budget lines seeded"
            );
        }
        Ok(inserted)
    }

    /// Returns the budget in slot order with the grant and school name.
    ///
    /// A budget that was never seeded comes back with no lines.
    pub async fn get_budget(&self, ctx: &TenantContext) -> Result<Budget, LedgerError> {
        let txn = self.db.begin().await.map_err(classify)?;
        let budget = load_budget(&txn, ctx).await?;
        txn.commit().await.map_err(classify)?;
        Ok(budget)
    }

    /// Applies allocation updates in one transaction.
    ///
    /// The batch is validated first; if any update is malformed nothing is
    /// written. Each update replaces the allocation of the line it names.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::MalformedInput` for a missing or unknown slot,
    /// a repeated slot, or a negative amount.
    pub async fn save_budget(
        &self,
        ctx: &TenantContext,
        updates: &[BudgetLineUpdate],
    ) -> Result<(), LedgerError> {
        let validated = BudgetService::validate_updates(updates)?;
        let now = Utc::now();

        let mut rows = Vec::with_capacity(validated.len());
        for update in &validated {
            let mut row = line_row(ctx, update.template)?;
            row.total_allocation = Set(to_storage(update.total_allocation));
            row.monthly_allocations = Set(allocations_to_json(&update.monthly_allocations)?);
            row.updated_at = Set(now);
            rows.push(row);
        }

        let txn = self.db.begin().await.map_err(classify)?;
        for row in rows {
            budget_lines::Entity::insert(row)
                .on_conflict(
                    OnConflict::columns(slot_key())
                        .update_columns([
                            budget_lines::Column::TotalAllocation,
                            budget_lines::Column::MonthlyAllocations,
                            budget_lines::Column::UpdatedAt,
                        ])
                        .to_owned(),
                )
                .exec_without_returning(&txn)
                .await
                .map_err(classify)?;
        }
        txn.commit().await.map_err(classify)?;

        info!(
            tenant_id = %ctx.tenant_id(),
            financial_year = %ctx.financial_year(),
            lines = validated.len(),
            "budget saved"
        );
        Ok(())
    }
}

fn slot_key() -> [budget_lines::Column; 3] {
    [
        budget_lines::Column::TenantId,
        budget_lines::Column::FinancialYear,
        budget_lines::Column::TemplateSlot,
    ]
}

fn line_row(
    ctx: &TenantContext,
    template: &TemplateSlot,
) -> Result<budget_lines::ActiveModel, LedgerError> {
    let seeded = BudgetLine::seeded(template);
    let now = Utc::now();
    Ok(budget_lines::ActiveModel {
        id: NotSet,
        tenant_id: Set(ctx.tenant_id().into_inner()),
        financial_year: Set(ctx.financial_year().to_string()),
        template_slot: Set(i32::from(seeded.slot)),
        item_key: Set(seeded.item_key),
        program_no: Set(i32::from(seeded.program_no)),
        program_name: Set(seeded.program_name),
        sub_activity: Set(seeded.sub_activity),
        description: Set(seeded.description),
        code: Set(seeded.code),
        total_allocation: Set(to_storage(seeded.total_allocation)),
        monthly_allocations: Set(allocations_to_json(&seeded.monthly_allocations)?),
        created_at: Set(now),
        updated_at: Set(now),
    })
}

/// Inserts whichever template lines are missing. Must run inside the
/// caller's transaction; the insert is its first statement so the write
/// lock is taken before anything is read.
pub(crate) async fn seed_lines<C: ConnectionTrait>(
    conn: &C,
    ctx: &TenantContext,
) -> Result<u64, LedgerError> {
    let rows = TEMPLATE
        .iter()
        .map(|template| line_row(ctx, template))
        .collect::<Result<Vec<_>, _>>()?;

    budget_lines::Entity::insert_many(rows)
        .on_conflict(OnConflict::columns(slot_key()).do_nothing().to_owned())
        .exec_without_returning(conn)
        .await
        .map_err(classify)
}

/// Reads lines, settings and the tenant row into one [`Budget`].
///
/// Callers that need a consistent picture pass a transaction.
pub(crate) async fn load_budget<C: ConnectionTrait>(
    conn: &C,
    ctx: &TenantContext,
) -> Result<Budget, LedgerError> {
    let lines = load_lines(conn, ctx).await?;
    let settings = load_settings(conn, ctx).await?;

    let school_name = if settings.school_name.is_empty() {
        tenants::Entity::find_by_id(ctx.tenant_id().into_inner())
            .one(conn)
            .await
            .map_err(classify)?
            .map(|t| t.school_name)
            .unwrap_or_default()
    } else {
        settings.school_name
    };

    Ok(Budget {
        financial_year: ctx.financial_year().clone(),
        school_name,
        total_grant: settings.total_grant,
        lines,
    })
}

pub(crate) async fn load_lines<C: ConnectionTrait>(
    conn: &C,
    ctx: &TenantContext,
) -> Result<Vec<BudgetLine>, LedgerError> {
    budget_lines::Entity::find()
        .filter(budget_lines::Column::TenantId.eq(ctx.tenant_id().into_inner()))
        .filter(budget_lines::Column::FinancialYear.eq(ctx.financial_year().as_str()))
        .order_by_asc(budget_lines::Column::TemplateSlot)
        .all(conn)
        .await
        .map_err(classify)?
        .into_iter()
        .map(budget_lines::Model::into_line)
        .collect()
}
