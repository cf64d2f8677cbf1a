//! Tenant repository: onboarding, operator actions, and access checks.

use chrono::{NaiveDate, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::{info, warn};

use grantbook_core::audit::{Actor, AuditAction};
use grantbook_core::fiscal::FinancialYear;
use grantbook_core::ledger::LedgerError;
use grantbook_core::settings::Settings;
use grantbook_core::tenant::{
    NewTenant, SubscriptionStatus, Tenant, TenantContext, TenantService, TenantStats,
};
use grantbook_shared::TenancyConfig;
use grantbook_shared::types::TenantId;

use super::audit::AuditLog;
use super::budget::seed_lines;
use super::settings::upsert_settings;
use crate::entities::{
    budget_lines, credits, debits, document_sequences, settings, subscription_messages, tenants,
};
use crate::error::classify;

/// Repository for tenant lifecycle operations.
pub struct TenantRepository {
    db: DatabaseConnection,
    tenancy: TenancyConfig,
    audit: AuditLog,
}

impl TenantRepository {
    /// Creates a new tenant repository.
    #[must_use]
    pub fn new(db: DatabaseConnection, tenancy: TenancyConfig) -> Self {
        let audit = AuditLog::new(db.clone());
        Self { db, tenancy, audit }
    }

    // ========================================================================
    // Onboarding
    // ========================================================================

    /// Registers a school on a trial.
    ///
    /// The tenant row, its settings for the default financial year, and the
    /// 42 seeded budget lines are written in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::MalformedInput` for blank input, and
    /// `LedgerError::ConstraintViolation` if the username is taken.
    pub async fn onboard(
        &self,
        actor: &Actor,
        input: &NewTenant,
        today: NaiveDate,
    ) -> Result<Tenant, LedgerError> {
        let input = TenantService::validate_new_tenant(input)?;
        let year = FinancialYear::parse(&self.tenancy.default_financial_year)?;
        let (start, end) = TenantService::trial_window(today, self.tenancy.trial_days);
        let now = Utc::now();

        let txn = self.db.begin().await.map_err(classify)?;
        let row = tenants::ActiveModel {
            id: NotSet,
            school_name: Set(input.school_name.clone()),
            username: Set(input.username.clone()),
            is_active: Set(true),
            is_locked: Set(false),
            subscription_status: Set(SubscriptionStatus::Trial.as_str().to_string()),
            subscription_start: Set(Some(start)),
            subscription_end: Set(Some(end)),
            last_access_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await
        .map_err(classify)?;

        let ctx = TenantContext::new(TenantId::new(row.id), year);
        let settings = Settings {
            school_name: input.school_name.clone(),
            ..Settings::default()
        };
        upsert_settings(&txn, &ctx, &settings).await?;
        seed_lines(&txn, &ctx).await?;
        txn.commit().await.map_err(classify)?;

        let tenant = row.into_tenant()?;
        info!(
            tenant_id = %tenant.id,
            username = %tenant.username,
            trial_end = %end,
            "tenant onboarded"
        );
        self.audit
            .record(actor, AuditAction::OnboardTenant, Some(tenant.id), &tenant.school_name)
            .await;
        Ok(tenant)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Looks up a tenant.
    pub async fn get(&self, id: TenantId) -> Result<Option<Tenant>, LedgerError> {
        tenants::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(classify)?
            .map(tenants::Model::into_tenant)
            .transpose()
    }

    /// Looks up a tenant by login name.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<Tenant>, LedgerError> {
        tenants::Entity::find()
            .filter(tenants::Column::Username.eq(username.trim()))
            .one(&self.db)
            .await
            .map_err(classify)?
            .map(tenants::Model::into_tenant)
            .transpose()
    }

    /// All tenants by school name.
    pub async fn list(&self) -> Result<Vec<Tenant>, LedgerError> {
        tenants::Entity::find()
            .order_by_asc(tenants::Column::SchoolName)
            .order_by_asc(tenants::Column::Id)
            .all(&self.db)
            .await
            .map_err(classify)?
            .into_iter()
            .map(tenants::Model::into_tenant)
            .collect()
    }

    /// Counts for the operator dashboard.
    pub async fn stats(&self) -> Result<TenantStats, LedgerError> {
        let total = tenants::Entity::find()
            .count(&self.db)
            .await
            .map_err(classify)?;
        let active = tenants::Entity::find()
            .filter(tenants::Column::IsActive.eq(true))
            .filter(tenants::Column::IsLocked.eq(false))
            .count(&self.db)
            .await
            .map_err(classify)?;
        let locked = tenants::Entity::find()
            .filter(tenants::Column::IsLocked.eq(true))
            .count(&self.db)
            .await
            .map_err(classify)?;
        let expired = tenants::Entity::find()
            .filter(tenants::Column::SubscriptionStatus.eq(SubscriptionStatus::Expired.as_str()))
            .count(&self.db)
            .await
            .map_err(classify)?;

        Ok(TenantStats {
            total,
            active,
            locked,
            expired,
        })
    }

    // ========================================================================
    // Operator actions
    // ========================================================================

    /// Locks or unlocks a tenant.
    pub async fn set_locked(
        &self,
        actor: &Actor,
        id: TenantId,
        locked: bool,
    ) -> Result<(), LedgerError> {
        self.update_flag(id, tenants::Column::IsLocked, locked).await?;
        let action = if locked {
            AuditAction::LockTenant
        } else {
            AuditAction::UnlockTenant
        };
        info!(tenant_id = %id, locked, "tenant lock changed");
        self.audit.record(actor, action, Some(id), "").await;
        Ok(())
    }

    /// Activates or deactivates a tenant.
    pub async fn set_active(
        &self,
        actor: &Actor,
        id: TenantId,
        active: bool,
    ) -> Result<(), LedgerError> {
        self.update_flag(id, tenants::Column::IsActive, active).await?;
        let action = if active {
            AuditAction::ActivateTenant
        } else {
            AuditAction::DeactivateTenant
        };
        info!(tenant_id = %id, active, "tenant activation changed");
        self.audit.record(actor, action, Some(id), "").await;
        Ok(())
    }

    /// Records a payment: the tenant becomes `Paid` for `days` days from
    /// `payment_date`.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::MalformedInput` if `days` is zero and
    /// `LedgerError::NotFound` if the tenant does not exist.
    pub async fn update_subscription(
        &self,
        actor: &Actor,
        id: TenantId,
        payment_date: NaiveDate,
        days: u32,
    ) -> Result<Tenant, LedgerError> {
        let (start, end) = TenantService::subscription_window(payment_date, days)?;
        let tenant = self
            .set_subscription(id, SubscriptionStatus::Paid, Some(start), Some(end))
            .await?;

        info!(tenant_id = %id, until = %end, "subscription updated");
        self.audit
            .record(
                actor,
                AuditAction::UpdateSubscription,
                Some(id),
                &format!("paid {payment_date}, {days} days, until {end}"),
            )
            .await;
        Ok(tenant)
    }

    /// Gives a tenant a subscription that never expires.
    pub async fn grant_lifetime(&self, actor: &Actor, id: TenantId) -> Result<Tenant, LedgerError> {
        let tenant = self
            .set_subscription(id, SubscriptionStatus::Lifetime, None, None)
            .await?;
        info!(tenant_id = %id, "lifetime subscription granted");
        self.audit
            .record(actor, AuditAction::UpdateSubscription, Some(id), "lifetime")
            .await;
        Ok(tenant)
    }

    /// Deletes a tenant and everything it owns in one transaction.
    ///
    /// Returns false if the tenant did not exist.
    pub async fn delete(&self, actor: &Actor, id: TenantId) -> Result<bool, LedgerError> {
        let raw = id.into_inner();

        let txn = self.db.begin().await.map_err(classify)?;
        subscription_messages::Entity::delete_many()
            .filter(subscription_messages::Column::TenantId.eq(raw))
            .exec(&txn)
            .await
            .map_err(classify)?;
        document_sequences::Entity::delete_many()
            .filter(document_sequences::Column::TenantId.eq(raw))
            .exec(&txn)
            .await
            .map_err(classify)?;
        debits::Entity::delete_many()
            .filter(debits::Column::TenantId.eq(raw))
            .exec(&txn)
            .await
            .map_err(classify)?;
        credits::Entity::delete_many()
            .filter(credits::Column::TenantId.eq(raw))
            .exec(&txn)
            .await
            .map_err(classify)?;
        budget_lines::Entity::delete_many()
            .filter(budget_lines::Column::TenantId.eq(raw))
            .exec(&txn)
            .await
            .map_err(classify)?;
        settings::Entity::delete_many()
            .filter(settings::Column::TenantId.eq(raw))
            .exec(&txn)
            .await
            .map_err(classify)?;
        let result = tenants::Entity::delete_by_id(raw)
            .exec(&txn)
            .await
            .map_err(classify)?;
        txn.commit().await.map_err(classify)?;

        let deleted = result.rows_affected > 0;
        if deleted {
            warn!(tenant_id = %id, "tenant deleted with all its data");
            self.audit
                .record(actor, AuditAction::DeleteTenant, Some(id), "")
                .await;
        }
        Ok(deleted)
    }

    // ========================================================================
    // Access
    // ========================================================================

    /// Decides whether a tenant may sign in today.
    ///
    /// A trial or subscription found to have lapsed is switched to
    /// `Expired` before access is refused. On success the tenant's last
    /// access time is updated.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NotAuthorized` for an unknown tenant and
    /// `LedgerError::AccessDenied` with the reason otherwise.
    pub async fn check_access(&self, id: TenantId, today: NaiveDate) -> Result<Tenant, LedgerError> {
        let mut tenant = self.get(id).await?.ok_or(LedgerError::NotAuthorized)?;

        if let Err(reason) = TenantService::check_access(&tenant, today) {
            if TenantService::has_lapsed(&tenant, today) {
                self.mark_expired(id).await?;
                self.audit
                    .record(
                        &Actor::system("access-check"),
                        AuditAction::ExpireSubscription,
                        Some(id),
                        tenant.subscription_status.as_str(),
                    )
                    .await;
            }
            info!(tenant_id = %id, reason = ?reason, "access denied");
            return Err(reason.into());
        }

        let now = Utc::now();
        tenants::Entity::update_many()
            .col_expr(tenants::Column::LastAccessAt, Expr::value(now))
            .filter(tenants::Column::Id.eq(id.into_inner()))
            .exec(&self.db)
            .await
            .map_err(classify)?;
        tenant.last_access_at = Some(now);
        Ok(tenant)
    }

    /// Marks every lapsed trial or subscription as `Expired`. Returns how
    /// many tenants changed.
    pub async fn expire_lapsed(&self, today: NaiveDate) -> Result<u64, LedgerError> {
        let result = tenants::Entity::update_many()
            .col_expr(
                tenants::Column::SubscriptionStatus,
                Expr::value(SubscriptionStatus::Expired.as_str()),
            )
            .col_expr(tenants::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(tenants::Column::SubscriptionStatus.is_in([
                SubscriptionStatus::Trial.as_str(),
                SubscriptionStatus::Paid.as_str(),
                SubscriptionStatus::Unpaid.as_str(),
            ]))
            .filter(tenants::Column::SubscriptionEnd.lt(today))
            .exec(&self.db)
            .await
            .map_err(classify)?;

        if result.rows_affected > 0 {
            info!(expired = result.rows_affected, "lapsed subscriptions expired");
        }
        Ok(result.rows_affected)
    }

    async fn mark_expired(&self, id: TenantId) -> Result<(), LedgerError> {
        tenants::Entity::update_many()
            .col_expr(
                tenants::Column::SubscriptionStatus,
                Expr::value(SubscriptionStatus::Expired.as_str()),
            )
            .col_expr(tenants::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(tenants::Column::Id.eq(id.into_inner()))
            .filter(tenants::Column::SubscriptionStatus.ne(SubscriptionStatus::Expired.as_str()))
            .exec(&self.db)
            .await
            .map_err(classify)?;
        Ok(())
    }

    async fn update_flag(
        &self,
        id: TenantId,
        column: tenants::Column,
        value: bool,
    ) -> Result<(), LedgerError> {
        let result = tenants::Entity::update_many()
            .col_expr(column, Expr::value(value))
            .col_expr(tenants::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(tenants::Column::Id.eq(id.into_inner()))
            .exec(&self.db)
            .await
            .map_err(classify)?;
        if result.rows_affected == 0 {
            return Err(LedgerError::not_found("Tenant", id));
        }
        Ok(())
    }

    async fn set_subscription(
        &self,
        id: TenantId,
        status: SubscriptionStatus,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Tenant, LedgerError> {
        let result = tenants::Entity::update_many()
            .col_expr(tenants::Column::SubscriptionStatus, Expr::value(status.as_str()))
            .col_expr(tenants::Column::SubscriptionStart, Expr::value(start))
            .col_expr(tenants::Column::SubscriptionEnd, Expr::value(end))
            .col_expr(tenants::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(tenants::Column::Id.eq(id.into_inner()))
            .exec(&self.db)
            .await
            .map_err(classify)?;
        if result.rows_affected == 0 {
            return Err(LedgerError::not_found("Tenant", id));
        }
        self.get(id)
            .await?
            .ok_or_else(|| LedgerError::not_found("Tenant", id))
    }
}
