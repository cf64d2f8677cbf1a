//! Settings repository for per-tenant school settings.

use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    QueryFilter, Set,
};
use tracing::info;

use grantbook_core::ledger::LedgerError;
use grantbook_core::settings::Settings;
use grantbook_core::tenant::TenantContext;
use grantbook_shared::types::to_storage;

use crate::entities::settings;
use crate::error::classify;

/// Repository for settings operations.
pub struct SettingsRepository {
    db: DatabaseConnection,
}

impl SettingsRepository {
    /// Creates a new settings repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns the tenant's settings for the year, or defaults if none were saved.
    pub async fn get_settings(&self, ctx: &TenantContext) -> Result<Settings, LedgerError> {
        load_settings(&self.db, ctx).await
    }

    /// Creates or replaces the tenant's settings for the year.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::MalformedInput` if the grant is negative.
    pub async fn save_settings(
        &self,
        ctx: &TenantContext,
        input: &Settings,
    ) -> Result<Settings, LedgerError> {
        input.validate()?;
        upsert_settings(&self.db, ctx, input).await?;
        info!(
            tenant_id = %ctx.tenant_id(),
            financial_year = %ctx.financial_year(),
            "settings saved"
        );
        Ok(Settings {
            is_persisted: true,
            ..input.clone()
        })
    }
}

pub(crate) async fn load_settings<C: ConnectionTrait>(
    conn: &C,
    ctx: &TenantContext,
) -> Result<Settings, LedgerError> {
    let row = settings::Entity::find()
        .filter(settings::Column::TenantId.eq(ctx.tenant_id().into_inner()))
        .filter(settings::Column::FinancialYear.eq(ctx.financial_year().as_str()))
        .one(conn)
        .await
        .map_err(classify)?;

    match row {
        Some(row) => row.into_settings(),
        None => Ok(Settings::default()),
    }
}

pub(crate) async fn upsert_settings<C: ConnectionTrait>(
    conn: &C,
    ctx: &TenantContext,
    input: &Settings,
) -> Result<(), LedgerError> {
    let now = Utc::now();
    let row = settings::ActiveModel {
        id: NotSet,
        tenant_id: Set(ctx.tenant_id().into_inner()),
        financial_year: Set(ctx.financial_year().to_string()),
        school_name: Set(input.school_name.clone()),
        school_address: Set(input.school_address.clone()),
        ministry_department: Set(input.ministry_department.clone()),
        total_grant: Set(to_storage(input.total_grant)),
        compiled_by: Set(input.compiled_by.clone()),
        entered_by: Set(input.entered_by.clone()),
        authorizing_officer: Set(input.authorizing_officer.clone()),
        authorizing_appointment: Set(input.authorizing_appointment.clone()),
        counter_sign: Set(input.counter_sign.clone()),
        counter_appointment: Set(input.counter_appointment.clone()),
        created_at: Set(now),
        updated_at: Set(now),
    };

    settings::Entity::insert(row)
        .on_conflict(
            OnConflict::columns([settings::Column::TenantId, settings::Column::FinancialYear])
                .update_columns([
                    settings::Column::SchoolName,
                    settings::Column::SchoolAddress,
                    settings::Column::MinistryDepartment,
                    settings::Column::TotalGrant,
                    settings::Column::CompiledBy,
                    settings::Column::EnteredBy,
                    settings::Column::AuthorizingOfficer,
                    settings::Column::AuthorizingAppointment,
                    settings::Column::CounterSign,
                    settings::Column::CounterAppointment,
                    settings::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await
        .map_err(classify)?;

    Ok(())
}
