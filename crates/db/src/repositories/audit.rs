//! Operator audit trail.
//!
//! Writing an audit entry never fails the action being audited: errors are
//! logged and dropped.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use tracing::warn;

use grantbook_core::audit::{Actor, AuditAction, AuditEntry};
use grantbook_core::ledger::LedgerError;
use grantbook_shared::types::TenantId;

use crate::entities::audit_logs;
use crate::error::classify;

/// Append-only audit log.
#[derive(Clone)]
pub struct AuditLog {
    db: DatabaseConnection,
}

impl AuditLog {
    /// Creates a new audit log.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records an action. Failures are logged, not returned.
    pub async fn record(
        &self,
        actor: &Actor,
        action: AuditAction,
        target: Option<TenantId>,
        detail: &str,
    ) {
        let row = audit_logs::ActiveModel {
            id: NotSet,
            actor_type: Set(actor.kind.as_str().to_string()),
            actor_name: Set(actor.name.clone()),
            action: Set(action.as_str().to_string()),
            target_tenant_id: Set(target.map(TenantId::into_inner)),
            detail: Set(detail.to_string()),
            created_at: Set(Utc::now()),
        };

        if let Err(err) = row.insert(&self.db).await {
            warn!(error = %err, action = %action, actor = %actor.name, "audit entry dropped");
        }
    }

    /// Most recent entries first, optionally for one tenant.
    pub async fn recent(
        &self,
        target: Option<TenantId>,
        limit: u64,
    ) -> Result<Vec<AuditEntry>, LedgerError> {
        let mut query = audit_logs::Entity::find();
        if let Some(tenant) = target {
            query = query.filter(audit_logs::Column::TargetTenantId.eq(tenant.into_inner()));
        }

        let rows = query
            .order_by_desc(audit_logs::Column::CreatedAt)
            .order_by_desc(audit_logs::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(classify)?;

        Ok(rows
            .into_iter()
            .map(|row| AuditEntry {
                actor_type: row.actor_type,
                actor_name: row.actor_name,
                action: row.action,
                target_tenant_id: row.target_tenant_id.map(TenantId::new),
                detail: row.detail,
                created_at: row.created_at,
            })
            .collect())
    }
}
