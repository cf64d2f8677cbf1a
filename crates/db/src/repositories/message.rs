//! Operator-to-tenant subscription messages.

use chrono::{NaiveDate, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use tracing::info;

use grantbook_core::ledger::LedgerError;
use grantbook_core::tenant::{MessageKind, SubscriptionMessage, Tenant, TenantService};
use grantbook_shared::types::{MessageId, TenantId};

use crate::entities::{subscription_messages, tenants};
use crate::error::classify;

/// Repository for subscription messages.
pub struct MessageRepository {
    db: DatabaseConnection,
}

impl MessageRepository {
    /// Creates a new message repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Sends a message to a tenant.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::MalformedInput` for a blank message and
    /// `LedgerError::NotFound` if the tenant does not exist.
    pub async fn send(
        &self,
        tenant_id: TenantId,
        message: &str,
        kind: MessageKind,
    ) -> Result<SubscriptionMessage, LedgerError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(LedgerError::MalformedInput("message is empty".into()));
        }
        let exists = tenants::Entity::find_by_id(tenant_id.into_inner())
            .one(&self.db)
            .await
            .map_err(classify)?
            .is_some();
        if !exists {
            return Err(LedgerError::not_found("Tenant", tenant_id));
        }

        let row = insert_message(&self.db, tenant_id, message, kind).await?;
        info!(tenant_id = %tenant_id, kind = kind.as_str(), "message sent");
        row.into_message()
    }

    /// A tenant's messages, newest first.
    pub async fn list_for_tenant(
        &self,
        tenant_id: TenantId,
        unread_only: bool,
    ) -> Result<Vec<SubscriptionMessage>, LedgerError> {
        let mut query = subscription_messages::Entity::find()
            .filter(subscription_messages::Column::TenantId.eq(tenant_id.into_inner()));
        if unread_only {
            query = query.filter(subscription_messages::Column::IsRead.eq(false));
        }

        query
            .order_by_desc(subscription_messages::Column::SentAt)
            .order_by_desc(subscription_messages::Column::Id)
            .all(&self.db)
            .await
            .map_err(classify)?
            .into_iter()
            .map(subscription_messages::Model::into_message)
            .collect()
    }

    /// Marks one of the tenant's messages as read. Returns false if the
    /// message does not belong to the tenant.
    pub async fn mark_read(
        &self,
        tenant_id: TenantId,
        message_id: MessageId,
    ) -> Result<bool, LedgerError> {
        let result = subscription_messages::Entity::update_many()
            .col_expr(subscription_messages::Column::IsRead, Expr::value(true))
            .filter(subscription_messages::Column::Id.eq(message_id.into_inner()))
            .filter(subscription_messages::Column::TenantId.eq(tenant_id.into_inner()))
            .exec(&self.db)
            .await
            .map_err(classify)?;
        Ok(result.rows_affected > 0)
    }

    /// Sends a warning to every tenant whose trial or subscription ends
    /// within `window_days`. Returns the tenants that were warned.
    pub async fn send_expiry_warnings(
        &self,
        today: NaiveDate,
        window_days: u32,
    ) -> Result<Vec<Tenant>, LedgerError> {
        let candidates = tenants::Entity::find()
            .filter(tenants::Column::SubscriptionEnd.is_not_null())
            .all(&self.db)
            .await
            .map_err(classify)?
            .into_iter()
            .map(tenants::Model::into_tenant)
            .collect::<Result<Vec<_>, _>>()?;

        let mut warned = Vec::new();
        for tenant in candidates {
            if !TenantService::needs_expiry_warning(&tenant, today, window_days) {
                continue;
            }
            let text = TenantService::expiry_warning_text(&tenant, today);
            insert_message(&self.db, tenant.id, &text, MessageKind::Warning).await?;
            warned.push(tenant);
        }

        if !warned.is_empty() {
            info!(count = warned.len(), "expiry warnings sent");
        }
        Ok(warned)
    }
}

async fn insert_message(
    db: &DatabaseConnection,
    tenant_id: TenantId,
    message: &str,
    kind: MessageKind,
) -> Result<subscription_messages::Model, LedgerError> {
    subscription_messages::ActiveModel {
        id: NotSet,
        tenant_id: Set(tenant_id.into_inner()),
        message: Set(message.to_string()),
        message_type: Set(kind.as_str().to_string()),
        is_read: Set(false),
        sent_at: Set(Utc::now()),
    }
    .insert(db)
    .await
    .map_err(classify)
}
