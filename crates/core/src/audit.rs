//! Vocabulary for the operator audit trail.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use grantbook_shared::types::TenantId;

/// Who performed an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActorType {
    /// A platform operator.
    Operator,
    /// A school user.
    Tenant,
    /// A scheduled or automatic job.
    System,
}

impl ActorType {
    /// Storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Operator => "OPERATOR",
            Self::Tenant => "TENANT",
            Self::System => "SYSTEM",
        }
    }
}

/// The actor recorded against an audit entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// Kind of actor.
    pub kind: ActorType,
    /// Username or job name.
    pub name: String,
}

impl Actor {
    /// An operator identified by username.
    pub fn operator(name: impl Into<String>) -> Self {
        Self {
            kind: ActorType::Operator,
            name: name.into(),
        }
    }

    /// An automatic job.
    pub fn system(name: impl Into<String>) -> Self {
        Self {
            kind: ActorType::System,
            name: name.into(),
        }
    }
}

/// Audited actions.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    OnboardTenant,
    LockTenant,
    UnlockTenant,
    ActivateTenant,
    DeactivateTenant,
    UpdateSubscription,
    ExpireSubscription,
    DeleteTenant,
    SendMessage,
}

impl AuditAction {
    /// Storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OnboardTenant => "ONBOARD_TENANT",
            Self::LockTenant => "LOCK_TENANT",
            Self::UnlockTenant => "UNLOCK_TENANT",
            Self::ActivateTenant => "ACTIVATE_TENANT",
            Self::DeactivateTenant => "DEACTIVATE_TENANT",
            Self::UpdateSubscription => "UPDATE_SUBSCRIPTION",
            Self::ExpireSubscription => "EXPIRE_SUBSCRIPTION",
            Self::DeleteTenant => "DELETE_TENANT",
            Self::SendMessage => "SEND_MESSAGE",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored audit entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    /// Kind of actor, as stored.
    pub actor_type: String,
    /// Username or job name.
    pub actor_name: String,
    /// Action, as stored.
    pub action: String,
    /// Tenant the action applied to, if any.
    pub target_tenant_id: Option<TenantId>,
    /// Free text.
    pub detail: String,
    /// When it happened.
    pub created_at: DateTime<Utc>,
}
