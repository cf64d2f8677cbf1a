//! Tenant domain types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use grantbook_shared::types::{MessageId, TenantId};

/// Subscription state of a tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscriptionStatus {
    /// Free trial started at onboarding.
    Trial,
    /// Paid subscription with an end date.
    Paid,
    /// Registered but never paid.
    Unpaid,
    /// Trial or paid period has lapsed.
    Expired,
    /// Never expires.
    Lifetime,
}

impl SubscriptionStatus {
    /// Storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trial => "TRIAL",
            Self::Paid => "PAID",
            Self::Unpaid => "UNPAID",
            Self::Expired => "EXPIRED",
            Self::Lifetime => "LIFETIME",
        }
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubscriptionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TRIAL" => Ok(Self::Trial),
            "PAID" => Ok(Self::Paid),
            "UNPAID" => Ok(Self::Unpaid),
            "EXPIRED" => Ok(Self::Expired),
            "LIFETIME" => Ok(Self::Lifetime),
            other => Err(format!("unknown subscription status: {other}")),
        }
    }
}

/// A school using the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    /// Tenant id.
    pub id: TenantId,
    /// School name.
    pub school_name: String,
    /// Login name, unique across tenants.
    pub username: String,
    /// Deactivated tenants cannot sign in.
    pub is_active: bool,
    /// Locked tenants cannot sign in.
    pub is_locked: bool,
    /// Current subscription state.
    pub subscription_status: SubscriptionStatus,
    /// First day of the current subscription window.
    pub subscription_start: Option<NaiveDate>,
    /// Last day of the current subscription window.
    pub subscription_end: Option<NaiveDate>,
    /// When the tenant last passed an access check.
    pub last_access_at: Option<DateTime<Utc>>,
    /// When the tenant was onboarded.
    pub created_at: DateTime<Utc>,
}

/// Input for onboarding a tenant.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTenant {
    /// School name.
    pub school_name: String,
    /// Login name.
    pub username: String,
}

/// Counts shown on the operator dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantStats {
    /// All tenants.
    pub total: u64,
    /// Active and unlocked.
    pub active: u64,
    /// Locked by an operator.
    pub locked: u64,
    /// Subscription lapsed.
    pub expired: u64,
}

/// Severity of an operator message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageKind {
    /// Informational.
    Info,
    /// Needs attention, e.g. an upcoming expiry.
    Warning,
}

impl MessageKind {
    /// Storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
        }
    }
}

impl FromStr for MessageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INFO" => Ok(Self::Info),
            "WARNING" => Ok(Self::Warning),
            other => Err(format!("unknown message type: {other}")),
        }
    }
}

/// A message from an operator to a tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionMessage {
    /// Message id.
    pub id: MessageId,
    /// Recipient.
    pub tenant_id: TenantId,
    /// Body text.
    pub message: String,
    /// Severity.
    pub kind: MessageKind,
    /// Whether the tenant has dismissed it.
    pub is_read: bool,
    /// When it was sent.
    pub sent_at: DateTime<Utc>,
}
