//! Tenant scoping, subscriptions, and access rules.

pub mod context;
pub mod service;
pub mod types;


pub use context::TenantContext;
pub use service::TenantService;
pub use types::{
    MessageKind, NewTenant, SubscriptionMessage, SubscriptionStatus, Tenant, TenantStats,
};
