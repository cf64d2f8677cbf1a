//! `SeaORM` entity definitions.
//!
//! Money columns are TEXT holding the decimal string, so values round-trip
//! exactly. Monthly allocations and credit line items are JSON text.

pub mod audit_logs;
pub mod budget_lines;
pub mod credits;
pub mod debits;
pub mod document_sequences;
pub mod settings;
pub mod subscription_messages;
pub mod tenants;

pub mod prelude {
    //! Entity re-exports.

    pub use super::audit_logs::Entity as AuditLogs;
    pub use super::budget_lines::Entity as BudgetLines;
    pub use super::credits::Entity as Credits;
    pub use super::debits::Entity as Debits;
    pub use super::document_sequences::Entity as DocumentSequences;
    pub use super::settings::Entity as Settings;
    pub use super::subscription_messages::Entity as SubscriptionMessages;
    pub use super::tenants::Entity as Tenants;
}
