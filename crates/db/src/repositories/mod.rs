//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.
//! Every tenant-owned query is scoped by a `TenantContext`.

pub mod audit;
pub mod budget;
pub mod ledger;
pub mod message;
pub mod sequence;
pub mod settings;
pub mod tenant;

mod convert;

pub use audit::AuditLog;
pub use budget::BudgetRepository;
pub use ledger::LedgerRepository;
pub use message::MessageRepository;
pub use sequence::DocumentSequencer;
pub use settings::SettingsRepository;
pub use tenant::TenantRepository;
