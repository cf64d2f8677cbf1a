//! Core business logic for Grantbook.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `fiscal` - Financial year normalization and the April-March month order
//! - `template` - The fixed 42-slot school grant budget template
//! - `budget` - Budget lines, allocation updates, and per-line spending
//! - `ledger` - Credits, debits, available funds, and the grant summary
//! - `sequence` - Gapless document numbering rules
//! - `tenant` - Tenant scoping, subscriptions, and access rules
//! - `settings` - Per-tenant school settings
//! - `audit` - Operator audit trail vocabulary

pub mod audit;
pub mod budget;
pub mod fiscal;
pub mod ledger;
pub mod sequence;
pub mod settings;
pub mod template;
pub mod tenant;
