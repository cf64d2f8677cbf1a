//! Shared types, errors, and configuration for Grantbook.
//!
//! This crate provides common types used across all other crates:
//! - Decimal amount parsing and storage encoding
//! - Typed row IDs with stable external references
//! - The outward-facing error shape
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, DatabaseConfig, TenancyConfig};
pub use error::{AppError, AppResult, ErrorKind};
