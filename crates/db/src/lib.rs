//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - Repository abstractions for data access
//! - Database migrations
//! - Classification of driver errors into `LedgerError`

pub mod entities;
pub mod error;
pub mod migration;
pub mod repositories;

pub use repositories::{
    AuditLog, BudgetRepository, DocumentSequencer, LedgerRepository, MessageRepository,
    SettingsRepository, TenantRepository,
};

use std::str::FromStr;

use sea_orm::{DatabaseConnection, DbErr, RuntimeErr, SqlxSqliteConnector};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};

use grantbook_shared::DatabaseConfig;

/// Establishes a connection pool to the SQLite store.
///
/// Every connection runs in WAL mode with foreign keys enforced, and waits
/// up to the configured busy timeout for the write lock instead of failing
/// immediately.
///
/// # Errors
///
/// Returns an error if the URL is invalid or the database cannot be opened.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let options = SqliteConnectOptions::from_str(&config.url)
        .map_err(|e| DbErr::Conn(RuntimeErr::Internal(e.to_string())))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .foreign_keys(true)
        .busy_timeout(config.busy_timeout());

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_with(options)
        .await
        .map_err(|e| DbErr::Conn(RuntimeErr::Internal(e.to_string())))?;

    tracing::debug!(url = %config.url, "connected to sqlite store");
    Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
}
