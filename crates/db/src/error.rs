//! Classification of `DbErr` into `LedgerError`.
//!
//! Repositories never hand raw driver errors to callers. Key violations
//! become `ConstraintViolation` and SQLite lock timeouts become the
//! retryable `Contention`. Anything else is `Storage`.

use sea_orm::{DbErr, RuntimeErr, SqlErr};

use grantbook_core::ledger::LedgerError;

/// SQLite primary result codes that mean another connection held the lock.
const BUSY_CODES: [&str; 2] = ["5", "6"];

/// Messages SQLite and the pool use for the same conditions.
const BUSY_MESSAGES: [&str; 4] = [
    "database is locked",
    "database table is locked",
    "database is busy",
    "pool timed out",
];

/// Maps a driver error onto the ledger taxonomy.
#[must_use]
pub fn classify(err: DbErr) -> LedgerError {
    if let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
        return LedgerError::ConstraintViolation(detail);
    }
    if let Some(SqlErr::ForeignKeyConstraintViolation(detail)) = err.sql_err() {
        return LedgerError::ConstraintViolation(detail);
    }
    if is_busy(&err) {
        tracing::warn!(error = %err, "store busy");
        return LedgerError::Contention(err.to_string());
    }
    LedgerError::Storage(err.to_string())
}

fn is_busy(err: &DbErr) -> bool {
    let runtime = match err {
        DbErr::Conn(e) | DbErr::Exec(e) | DbErr::Query(e) => Some(e),
        _ => None,
    };
    if let Some(RuntimeErr::SqlxError(sqlx_err)) = runtime {
        let primary = sqlx_err
            .as_database_error()
            .and_then(|db| db.code())
            .and_then(|code| code.parse::<i32>().ok())
            .map(|code| (code & 0xff).to_string());
        if primary.is_some_and(|code| BUSY_CODES.contains(&code.as_str())) {
            return true;
        }
    }
    let message = err.to_string().to_ascii_lowercase();
    BUSY_MESSAGES.iter().any(|m| message.contains(m))
}
