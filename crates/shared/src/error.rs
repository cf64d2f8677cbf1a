//! Outward-facing error shape.
//!
//! Domain crates keep their own precise error enums. At the boundary they
//! collapse into an [`AppError`]: a coarse [`ErrorKind`] that a caller can
//! branch on, plus the rendered domain message.

use std::fmt;

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Coarse classification of a failed ledger request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller did not resolve to a tenant.
    NoTenant,
    /// The tenant exists but may not use the ledger right now.
    AccessDenied,
    /// The addressed record is absent or belongs to someone else.
    NotFound,
    /// The request itself was malformed.
    Rejected,
    /// The request clashed with stored state (duplicates, overspending).
    Conflict,
    /// The store was locked by a concurrent writer.
    Busy,
    /// The store failed.
    Storage,
}

impl ErrorKind {
    /// HTTP-equivalent status for presentation layers.
    #[must_use]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::NoTenant => 401,
            Self::AccessDenied => 403,
            Self::NotFound => 404,
            Self::Rejected => 400,
            Self::Conflict => 409,
            Self::Busy => 503,
            Self::Storage => 500,
        }
    }

    /// Stable machine-readable code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoTenant => "NO_TENANT",
            Self::AccessDenied => "ACCESS_DENIED",
            Self::NotFound => "NOT_FOUND",
            Self::Rejected => "REJECTED",
            Self::Conflict => "CONFLICT",
            Self::Busy => "STORE_BUSY",
            Self::Storage => "STORAGE_ERROR",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified failure with its human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    kind: ErrorKind,
    message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    /// Only a busy store is worth retrying unchanged.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self.kind, ErrorKind::Busy)
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
