//! Typed row IDs with stable external references.
//!
//! Rows are keyed by SQLite integer ids. Callers outside the store address them
//! through a prefixed external form (`credit_42`) so a `DebitId` can never be
//! handed where a `CreditId` is expected, even as a string.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when an external reference cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} reference: {input:?}")]
pub struct IdParseError {
    /// Expected reference kind (the prefix).
    pub kind: &'static str,
    /// The rejected input.
    pub input: String,
}

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $prefix:literal, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Prefix used by the external reference form.
            pub const PREFIX: &'static str = $prefix;

            /// Creates an ID from a raw row id.
            #[must_use]
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Returns the raw row id.
            #[must_use]
            pub const fn into_inner(self) -> i64 {
                self.0
            }

            /// Returns the external reference (e.g. `credit_42`).
            #[must_use]
            pub fn to_external(self) -> String {
                format!("{}_{}", $prefix, self.0)
            }

            /// Parses an external reference, rejecting other prefixes.
            ///
            /// # Errors
            ///
            /// Returns `IdParseError` if the prefix or the number is wrong.
            pub fn parse_external(input: &str) -> Result<Self, IdParseError> {
                let err = || IdParseError {
                    kind: $prefix,
                    input: input.to_string(),
                };
                let digits = input
                    .trim()
                    .strip_prefix($prefix)
                    .and_then(|rest| rest.strip_prefix('_'))
                    .ok_or_else(err)?;
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(err());
                }
                digits.parse::<i64>().map(Self).map_err(|_| err())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}_{}", $prefix, self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse_external(s)
            }
        }
    };
}

typed_id!(TenantId, "tenant", "Unique identifier for a tenant (school).");
typed_id!(CreditId, "credit", "Unique identifier for a credit entry.");
typed_id!(DebitId, "debit", "Unique identifier for a debit entry.");
typed_id!(MessageId, "message", "Unique identifier for a subscription message.");

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
