//! The scope every ledger operation runs in.

use grantbook_shared::types::TenantId;

use crate::fiscal::FinancialYear;
use crate::ledger::LedgerError;

/// A resolved tenant and financial year.
///
/// Storage operations take a `&TenantContext` and filter every read and
/// write by both fields. The only way to build one is from a concrete
/// `TenantId`, so a request without a tenant never reaches storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantContext {
    tenant_id: TenantId,
    financial_year: FinancialYear,
}

impl TenantContext {
    /// Creates a context from already-validated parts.
    #[must_use]
    pub const fn new(tenant_id: TenantId, financial_year: FinancialYear) -> Self {
        Self {
            tenant_id,
            financial_year,
        }
    }

    /// Resolves a context from what the authentication layer supplied.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NotAuthorized` when no tenant is present, and
    /// `LedgerError::MalformedInput` when the year label cannot be normalized.
    pub fn resolve(tenant_id: Option<TenantId>, financial_year: &str) -> Result<Self, LedgerError> {
        let tenant_id = tenant_id.ok_or(LedgerError::NotAuthorized)?;
        let financial_year = FinancialYear::parse(financial_year)?;
        Ok(Self::new(tenant_id, financial_year))
    }

    /// The owning tenant.
    #[must_use]
    pub const fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }

    /// The financial year being addressed.
    #[must_use]
    pub const fn financial_year(&self) -> &FinancialYear {
        &self.financial_year
    }

    /// The same tenant in a different year.
    #[must_use]
    pub fn with_year(&self, financial_year: FinancialYear) -> Self {
        Self::new(self.tenant_id, financial_year)
    }
}
