//! Tenant lifecycle rules.

use chrono::{Days, NaiveDate};

use super::types::{NewTenant, SubscriptionStatus, Tenant};
use crate::ledger::{AccessDenied, LedgerError};

/// Tenant service for business logic.
pub struct TenantService;

impl TenantService {
    /// Validates onboarding input and returns it trimmed.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::MalformedInput` if the school name or username is
    /// blank, or the username contains whitespace.
    pub fn validate_new_tenant(input: &NewTenant) -> Result<NewTenant, LedgerError> {
        let school_name = input.school_name.trim();
        let username = input.username.trim();
        if school_name.is_empty() {
            return Err(LedgerError::MalformedInput("school name is required".into()));
        }
        if username.is_empty() {
            return Err(LedgerError::MalformedInput("username is required".into()));
        }
        if username.chars().any(char::is_whitespace) {
            return Err(LedgerError::MalformedInput(
                "username must not contain spaces".into(),
            ));
        }
        Ok(NewTenant {
            school_name: school_name.to_string(),
            username: username.to_string(),
        })
    }

    /// The trial window granted at onboarding.
    #[must_use]
    pub fn trial_window(today: NaiveDate, trial_days: u32) -> (NaiveDate, NaiveDate) {
        (today, add_days(today, trial_days))
    }

    /// The window covered by a payment made on `payment_date`.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::MalformedInput` if `days` is zero.
    pub fn subscription_window(
        payment_date: NaiveDate,
        days: u32,
    ) -> Result<(NaiveDate, NaiveDate), LedgerError> {
        if days == 0 {
            return Err(LedgerError::MalformedInput(
                "subscription length must be at least one day".into(),
            ));
        }
        Ok((payment_date, add_days(payment_date, days)))
    }

    /// True once a trial or paid window has ended but the status has not
    /// yet been switched to `Expired`. The end date itself is still usable.
    #[must_use]
    pub fn has_lapsed(tenant: &Tenant, today: NaiveDate) -> bool {
        match tenant.subscription_status {
            SubscriptionStatus::Lifetime | SubscriptionStatus::Expired => false,
            _ => tenant.subscription_end.is_some_and(|end| end < today),
        }
    }

    /// Decides whether a tenant may sign in today.
    ///
    /// # Errors
    ///
    /// Returns the reason access is refused: locked, inactive, or an expired
    /// trial or subscription.
    pub fn check_access(tenant: &Tenant, today: NaiveDate) -> Result<(), AccessDenied> {
        if tenant.is_locked {
            return Err(AccessDenied::Locked);
        }
        if !tenant.is_active {
            return Err(AccessDenied::Inactive);
        }
        match tenant.subscription_status {
            SubscriptionStatus::Lifetime => Ok(()),
            SubscriptionStatus::Expired => Err(AccessDenied::SubscriptionExpired),
            SubscriptionStatus::Trial if Self::has_lapsed(tenant, today) => {
                Err(AccessDenied::TrialExpired)
            }
            _ if Self::has_lapsed(tenant, today) => Err(AccessDenied::SubscriptionExpired),
            _ => Ok(()),
        }
    }

    /// True if the tenant should be warned that its window is ending within
    /// `window_days`. Already-expired and lifetime tenants are never warned.
    #[must_use]
    pub fn needs_expiry_warning(tenant: &Tenant, today: NaiveDate, window_days: u32) -> bool {
        if matches!(
            tenant.subscription_status,
            SubscriptionStatus::Expired | SubscriptionStatus::Lifetime
        ) {
            return false;
        }
        let horizon = add_days(today, window_days);
        tenant.subscription_end.is_some_and(|end| end <= horizon)
    }

    /// Text of the expiry warning sent to a tenant.
    #[must_use]
    pub fn expiry_warning_text(tenant: &Tenant, today: NaiveDate) -> String {
        let kind = if tenant.subscription_status == SubscriptionStatus::Trial {
            "trial"
        } else {
            "subscription"
        };
        match tenant.subscription_end {
            Some(end) if end >= today => {
                let days = (end - today).num_days();
                format!(
                    "Your {kind} ends on {end} ({days} day(s) remaining). Please contact the administrator to renew."
                )
            }
            Some(end) => format!(
                "Your {kind} ended on {end}. Please contact the administrator to renew."
            ),
            None => format!("Your {kind} is ending soon. Please contact the administrator to renew."),
        }
    }
}

fn add_days(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX)
}
