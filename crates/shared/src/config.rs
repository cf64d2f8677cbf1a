//! Application configuration management.

use std::time::Duration;

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Tenant lifecycle configuration.
    #[serde(default)]
    pub tenancy: TenancyConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL (e.g. `sqlite://data/grantbook.db?mode=rwc`).
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// How long a writer waits for the store lock before giving up.
    #[serde(default = "default_busy_timeout")]
    pub busy_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_busy_timeout() -> u64 {
    10
}

impl DatabaseConfig {
    /// Creates a configuration for `url` with default pool sizing and timeout.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            busy_timeout_secs: default_busy_timeout(),
        }
    }

    /// Returns the busy timeout as a `Duration`.
    #[must_use]
    pub const fn busy_timeout(&self) -> Duration {
        Duration::from_secs(self.busy_timeout_secs)
    }
}

/// Tenant lifecycle configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TenancyConfig {
    /// Length of the trial granted at onboarding.
    #[serde(default = "default_trial_days")]
    pub trial_days: u32,
    /// Financial year used when the caller does not supply one.
    #[serde(default = "default_financial_year")]
    pub default_financial_year: String,
    /// Subscriptions ending within this many days receive a warning.
    #[serde(default = "default_expiry_warning_days")]
    pub expiry_warning_days: u32,
}

fn default_trial_days() -> u32 {
    30
}

fn default_financial_year() -> String {
    "2026-2027".to_string()
}

fn default_expiry_warning_days() -> u32 {
    7
}

impl Default for TenancyConfig {
    fn default() -> Self {
        Self {
            trial_days: default_trial_days(),
            default_financial_year: default_financial_year(),
            expiry_warning_days: default_expiry_warning_days(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("GRANTBOOK").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
