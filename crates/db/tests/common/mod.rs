//! Shared fixtures for repository integration tests.
//!
//! Each test gets its own SQLite file in a temporary directory, migrated
//! from scratch, so tests can run in parallel without sharing state.

#![allow(dead_code)]

use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use tempfile::TempDir;

use grantbook_core::audit::Actor;
use grantbook_core::fiscal::FinancialYear;
use grantbook_core::tenant::{NewTenant, TenantContext};
use grantbook_db::migration::{Migrator, MigratorTrait};
use grantbook_db::{TenantRepository, connect};
use grantbook_shared::types::TenantId;
use grantbook_shared::{DatabaseConfig, TenancyConfig};

/// A migrated database that lives as long as the value.
pub struct TestDb {
    pub db: DatabaseConnection,
    _dir: TempDir,
}

/// Creates and migrates a fresh database.
pub async fn setup() -> TestDb {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let url = format!("sqlite://{}", dir.path().join("grantbook.db").display());
    let mut config = DatabaseConfig::new(url);
    config.max_connections = 8;

    let db = connect(&config).await.expect("Failed to open database");
    Migrator::up(&db, None).await.expect("Failed to migrate");
    TestDb { db, _dir: dir }
}

/// The day tests treat as today.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 4, 1).expect("valid date")
}

pub fn operator() -> Actor {
    Actor::operator("ops")
}

/// Onboards a school and returns its id.
pub async fn onboard(db: &DatabaseConnection, username: &str) -> TenantId {
    TenantRepository::new(db.clone(), TenancyConfig::default())
        .onboard(
            &operator(),
            &NewTenant {
                school_name: format!("{username} Secondary School"),
                username: username.to_string(),
            },
            today(),
        )
        .await
        .expect("Failed to onboard tenant")
        .id
}

/// A context for `tenant` in `year`.
pub fn ctx(tenant: TenantId, year: &str) -> TenantContext {
    TenantContext::new(tenant, FinancialYear::parse(year).expect("valid year"))
}
