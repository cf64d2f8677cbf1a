//! Schema migrations for the grant ledger.
//!
//! Applied on startup by the seeder and on demand by the `grantbook-migrator`
//! binary. Table creation is idempotent, so re-running `up` is harmless.

pub use sea_orm_migration::prelude::*;

mod m20260301_000001_initial;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20260301_000001_initial::Migration)]
    }
}
