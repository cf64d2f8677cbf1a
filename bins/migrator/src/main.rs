//! Schema migration runner for Grantbook.
//!
//! Reads `DATABASE_URL` (e.g. `sqlite://data/grantbook.db?mode=rwc`).
//!
//! Usage:
//!   migrator up      - Apply pending migrations
//!   migrator down    - Roll back the last migration
//!   migrator status  - Show which migrations are applied
//!   migrator fresh   - Drop every table and migrate from scratch

use grantbook_db::migration::Migrator;
use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // The CLI installs its own tracing subscriber.
    cli::run_cli(Migrator).await;
}
