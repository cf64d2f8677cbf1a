//! Demo data seeder for Grantbook development.
//!
//! Migrates the configured store, onboards a demo school, gives it a budget,
//! records a grant tranche and two payments, and numbers the first voucher.
//! Running it again reuses the existing demo school.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use grantbook_core::audit::Actor;
use grantbook_core::budget::{BudgetLineUpdate, MonthlyAllocations};
use grantbook_core::fiscal::{FinancialYear, Month};
use grantbook_core::ledger::{CreditLineItem, NewCredit, NewDebit};
use grantbook_core::sequence::DocumentType;
use grantbook_core::settings::Settings;
use grantbook_core::tenant::{NewTenant, TenantContext};
use grantbook_db::migration::{Migrator, MigratorTrait};
use grantbook_db::{
    BudgetRepository, DocumentSequencer, LedgerRepository, SettingsRepository, TenantRepository,
    connect,
};
use grantbook_shared::AppConfig;
use grantbook_shared::types::{TenantId, parse_amount};

const DEMO_USERNAME: &str = "demo-school";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "grantbook=debug,sea_orm=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;
    let db = connect(&config.database)
        .await
        .context("failed to open database")?;
    Migrator::up(&db, None).await.context("failed to migrate")?;
    info!(url = %config.database.url, "store ready");

    let tenants = TenantRepository::new(db.clone(), config.tenancy.clone());
    let today = Utc::now().date_naive();
    let tenant_id = match tenants.find_by_username(DEMO_USERNAME).await? {
        Some(existing) => {
            info!(tenant_id = %existing.id, "demo school already exists, reusing it");
            existing.id
        }
        None => onboard_demo(&tenants, today).await?,
    };

    let year = FinancialYear::parse(&config.tenancy.default_financial_year)?;
    let ctx = TenantContext::new(tenant_id, year);

    seed_settings(&SettingsRepository::new(db.clone()), &ctx).await?;
    seed_budget(&BudgetRepository::new(db.clone()), &ctx).await?;
    seed_ledger(&LedgerRepository::new(db.clone()), &DocumentSequencer::new(db), &ctx, today)
        .await?;

    info!("seeding complete");
    Ok(())
}

async fn onboard_demo(
    tenants: &TenantRepository,
    today: chrono::NaiveDate,
) -> anyhow::Result<TenantId> {
    let tenant = tenants
        .onboard(
            &Actor::system("seeder"),
            &NewTenant {
                school_name: "Demo Community Day Secondary School".to_string(),
                username: DEMO_USERNAME.to_string(),
            },
            today,
        )
        .await?;
    Ok(tenant.id)
}

async fn seed_settings(repo: &SettingsRepository, ctx: &TenantContext) -> anyhow::Result<()> {
    let settings = Settings {
        school_name: "Demo Community Day Secondary School".to_string(),
        school_address: "P.O. Box 1, Lilongwe".to_string(),
        total_grant: Decimal::new(2_500_000, 0),
        compiled_by: "Bursar".to_string(),
        entered_by: "Accounts Clerk".to_string(),
        authorizing_officer: "Head Teacher".to_string(),
        ..Settings::default()
    };
    repo.save_settings(ctx, &settings).await?;
    Ok(())
}

async fn seed_budget(repo: &BudgetRepository, ctx: &TenantContext) -> anyhow::Result<()> {
    repo.ensure_budget_seeded(ctx).await?;

    // Amounts are written the way the budget form submits them.
    let allocations = [
        (1_u16, "600,000.00"),
        (3, "250,000"),
        (12, "400,000.00"),
        (30, "150,000"),
    ];
    let mut updates = Vec::with_capacity(allocations.len());
    for (slot, text) in allocations {
        let total = parse_amount(text).with_context(|| format!("allocation for slot {slot}"))?;
        let mut monthly = MonthlyAllocations::new();
        monthly.insert(Month::April, total / Decimal::from(4));
        updates.push(BudgetLineUpdate {
            slot: Some(slot),
            total_allocation: total,
            monthly_allocations: monthly,
        });
    }
    repo.save_budget(ctx, &updates).await?;
    Ok(())
}

async fn seed_ledger(
    ledger: &LedgerRepository,
    sequencer: &DocumentSequencer,
    ctx: &TenantContext,
    today: chrono::NaiveDate,
) -> anyhow::Result<()> {
    if !ledger.list_credits(ctx).await?.is_empty() {
        info!("demo ledger already has entries, skipping");
        return Ok(());
    }

    ledger
        .add_credit(
            ctx,
            NewCredit {
                date_received: today,
                month: Month::of_date(today),
                line_items: vec![
                    CreditLineItem {
                        item_id: "pow1_row1".to_string(),
                        amount: Decimal::new(300_000, 0),
                    },
                    CreditLineItem {
                        item_id: "pow7_row24".to_string(),
                        amount: Decimal::new(125_000, 0),
                    },
                ],
                remarks: "First quarter tranche".to_string(),
            },
        )
        .await?;

    let payments = [
        ("pow1_row1", "Chalk and exercise books", "45,250.00", "Lilongwe Stationers"),
        ("pow7_row24", "Laboratory reagents", "60,000", "Central Scientific Supplies"),
    ];
    let mut first = None;
    for (item_id, description, amount, supplier) in payments {
        let debit = ledger
            .add_debit_within_funds(
                ctx,
                NewDebit {
                    date_paid: today,
                    month: Month::of_date(today),
                    item_id: item_id.to_string(),
                    description: description.to_string(),
                    amount: parse_amount(amount)
                        .with_context(|| format!("payment amount for {item_id}"))?,
                    supplier_name: supplier.to_string(),
                    position: "Supplier".to_string(),
                },
            )
            .await?;
        first.get_or_insert(debit.id);
    }

    if let Some(debit_id) = first {
        let number = sequencer
            .assign(ctx, &debit_id.to_string(), DocumentType::Voucher)
            .await?;
        info!(debit_id = %debit_id, voucher = %number, "demo voucher numbered");
    }
    Ok(())
}
