//! Integration tests for the ledger repository.

mod common;

use chrono::NaiveDate;
use futures::future::join_all;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use grantbook_core::budget::BudgetLineUpdate;
use grantbook_core::fiscal::Month;
use grantbook_core::ledger::{CreditLineItem, LedgerError, NewCredit, NewDebit};
use grantbook_core::settings::Settings;
use grantbook_core::tenant::TenantContext;
use grantbook_db::{BudgetRepository, LedgerRepository, SettingsRepository};

use common::{ctx, onboard, setup};

const ITEM: &str = "pow1_row1";

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, month, day).expect("valid date")
}

fn credit(item: &str, amount: Decimal) -> NewCredit {
    NewCredit {
        date_received: date(4, 10),
        month: Month::April,
        line_items: vec![CreditLineItem {
            item_id: item.to_string(),
            amount,
        }],
        remarks: "first tranche".into(),
    }
}

fn debit(item: &str, amount: Decimal, month: Month) -> NewDebit {
    NewDebit {
        date_paid: date(5, 3),
        month,
        item_id: item.to_string(),
        description: "Exercise books".into(),
        amount,
        supplier_name: "Mzuzu Stationers".into(),
        position: "Supplier".into(),
    }
}

async fn fund(repo: &LedgerRepository, ctx: &TenantContext, amount: Decimal) {
    repo.add_credit(ctx, credit(ITEM, amount)).await.unwrap();
}

#[tokio::test]
async fn test_balance_is_credits_minus_debits() {
    let test = setup().await;
    let tenant = onboard(&test.db, "likoma").await;
    let year = ctx(tenant, "2026-2027");
    let repo = LedgerRepository::new(test.db.clone());

    BudgetRepository::new(test.db.clone())
        .save_budget(
            &year,
            &[BudgetLineUpdate {
                slot: Some(1),
                total_allocation: dec!(10000),
                monthly_allocations: Default::default(),
            }],
        )
        .await
        .unwrap();
    fund(&repo, &year, dec!(2500)).await;
    fund(&repo, &year, dec!(1500)).await;
    repo.add_debit(&year, debit(ITEM, dec!(1500), Month::May)).await.unwrap();

    let funds = repo.available_funds(&year).await.unwrap();
    let position = funds.get(ITEM).unwrap();
    assert_eq!(position.budgeted, dec!(10000));
    assert_eq!(position.credited, dec!(4000));
    assert_eq!(position.spent, dec!(1500));
    assert_eq!(position.balance, dec!(2500));
    // Every seeded line shows up, even without activity.
    assert_eq!(funds.len(), 42);
    assert_eq!(funds.balance("pow16_row42"), dec!(0));
}

#[tokio::test]
async fn test_stored_records_read_back() {
    let test = setup().await;
    let tenant = onboard(&test.db, "nkhotakota").await;
    let year = ctx(tenant, "2026-2027");
    let repo = LedgerRepository::new(test.db.clone());

    let stored = repo.add_credit(&year, credit(ITEM, dec!(2500.25))).await.unwrap();
    assert!(stored.id.to_string().starts_with("credit_"));

    let credits = repo.list_credits(&year).await.unwrap();
    assert_eq!(credits.len(), 1);
    assert_eq!(credits[0].total(), dec!(2500.25));
    assert_eq!(credits[0].remarks, "first tranche");

    let paid = repo
        .add_debit(&year, debit(ITEM, dec!(99.99), Month::May))
        .await
        .unwrap();
    assert!(paid.document_number.is_none());
    assert_eq!(paid.code.len(), 10);
    assert!(!paid.sub_item_description.is_empty());

    let found = repo
        .get_debit(&year, &paid.id.to_string())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found, paid);
    assert_eq!(found.amount.to_string(), "99.99");
}

#[tokio::test]
async fn test_malformed_records_are_rejected() {
    let test = setup().await;
    let tenant = onboard(&test.db, "rumphi").await;
    let year = ctx(tenant, "2026-2027");
    let repo = LedgerRepository::new(test.db.clone());

    let err = repo
        .add_credit(&year, credit("pow99_row1", dec!(10)))
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::MalformedInput(_)));

    let err = repo
        .add_debit(&year, debit(ITEM, dec!(0), Month::May))
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::MalformedInput(_)));

    assert!(repo.list_credits(&year).await.unwrap().is_empty());
    assert!(repo.list_debits(&year).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_other_tenants_rows_are_invisible() {
    let test = setup().await;
    let owner = onboard(&test.db, "nsanje").await;
    let intruder = onboard(&test.db, "chikwawa").await;
    let owner_year = ctx(owner, "2026-2027");
    let intruder_year = ctx(intruder, "2026-2027");
    let repo = LedgerRepository::new(test.db.clone());

    let received = repo.add_credit(&owner_year, credit(ITEM, dec!(800))).await.unwrap();
    let paid = repo
        .add_debit(&owner_year, debit(ITEM, dec!(300), Month::May))
        .await
        .unwrap();

    assert!(repo.list_credits(&intruder_year).await.unwrap().is_empty());
    assert!(repo.list_debits(&intruder_year).await.unwrap().is_empty());
    assert!(
        repo.get_debit(&intruder_year, &paid.id.to_string())
            .await
            .unwrap()
            .is_none()
    );

    assert!(!repo.delete_credit(&intruder_year, &received.id.to_string()).await.unwrap());
    assert!(!repo.delete_debit(&intruder_year, &paid.id.to_string()).await.unwrap());
    assert_eq!(repo.list_credits(&owner_year).await.unwrap().len(), 1);
    assert_eq!(repo.list_debits(&owner_year).await.unwrap().len(), 1);

    assert!(repo.delete_debit(&owner_year, &paid.id.to_string()).await.unwrap());
    assert!(repo.list_debits(&owner_year).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_years_are_separate_ledgers() {
    let test = setup().await;
    let tenant = onboard(&test.db, "phalombe").await;
    let repo = LedgerRepository::new(test.db.clone());

    fund(&repo, &ctx(tenant, "2026-2027"), dec!(500)).await;
    assert!(repo.list_credits(&ctx(tenant, "2027-2028")).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unparseable_ids_are_no_ops() {
    let test = setup().await;
    let tenant = onboard(&test.db, "thyolo").await;
    let year = ctx(tenant, "2026-2027");
    let repo = LedgerRepository::new(test.db.clone());

    assert!(!repo.delete_credit(&year, "credit_abc").await.unwrap());
    assert!(!repo.delete_debit(&year, "voucher_1").await.unwrap());
    assert!(repo.get_debit(&year, "").await.unwrap().is_none());
}

#[tokio::test]
async fn test_spending_beyond_funds_is_refused() {
    let test = setup().await;
    let tenant = onboard(&test.db, "mwanza").await;
    let year = ctx(tenant, "2026-2027");
    let repo = LedgerRepository::new(test.db.clone());

    fund(&repo, &year, dec!(1000)).await;
    repo.add_debit_within_funds(&year, debit(ITEM, dec!(600), Month::May))
        .await
        .unwrap();

    let err = repo
        .add_debit_within_funds(&year, debit(ITEM, dec!(400.01), Month::May))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        LedgerError::InsufficientFunds {
            item_id: ITEM.to_string(),
            available: dec!(400),
            requested: dec!(400.01),
        }
    );
    assert_eq!(repo.list_debits(&year).await.unwrap().len(), 1);

    // Exactly the remaining balance is allowed.
    repo.add_debit_within_funds(&year, debit(ITEM, dec!(400), Month::May))
        .await
        .unwrap();
    assert_eq!(repo.available_funds(&year).await.unwrap().balance(ITEM), dec!(0));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_spending_never_overdraws() {
    let test = setup().await;
    let tenant = onboard(&test.db, "neno").await;
    let year = ctx(tenant, "2026-2027");
    fund(&LedgerRepository::new(test.db.clone()), &year, dec!(1000)).await;

    let tasks = (0..10).map(|_| {
        let repo = LedgerRepository::new(test.db.clone());
        let year = year.clone();
        tokio::spawn(async move {
            repo.add_debit_within_funds(&year, debit(ITEM, dec!(300), Month::July))
                .await
        })
    });
    let results: Vec<_> = join_all(tasks)
        .await
        .into_iter()
        .map(|r| r.expect("task panicked"))
        .collect();

    let accepted = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(accepted, 3);
    for result in results.iter().filter_map(|r| r.as_ref().err()) {
        assert!(matches!(result, LedgerError::InsufficientFunds { .. }));
    }

    let repo = LedgerRepository::new(test.db.clone());
    assert_eq!(repo.list_debits(&year).await.unwrap().len(), 3);
    assert_eq!(repo.available_funds(&year).await.unwrap().balance(ITEM), dec!(100));
}

#[tokio::test]
async fn test_grant_summary_buckets_by_fiscal_month() {
    let test = setup().await;
    let tenant = onboard(&test.db, "machinga").await;
    let year = ctx(tenant, "2026-2027");
    let repo = LedgerRepository::new(test.db.clone());

    let mut settings = Settings::default();
    settings.school_name = "Machinga CDSS".into();
    settings.total_grant = dec!(50000);
    SettingsRepository::new(test.db.clone())
        .save_settings(&year, &settings)
        .await
        .unwrap();
    BudgetRepository::new(test.db.clone())
        .save_budget(
            &year,
            &[BudgetLineUpdate {
                slot: Some(1),
                total_allocation: dec!(20000),
                monthly_allocations: Default::default(),
            }],
        )
        .await
        .unwrap();

    fund(&repo, &year, dec!(10000)).await;
    repo.add_debit(&year, debit(ITEM, dec!(4000), Month::May)).await.unwrap();
    repo.add_debit(&year, debit(ITEM, dec!(1500), Month::March)).await.unwrap();

    let summary = repo.grant_summary(&year).await.unwrap();
    assert_eq!(summary.total_grant, dec!(50000));
    assert_eq!(summary.total_budgeted, dec!(20000));
    assert_eq!(summary.unallocated, dec!(30000));
    assert_eq!(summary.total_credited, dec!(10000));
    assert_eq!(summary.total_spent, dec!(5500));
    assert_eq!(summary.cash_balance, dec!(4500));
    assert_eq!(summary.monthly_credits[0], dec!(10000));
    assert_eq!(summary.monthly_debits[1], dec!(4000));
    assert_eq!(summary.monthly_debits[11], dec!(1500));

    let report = repo.budget_report(&year).await.unwrap();
    assert_eq!(report.school_name, "Machinga CDSS");
    assert_eq!(report.items[0].spent, dec!(5500));
    assert_eq!(report.items[0].balance, dec!(14500));

    let spending = repo.spending(&year).await.unwrap();
    assert_eq!(spending.len(), 42);
    assert_eq!(spending[0].spent, dec!(5500));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_budget_report_reads_one_snapshot() {
    let test = setup().await;
    let tenant = onboard(&test.db, "dedza").await;
    let year = ctx(tenant, "2026-2027");

    // Each round raises the allocation first and then spends the raise, so a
    // consistent report always shows a balance of either 0 or 100.
    let writer = {
        let db = test.db.clone();
        let year = year.clone();
        tokio::spawn(async move {
            let budget = BudgetRepository::new(db.clone());
            let ledger = LedgerRepository::new(db);
            for round in 1..=20_i64 {
                budget
                    .save_budget(
                        &year,
                        &[BudgetLineUpdate {
                            slot: Some(1),
                            total_allocation: Decimal::new(100 * round, 0),
                            monthly_allocations: Default::default(),
                        }],
                    )
                    .await
                    .unwrap();
                ledger
                    .add_debit(&year, debit(ITEM, dec!(100), Month::May))
                    .await
                    .unwrap();
            }
        })
    };

    let readers = (0..3).map(|_| {
        let repo = LedgerRepository::new(test.db.clone());
        let year = year.clone();
        tokio::spawn(async move {
            let mut balances = Vec::new();
            for _ in 0..30 {
                let report = repo.budget_report(&year).await.unwrap();
                balances.push(report.items[0].balance);
            }
            balances
        })
    });
    let seen: Vec<Decimal> = join_all(readers)
        .await
        .into_iter()
        .flat_map(|r| r.expect("task panicked"))
        .collect();
    writer.await.expect("writer panicked");

    for balance in seen {
        assert!(
            balance == dec!(0) || balance == dec!(100),
            "report mixed two states: balance {balance}"
        );
    }
}
