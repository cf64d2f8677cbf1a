//! Tests for budget seeding, update validation, and spending.

use chrono::NaiveDate;
use proptest::prelude::*;
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use grantbook_shared::types::DebitId;

use super::*;
use crate::fiscal::{FinancialYear, Month};
use crate::ledger::{Debit, LedgerError};
use crate::template::SLOT_COUNT;

fn update(slot: Option<u16>, total: Decimal) -> BudgetLineUpdate {
    BudgetLineUpdate {
        slot,
        total_allocation: total,
        monthly_allocations: MonthlyAllocations::new(),
    }
}

fn debit(item: &str, amount: Decimal) -> Debit {
    Debit {
        id: DebitId::new(1),
        document_number: None,
        loose_minute_number: None,
        receipt_number: None,
        date_paid: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
        month: Month::June,
        item_id: item.into(),
        sub_item_description: String::new(),
        code: String::new(),
        description: "Payment".into(),
        amount,
        supplier_name: String::new(),
        position: String::new(),
    }
}

#[test]
fn test_seed_lines_cover_template() {
    let lines = BudgetService::seed_lines();
    assert_eq!(lines.len(), SLOT_COUNT);
    assert!(lines.iter().all(|l| l.total_allocation.is_zero()));
    assert!(lines.iter().all(|l| l.monthly_allocations.len() == 12));
    assert_eq!(lines[0].item_key, "pow1_row1");
    assert_eq!(lines[41].item_key, "pow16_row42");
}

#[test]
fn test_missing_months_filled_with_zero() {
    let mut input = update(Some(3), dec!(1200));
    input.monthly_allocations.insert(Month::April, dec!(1000.50));

    let validated = BudgetService::validate_updates(&[input]).unwrap();
    let months = &validated[0].monthly_allocations;

    assert_eq!(months.len(), 12);
    assert_eq!(months[&Month::April], dec!(1000.50));
    assert_eq!(months[&Month::March], Decimal::ZERO);
    assert_eq!(validated[0].template.slot, 3);
}

#[rstest]
#[case(vec![update(None, dec!(1))])]
#[case(vec![update(Some(0), dec!(1))])]
#[case(vec![update(Some(43), dec!(1))])]
#[case(vec![update(Some(1), dec!(-0.01))])]
#[case(vec![update(Some(1), dec!(1)), update(Some(1), dec!(2))])]
#[case(vec![update(Some(1), dec!(1)), update(Some(2), dec!(2)), update(None, dec!(3))])]
fn test_bad_batch_rejected(#[case] batch: Vec<BudgetLineUpdate>) {
    assert!(matches!(
        BudgetService::validate_updates(&batch),
        Err(LedgerError::MalformedInput(_))
    ));
}

#[test]
fn test_negative_month_rejected() {
    let mut input = update(Some(5), dec!(100));
    input.monthly_allocations.insert(Month::July, dec!(-1));
    assert!(BudgetService::validate_updates(&[input]).is_err());
}

#[test]
fn test_compute_spending() {
    let mut lines = BudgetService::seed_lines();
    lines[0].total_allocation = dec!(10000);
    let debits = [debit("pow1_row1", dec!(1500)), debit("pow1_row1", dec!(500))];

    let spending = BudgetService::compute_spending(&lines, &debits);

    assert_eq!(spending.len(), SLOT_COUNT);
    assert_eq!(spending[0].spent, dec!(2000));
    assert_eq!(spending[0].balance, dec!(8000));
    assert_eq!(spending[1].spent, Decimal::ZERO);
}

#[test]
fn test_report_keeps_slot_order_and_header() {
    let mut lines = BudgetService::seed_lines();
    lines[1].total_allocation = dec!(300);
    let budget = Budget {
        financial_year: FinancialYear::parse("2026-2027").unwrap(),
        school_name: "Blantyre Secondary".into(),
        total_grant: dec!(50000),
        lines,
    };

    let report = BudgetService::report(budget, &[debit("pow1_row2", dec!(120))]);

    assert_eq!(report.school_name, "Blantyre Secondary");
    assert_eq!(report.total_grant, dec!(50000));
    assert_eq!(report.items[1].line.slot, 2);
    assert_eq!(report.items[1].balance, dec!(180));
}

#[test]
fn test_budget_line_json_field_names() {
    let line = &BudgetService::seed_lines()[0];
    let json = serde_json::to_value(line).unwrap();
    assert_eq!(json["id"], "pow1_row1");
    assert_eq!(json["powNo"], 1);
    assert_eq!(json["subItemDescription"], "Wages for support staff");
    assert_eq!(json["monthlyAllocations"]["April"], "0");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Any batch of distinct in-range slots with non-negative amounts passes.
    #[test]
    fn test_valid_batches_accepted(
        slots in prop::collection::btree_set(1u16..=42, 1..10),
        cents in 0i64..100_000_000,
    ) {
        let batch: Vec<BudgetLineUpdate> = slots
            .iter()
            .map(|s| update(Some(*s), Decimal::new(cents, 2)))
            .collect();
        let validated = BudgetService::validate_updates(&batch).unwrap();
        prop_assert_eq!(validated.len(), batch.len());
    }

    /// Spending never changes the allocation, only splits it.
    #[test]
    fn test_spent_plus_balance_is_allocation(
        allocation in 0i64..10_000_000,
        paid in prop::collection::vec(1i64..100_000, 0..10),
    ) {
        let mut lines = BudgetService::seed_lines();
        lines[4].total_allocation = Decimal::new(allocation, 2);
        let debits: Vec<Debit> = paid.iter().map(|c| debit("pow1_row5", Decimal::new(*c, 2))).collect();

        let row = &BudgetService::compute_spending(&lines, &debits)[4];
        prop_assert_eq!(row.spent + row.balance, row.allocated);
    }
}
