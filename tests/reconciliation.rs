use std::collections::HashMap;

use chrono::NaiveDate;

use envelope_reconcile::models::{
    AccountId, BudgetPeriod, CategoryBalance, CategoryGroup, CategoryId, GroupKind, Money,
    PeriodSpan, Split, Transaction,
};
use envelope_reconcile::services::balance::{roll_forward, BudgetStatus};
use envelope_reconcile::services::split::{remaining, rows_from_transaction};
use envelope_reconcile::services::{
    apply_preset, auto_distribute_remaining, compute_available, compute_unassigned,
    find_overspent, to_persisted_splits, validate_splits, BudgetOverview, IncomeBasis,
    OverviewInput, PresetKind, SplitError, SplitRow, SplitSign,
};
use envelope_reconcile::wire::{ReplaceSplitsRequest, TransactionDto};
use envelope_reconcile::EnvelopeError;

fn dollars(text: &str) -> Money {
    Money::parse(text).unwrap()
}

fn row(text: &str) -> SplitRow {
    SplitRow::new(None, dollars(text))
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
}

#[test]
fn available_adds_carryover_and_assigned_minus_spent() {
    assert_eq!(
        compute_available(dollars("50"), dollars("200"), dollars("80")),
        dollars("170")
    );
}

#[test]
fn available_keeps_negative_results() {
    for (c, a, s) in [(0, 0, 1), (-500, 100, 0), (250, 0, 1000), (0, 0, 0)] {
        let (c, a, s) = (Money::from_cents(c), Money::from_cents(a), Money::from_cents(s));
        assert_eq!(compute_available(c, a, s), c + a - s);
    }
}

#[test]
fn unassigned_is_income_minus_assignments() {
    let assignments = HashMap::from([
        (CategoryId::new(), dollars("1200")),
        (CategoryId::new(), dollars("400")),
    ]);
    let unassigned = compute_unassigned(dollars("3000"), &assignments);

    assert_eq!(unassigned, dollars("1400"));
    assert_eq!(
        BudgetStatus::from_unassigned(unassigned),
        BudgetStatus::Unbudgeted(dollars("1400"))
    );
}

#[test]
fn unassigned_is_zero_exactly_when_fully_assigned() {
    let assignments = HashMap::from([
        (CategoryId::new(), dollars("1000.01")),
        (CategoryId::new(), dollars("1999.99")),
    ]);

    assert!(compute_unassigned(dollars("3000"), &assignments).is_zero());
    assert!(!compute_unassigned(dollars("3000.01"), &assignments).is_zero());
    assert!(compute_unassigned(dollars("2999.99"), &assignments).is_negative());
    assert!(compute_unassigned(Money::zero(), &HashMap::new()).is_zero());
}

#[test]
fn splits_one_cent_short_are_rejected() {
    let rows = vec![row("30"), row("69.99")];

    assert_eq!(
        validate_splits(&rows, dollars("-100")),
        Err(SplitError::AmountMismatch {
            expected: dollars("100"),
            actual: dollars("99.99"),
        })
    );
    assert_eq!(remaining(&rows, dollars("-100")), dollars("0.01"));

    // the request body is never built from rows that do not balance
    assert!(ReplaceSplitsRequest::build(&rows, dollars("-100")).is_err());
}

#[test]
fn halves_preset_splits_evenly() {
    let rows = apply_preset(PresetKind::EqualHalves, dollars("100"));

    let amounts: Vec<String> = rows.iter().map(|r| r.amount.to_decimal_string()).collect();
    assert_eq!(amounts, vec!["50.00", "50.00"]);
    assert!(rows.iter().all(|r| r.category_id.is_none()));
}

#[test]
fn overspent_keeps_only_negative_available() {
    let overspent = CategoryBalance::new(CategoryId::new(), Money::zero(), Money::zero(), dollars("5"));
    let funded = CategoryBalance::new(CategoryId::new(), Money::zero(), dollars("10"), Money::zero());

    assert_eq!(overspent.available(), dollars("-5"));
    assert_eq!(find_overspent(&[overspent, funded]), vec![overspent]);
}

#[test]
fn presets_always_balance() {
    for target in ["100", "-100", "0.01", "0.05", "1234.57", "-99.99"] {
        for kind in [
            PresetKind::EqualHalves,
            PresetKind::EqualThirds,
            PresetKind::EqualQuarters,
        ] {
            let rows = apply_preset(kind, dollars(target));
            assert_eq!(rows.len(), kind.row_count());
            assert!(validate_splits(&rows, dollars(target)).is_ok(), "{kind} of {target}");
        }
    }

    let reset = apply_preset(PresetKind::Reset, dollars("100"));
    assert_eq!(reset, vec![SplitRow::default()]);
}

#[test]
fn distribute_is_idempotent() {
    let rows = vec![row("60"), row("10.01")];

    let once = auto_distribute_remaining(rows, dollars("-100"));
    assert_eq!(once[1].amount, dollars("39.99"));

    let twice = auto_distribute_remaining(once.clone(), dollars("-100"));
    assert_eq!(twice, once);
}

#[test]
fn thirds_of_three_hundred_round_trip() {
    let rows = apply_preset(PresetKind::EqualThirds, dollars("300"));
    let splits = to_persisted_splits(&rows, SplitSign::Negative);

    assert_eq!(splits.len(), 3);
    assert!(splits.iter().all(|s| s.amount == dollars("-100")));
    assert_eq!(splits.iter().map(|s| s.amount).sum::<Money>(), dollars("-300"));
}

#[test]
fn split_editor_round_trip_through_transaction() {
    let groceries = CategoryId::new();
    let household = CategoryId::new();
    let target = dollars("-84.50");

    let rows = vec![
        SplitRow::new(Some(groceries), dollars("60")),
        SplitRow::new(Some(household), Money::zero()),
    ];
    let rows = auto_distribute_remaining(rows, target);
    validate_splits(&rows, target).unwrap();

    let mut txn = Transaction::new(AccountId::new(), date(3), target);
    txn.set_splits(to_persisted_splits(&rows, SplitSign::of(target)));
    assert!(txn.validate().is_ok());
    assert_eq!(txn.splits[1].amount, dollars("-24.50"));

    assert_eq!(rows_from_transaction(&txn), rows);
}

#[test]
fn wire_transaction_mismatch_is_rejected() {
    let json = r#"{
        "accountId": "11111111-1111-4111-8111-111111111111",
        "date": "2025-01-05",
        "amount": -100,
        "splits": [{"amount": "-30"}, {"amount": "-69.99"}]
    }"#;
    let dto: TransactionDto = serde_json::from_str(json).unwrap();

    let err = dto.into_transaction().unwrap_err();
    assert!(matches!(err, EnvelopeError::AmountMismatch { .. }));
    assert!(err.is_validation());
}

#[test]
fn overview_end_to_end() {
    let mut paychecks = CategoryGroup::new("Paychecks", GroupKind::Income);
    let salary = paychecks.add_category("Salary");
    let mut needs = CategoryGroup::new("Needs", GroupKind::Expense);
    let groceries = needs.add_category("Groceries");
    let dining = needs.add_category("Dining Out");

    let period = BudgetPeriod::new(PeriodSpan::monthly(2025, 1)).with_expected_income(dollars("3000"));
    let account = AccountId::new();

    let mut shop = Transaction::new(account, date(10), dollars("-120"));
    shop.set_splits(vec![
        Split::new(Some(groceries), dollars("-90")),
        Split::new(Some(dining), dollars("-30")),
    ]);
    let transactions = vec![
        Transaction::categorized(account, date(1), dollars("2800"), salary),
        shop,
        Transaction::categorized(account, date(12), dollars("15"), groceries),
        // outside the period
        Transaction::categorized(
            account,
            NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            dollars("-500"),
            dining,
        ),
    ];

    let assignments = HashMap::from([(groceries, dollars("400")), (dining, dollars("20"))]);
    let carryover = HashMap::from([(dining, dollars("5"))]);
    let groups = [paychecks, needs];

    let build = |income_basis| {
        BudgetOverview::build(OverviewInput {
            period: &period,
            groups: &groups,
            assignments: &assignments,
            carryover: &carryover,
            transactions: &transactions,
            income_basis,
        })
    };

    let overview = build(IncomeBasis::Expected);
    assert_eq!(overview.sections.len(), 1);

    let groceries_row = overview.row(groceries).unwrap();
    assert_eq!(groceries_row.balance.spent(), dollars("75"));
    assert_eq!(groceries_row.balance.available(), dollars("325"));

    let dining_row = overview.row(dining).unwrap();
    assert_eq!(dining_row.balance.available(), dollars("-5"));
    assert_eq!(overview.overspent.len(), 1);
    assert_eq!(overview.overspent[0].category_id(), dining);

    assert_eq!(overview.totals.available, dollars("320"));
    assert_eq!(overview.unassigned, dollars("2580"));

    let actual = build(IncomeBasis::Actual);
    assert_eq!(actual.total_income, dollars("2800"));
    assert_eq!(actual.unassigned, dollars("2380"));

    let next = roll_forward(&overview.balances().copied().collect::<Vec<_>>());
    assert_eq!(next[&dining], dollars("-5"));
    assert_eq!(next[&groceries], dollars("325"));
}
