use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

#[test]
fn test_availability_from_totals() {
    let avail = LedgerService::availability(
        vec![dec!(1000), dec!(500)],
        vec![dec!(200), dec!(100)],
    );

    assert_eq!(avail.allocated, dec!(1500));
    assert_eq!(avail.approved, dec!(300));
    assert_eq!(avail.raw(), dec!(1200));
    assert_eq!(avail.display(), dec!(1200));
}

#[test]
fn test_empty_scope_is_zero() {
    let avail = LedgerService::availability(vec![], vec![]);
    assert_eq!(avail.raw(), dec!(0));
    assert_eq!(avail.display(), dec!(0));
}

#[test]
fn test_overcommitted_scope_reports_negative_raw() {
    let avail = Availability::new(dec!(1000), dec!(1300));
    assert_eq!(avail.raw(), dec!(-300));
    // Consumer-facing figure is floored.
    assert_eq!(avail.display(), dec!(0));
}

#[test]
fn test_draw_within_budget() {
    let avail = Availability::new(dec!(1000), dec!(0));
    let snapshot = LedgerService::check_category_draw(&avail, dec!(600)).unwrap();

    assert_eq!(snapshot.before, dec!(1000));
    assert_eq!(snapshot.after, dec!(400));
}

#[test]
fn test_draw_exactly_exhausts_budget() {
    let avail = Availability::new(dec!(1000), dec!(600));
    let snapshot = LedgerService::check_category_draw(&avail, dec!(400)).unwrap();

    assert_eq!(snapshot.before, dec!(400));
    assert_eq!(snapshot.after, dec!(0));
}

#[test]
fn test_draw_exceeding_budget_fails() {
    // Scenario: 1000 allocated, 600 already approved, 500 requested.
    let avail = Availability::new(dec!(1000), dec!(600));
    let err = LedgerService::check_category_draw(&avail, dec!(500)).unwrap_err();

    assert_eq!(
        err,
        LedgerError::InsufficientBudget {
            requested: dec!(500),
            available: dec!(400),
        }
    );
}

#[test]
fn test_overcommitted_draw_reports_floored_available() {
    let avail = Availability::new(dec!(100), dec!(250));
    let err = LedgerService::check_category_draw(&avail, dec!(10)).unwrap_err();

    match err {
        LedgerError::InsufficientBudget { available, .. } => {
            assert_eq!(available, dec!(0));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_department_draw_carries_name() {
    let avail = Availability::new(dec!(100), dec!(80));
    let err =
        LedgerService::check_department_draw(&avail, dec!(50), "Operations").unwrap_err();

    assert_eq!(
        err,
        LedgerError::InsufficientDepartmentBudget {
            department: "Operations".to_string(),
            requested: dec!(50),
            available: dec!(20),
        }
    );
}

#[test]
fn test_department_draw_within_budget() {
    let avail = Availability::new(dec!(100), dec!(20));
    let snapshot =
        LedgerService::check_department_draw(&avail, dec!(30), "Operations").unwrap();

    assert_eq!(snapshot.before, dec!(80));
    assert_eq!(snapshot.after, dec!(50));
}

fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// raw() is always allocated - approved, display() never negative.
    #[test]
    fn prop_availability_algebra(
        allocated in amount_strategy(),
        approved in amount_strategy(),
    ) {
        let avail = Availability::new(allocated, approved);

        prop_assert_eq!(avail.raw(), allocated - approved);
        prop_assert!(avail.display() >= Decimal::ZERO);
        if avail.raw() >= Decimal::ZERO {
            prop_assert_eq!(avail.display(), avail.raw());
        }
    }

    /// A successful draw always leaves a non-negative remainder, and the
    /// snapshot is consistent with the requested amount.
    #[test]
    fn prop_successful_draw_consistent(
        allocated in amount_strategy(),
        approved in amount_strategy(),
        requested in amount_strategy(),
    ) {
        let avail = Availability::new(allocated, approved);

        match LedgerService::check_category_draw(&avail, requested) {
            Ok(snapshot) => {
                prop_assert_eq!(snapshot.before - snapshot.after, requested);
                prop_assert!(snapshot.after >= Decimal::ZERO);
            }
            Err(LedgerError::InsufficientBudget { available, .. }) => {
                prop_assert!(requested > avail.raw());
                prop_assert!(available >= Decimal::ZERO);
            }
            Err(other) => prop_assert!(false, "unexpected error: {other:?}"),
        }
    }
}
