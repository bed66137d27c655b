//! Integration tests for availability queries.

mod common;

use rust_decimal_macros::dec;

use gasto_db::BudgetRepository;
use gasto_db::entities::sea_orm_active_enums::{BudgetStatus, RequestStatus};
use gasto_db::repositories::budget::BudgetError;

use common::{fixture, seed_budget, seed_category, seed_request};

#[tokio::test]
async fn category_availability_counts_only_active_budgets() {
    let fx = fixture().await;
    seed_budget(&fx.db, fx.category.id, fx.admin.id, dec!(1000), BudgetStatus::Active).await;
    seed_budget(&fx.db, fx.category.id, fx.admin.id, dec!(500), BudgetStatus::Active).await;
    seed_budget(&fx.db, fx.category.id, fx.admin.id, dec!(9999), BudgetStatus::Inactive).await;
    seed_budget(&fx.db, fx.category.id, fx.admin.id, dec!(9999), BudgetStatus::Expired).await;

    seed_request(&fx.db, fx.user.id, fx.category.id, dec!(300), RequestStatus::Approved).await;
    // Pending and rejected requests do not consume budget.
    seed_request(&fx.db, fx.user.id, fx.category.id, dec!(800), RequestStatus::Pending).await;
    seed_request(&fx.db, fx.user.id, fx.category.id, dec!(800), RequestStatus::Rejected).await;

    let repo = BudgetRepository::new(fx.db.clone());
    let result = repo.available_for_category(fx.category.id).await.unwrap();

    assert_eq!(result.availability.allocated, dec!(1500));
    assert_eq!(result.availability.approved, dec!(300));
    assert_eq!(result.availability.raw(), dec!(1200));
    assert_eq!(result.availability.display(), dec!(1200));
}

#[tokio::test]
async fn overcommitted_category_reports_negative_raw_and_floored_display() {
    let fx = fixture().await;
    seed_budget(&fx.db, fx.category.id, fx.admin.id, dec!(100), BudgetStatus::Active).await;
    // Seeded directly: an over-commitment that the approval path would
    // never allow, e.g. after a budget was deactivated.
    seed_request(&fx.db, fx.user.id, fx.category.id, dec!(250), RequestStatus::Approved).await;

    let repo = BudgetRepository::new(fx.db.clone());
    let result = repo.available_for_category(fx.category.id).await.unwrap();

    assert_eq!(result.availability.raw(), dec!(-150));
    assert_eq!(result.availability.display(), dec!(0));
}

#[tokio::test]
async fn unknown_category_is_not_found() {
    let fx = fixture().await;
    let repo = BudgetRepository::new(fx.db.clone());

    let err = repo
        .available_for_category(uuid::Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, BudgetError::CategoryNotFound(_)));
}

#[tokio::test]
async fn department_availability_follows_category_linkage() {
    let fx = fixture().await;
    // Second category in the department, and one outside any department.
    let travel = seed_category(&fx.db, fx.company.id, Some(fx.department.id), "Travel").await;
    let unlinked = seed_category(&fx.db, fx.company.id, None, "Misc").await;

    seed_budget(&fx.db, fx.category.id, fx.admin.id, dec!(1000), BudgetStatus::Active).await;
    seed_budget(&fx.db, travel.id, fx.admin.id, dec!(400), BudgetStatus::Active).await;
    // Budget on the unlinked category must not count, even though its
    // creator belongs to the department.
    seed_budget(&fx.db, unlinked.id, fx.user.id, dec!(7777), BudgetStatus::Active).await;

    seed_request(&fx.db, fx.user.id, travel.id, dec!(150), RequestStatus::Approved).await;

    let repo = BudgetRepository::new(fx.db.clone());
    let result = repo
        .available_for_department(fx.department.id)
        .await
        .unwrap();

    assert_eq!(result.department_name, fx.department.name);
    assert_eq!(result.availability.allocated, dec!(1400));
    assert_eq!(result.availability.approved, dec!(150));
    assert_eq!(result.availability.raw(), dec!(1250));
}

#[tokio::test]
async fn department_without_categories_has_zero_availability() {
    let fx = fixture().await;
    let empty = common::seed_department(&fx.db, fx.company.id, "Legal", true).await;

    let repo = BudgetRepository::new(fx.db.clone());
    let result = repo.available_for_department(empty.id).await.unwrap();

    assert_eq!(result.availability.raw(), dec!(0));
}

#[tokio::test]
async fn create_budget_validates_period_and_amount() {
    let fx = fixture().await;
    let repo = BudgetRepository::new(fx.db.clone());

    let err = repo
        .create_budget(gasto_db::repositories::budget::CreateBudgetInput {
            category_id: fx.category.id,
            user_id: fx.admin.id,
            max_amount: dec!(-1),
            start_date: chrono::NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            end_date: chrono::NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
            status: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, BudgetError::NegativeAmount));

    let err = repo
        .create_budget(gasto_db::repositories::budget::CreateBudgetInput {
            category_id: fx.category.id,
            user_id: fx.admin.id,
            max_amount: dec!(100),
            start_date: chrono::NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            end_date: chrono::NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            status: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, BudgetError::InvalidPeriod));

    let created = repo
        .create_budget(gasto_db::repositories::budget::CreateBudgetInput {
            category_id: fx.category.id,
            user_id: fx.admin.id,
            max_amount: dec!(100),
            start_date: chrono::NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            end_date: chrono::NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
            status: None,
        })
        .await
        .unwrap();
    assert_eq!(created.status, BudgetStatus::Active);
}
