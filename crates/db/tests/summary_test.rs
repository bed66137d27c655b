//! Integration tests for statistics, the emergency fund view, and
//! transaction aggregations.

mod common;

use chrono::NaiveDate;
use chrono::Utc;
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, Set};
use uuid::Uuid;

use gasto_core::summary::{Trend, TrendCache};
use gasto_db::entities::{
    sea_orm_active_enums::{BudgetStatus, TransactionKind, TransactionStatus},
    transactions,
};
use gasto_db::{SummaryRepository, TransactionRepository};

use common::{fixture, seed_budget, seed_category};

async fn seed_transaction(
    db: &sea_orm::DatabaseConnection,
    company_id: Uuid,
    created_by: Uuid,
    category_id: Option<Uuid>,
    kind: TransactionKind,
    status: TransactionStatus,
    amount: rust_decimal::Decimal,
    date: NaiveDate,
    deleted: bool,
) -> transactions::Model {
    let now = Utc::now().into();
    transactions::ActiveModel {
        id: Set(Uuid::new_v4()),
        company_id: Set(company_id),
        kind: Set(kind),
        amount: Set(amount),
        category_id: Set(category_id),
        supplier_id: Set(None),
        client_id: Set(None),
        transaction_date: Set(date),
        status: Set(status),
        payment_method: Set(None),
        reference: Set(None),
        notes: Set(None),
        created_by: Set(created_by),
        deleted_at: Set(if deleted { Some(now) } else { None }),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .expect("seed transaction")
}

#[tokio::test]
async fn statistics_group_by_category_and_status() {
    let fx = fixture().await;
    let travel = seed_category(&fx.db, fx.company.id, Some(fx.department.id), "Travel").await;

    seed_budget(&fx.db, fx.category.id, fx.admin.id, dec!(1000), BudgetStatus::Active).await;
    seed_budget(&fx.db, fx.category.id, fx.admin.id, dec!(500), BudgetStatus::Active).await;
    seed_budget(&fx.db, fx.category.id, fx.admin.id, dec!(200), BudgetStatus::Inactive).await;
    seed_budget(&fx.db, travel.id, fx.admin.id, dec!(300), BudgetStatus::Active).await;

    let repo = SummaryRepository::new(fx.db.clone(), TrendCache::new());
    let rows = repo.statistics(fx.company.id).await.unwrap();

    assert_eq!(rows.len(), 3);

    let active_supplies = rows
        .iter()
        .find(|r| r.category_id == fx.category.id && r.status == BudgetStatus::Active)
        .unwrap();
    assert_eq!(active_supplies.count, 2);
    assert_eq!(active_supplies.total, dec!(1500));
    assert_eq!(active_supplies.formatted_total, "$1,500.00");
    assert_eq!(active_supplies.category_name, "Office Supplies");

    let inactive_supplies = rows
        .iter()
        .find(|r| r.category_id == fx.category.id && r.status == BudgetStatus::Inactive)
        .unwrap();
    assert_eq!(inactive_supplies.count, 1);
    assert_eq!(inactive_supplies.total, dec!(200));
}

#[tokio::test]
async fn emergency_fund_first_call_is_new_then_tracks_deltas() {
    let fx = fixture().await;
    seed_budget(&fx.db, fx.category.id, fx.admin.id, dec!(1000), BudgetStatus::Active).await;
    seed_transaction(
        &fx.db,
        fx.company.id,
        fx.user.id,
        Some(fx.category.id),
        TransactionKind::Expense,
        TransactionStatus::Completed,
        dec!(100),
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
        false,
    )
    .await;

    let repo = SummaryRepository::new(fx.db.clone(), TrendCache::new());

    // First call: no cached figures, everything reports "new".
    let first = repo.emergency_fund(fx.company.id).await.unwrap();
    assert_eq!(first.total_budget.trend, Trend::New);
    assert_eq!(first.reserve.trend, Trend::New);
    assert_eq!(first.total_expenses.trend, Trend::New);
    assert_eq!(first.total_budget.current, dec!(1000));
    assert_eq!(first.reserve.current, dec!(100.00));
    assert_eq!(first.total_expenses.current, dec!(100));
    assert_eq!(first.last_direction, None);

    // Add budget; second call reports an increase with the right delta.
    seed_budget(&fx.db, fx.category.id, fx.admin.id, dec!(500), BudgetStatus::Active).await;
    let second = repo.emergency_fund(fx.company.id).await.unwrap();
    assert_eq!(second.total_budget.trend, Trend::Increased);
    assert_eq!(second.total_budget.change_percent, Some(dec!(50.00)));
    assert_eq!(second.reserve.current, dec!(150.00));
    assert_eq!(second.total_expenses.trend, Trend::Unchanged);

    // Third call: figures unchanged, but the stored direction survives.
    let third = repo.emergency_fund(fx.company.id).await.unwrap();
    assert_eq!(third.total_budget.trend, Trend::Unchanged);
    assert_eq!(third.last_direction, Some(Trend::Increased));
}

#[tokio::test]
async fn emergency_fund_ignores_pending_and_deleted_expenses() {
    let fx = fixture().await;
    seed_budget(&fx.db, fx.category.id, fx.admin.id, dec!(1000), BudgetStatus::Active).await;

    let date = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();
    seed_transaction(
        &fx.db, fx.company.id, fx.user.id, None,
        TransactionKind::Expense, TransactionStatus::Completed,
        dec!(200), date, false,
    )
    .await;
    // Pending, cancelled, soft-deleted, and income rows are excluded.
    seed_transaction(
        &fx.db, fx.company.id, fx.user.id, None,
        TransactionKind::Expense, TransactionStatus::Pending,
        dec!(999), date, false,
    )
    .await;
    seed_transaction(
        &fx.db, fx.company.id, fx.user.id, None,
        TransactionKind::Expense, TransactionStatus::Cancelled,
        dec!(999), date, false,
    )
    .await;
    seed_transaction(
        &fx.db, fx.company.id, fx.user.id, None,
        TransactionKind::Expense, TransactionStatus::Completed,
        dec!(999), date, true,
    )
    .await;
    seed_transaction(
        &fx.db, fx.company.id, fx.user.id, None,
        TransactionKind::Income, TransactionStatus::Completed,
        dec!(999), date, false,
    )
    .await;

    let repo = SummaryRepository::new(fx.db.clone(), TrendCache::new());
    let report = repo.emergency_fund(fx.company.id).await.unwrap();
    assert_eq!(report.total_expenses.current, dec!(200));
}

#[tokio::test]
async fn monthly_totals_group_completed_transactions() {
    let fx = fixture().await;
    let march = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
    let april = NaiveDate::from_ymd_opt(2026, 4, 2).unwrap();

    seed_transaction(
        &fx.db, fx.company.id, fx.user.id, None,
        TransactionKind::Expense, TransactionStatus::Completed,
        dec!(100), march, false,
    )
    .await;
    seed_transaction(
        &fx.db, fx.company.id, fx.user.id, None,
        TransactionKind::Expense, TransactionStatus::Completed,
        dec!(50.50), march, false,
    )
    .await;
    seed_transaction(
        &fx.db, fx.company.id, fx.user.id, None,
        TransactionKind::Expense, TransactionStatus::Completed,
        dec!(75), april, false,
    )
    .await;
    // Pending rows stay out of the totals.
    seed_transaction(
        &fx.db, fx.company.id, fx.user.id, None,
        TransactionKind::Expense, TransactionStatus::Pending,
        dec!(999), april, false,
    )
    .await;

    let repo = TransactionRepository::new(fx.db.clone());
    let totals = repo.monthly_totals(fx.company.id, None).await.unwrap();

    assert_eq!(totals.len(), 2);
    assert_eq!(totals[0].year, 2026);
    assert_eq!(totals[0].month, 3);
    assert_eq!(totals[0].total, dec!(150.50));
    assert_eq!(totals[1].month, 4);
    assert_eq!(totals[1].total, dec!(75));
}

#[tokio::test]
async fn department_totals_follow_category_linkage() {
    let fx = fixture().await;
    let unlinked = seed_category(&fx.db, fx.company.id, None, "Misc").await;
    let date = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();

    seed_transaction(
        &fx.db, fx.company.id, fx.user.id, Some(fx.category.id),
        TransactionKind::Expense, TransactionStatus::Completed,
        dec!(120), date, false,
    )
    .await;
    seed_transaction(
        &fx.db, fx.company.id, fx.user.id, Some(fx.category.id),
        TransactionKind::Expense, TransactionStatus::Completed,
        dec!(80), date, false,
    )
    .await;
    // No category, or a category without a department: not attributed.
    seed_transaction(
        &fx.db, fx.company.id, fx.user.id, None,
        TransactionKind::Expense, TransactionStatus::Completed,
        dec!(999), date, false,
    )
    .await;
    seed_transaction(
        &fx.db, fx.company.id, fx.user.id, Some(unlinked.id),
        TransactionKind::Expense, TransactionStatus::Completed,
        dec!(999), date, false,
    )
    .await;

    let repo = TransactionRepository::new(fx.db.clone());
    let totals = repo.department_totals(fx.company.id).await.unwrap();

    assert_eq!(totals.len(), 1);
    assert_eq!(totals[0].department_id, fx.department.id);
    assert_eq!(totals[0].department_name, "Operations");
    assert_eq!(totals[0].total, dec!(200));
}

#[tokio::test]
async fn soft_deleted_transactions_disappear_from_reads() {
    let fx = fixture().await;
    let date = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
    let row = seed_transaction(
        &fx.db, fx.company.id, fx.user.id, None,
        TransactionKind::Expense, TransactionStatus::Completed,
        dec!(60), date, false,
    )
    .await;

    let repo = TransactionRepository::new(fx.db.clone());
    repo.soft_delete(row.id, &common::actor(&fx.user))
        .await
        .unwrap();

    let err = repo.get(row.id).await.unwrap_err();
    assert!(matches!(
        err,
        gasto_db::repositories::transaction::TransactionError::NotFound(_)
    ));

    // The row itself is retained for audit.
    use sea_orm::EntityTrait;
    let raw = transactions::Entity::find_by_id(row.id)
        .one(&fx.db)
        .await
        .unwrap()
        .unwrap();
    assert!(raw.deleted_at.is_some());
}
