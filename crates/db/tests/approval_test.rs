//! Integration tests for the budget request approval flow.

mod common;

use rust_decimal_macros::dec;

use gasto_core::approval::ApprovalError;
use gasto_core::ledger::LedgerError;
use gasto_db::BudgetRequestRepository;
use gasto_db::entities::{
    budget_requests,
    sea_orm_active_enums::{BudgetStatus, RequestStatus},
};
use gasto_db::repositories::budget_request::{
    CreateRequestInput, RequestError, UpdateRequestInput,
};
use sea_orm::EntityTrait;

use common::{actor, fixture, seed_budget, seed_category, seed_request};

#[tokio::test]
async fn approve_within_budget_reports_snapshots() {
    let fx = fixture().await;
    seed_budget(
        &fx.db,
        fx.category.id,
        fx.admin.id,
        dec!(1000),
        BudgetStatus::Active,
    )
    .await;
    let request = seed_request(
        &fx.db,
        fx.user.id,
        fx.category.id,
        dec!(600),
        RequestStatus::Pending,
    )
    .await;

    let repo = BudgetRequestRepository::new(fx.db.clone());
    let approved = repo.approve(request.id, &actor(&fx.admin)).await.unwrap();

    assert_eq!(approved.request.status, RequestStatus::Approved);
    assert_eq!(approved.request.reviewed_by, Some(fx.admin.id));
    assert_eq!(approved.budget_info.requested_amount, dec!(600));
    assert_eq!(approved.budget_info.total_budget.before, dec!(1000));
    assert_eq!(approved.budget_info.total_budget.after, dec!(400));

    // Category maps to a department, so the department snapshot is present.
    let dept = approved.budget_info.department_budget.unwrap();
    assert_eq!(dept.name, fx.department.name);
    assert_eq!(dept.before, dec!(1000));
    assert_eq!(dept.after, dec!(400));
}

#[tokio::test]
async fn approve_beyond_remaining_budget_fails_and_stays_pending() {
    let fx = fixture().await;
    seed_budget(
        &fx.db,
        fx.category.id,
        fx.admin.id,
        dec!(1000),
        BudgetStatus::Active,
    )
    .await;

    let repo = BudgetRequestRepository::new(fx.db.clone());

    // First draw succeeds, leaving 400.
    let first = seed_request(
        &fx.db,
        fx.user.id,
        fx.category.id,
        dec!(600),
        RequestStatus::Pending,
    )
    .await;
    repo.approve(first.id, &actor(&fx.admin)).await.unwrap();

    // Second draw of 500 exceeds the remaining 400.
    let second = seed_request(
        &fx.db,
        fx.user.id,
        fx.category.id,
        dec!(500),
        RequestStatus::Pending,
    )
    .await;
    let err = repo.approve(second.id, &actor(&fx.admin)).await.unwrap_err();

    match err {
        RequestError::Ledger(LedgerError::InsufficientBudget {
            requested,
            available,
        }) => {
            assert_eq!(requested, dec!(500));
            assert_eq!(available, dec!(400));
        }
        other => panic!("expected InsufficientBudget, got {other:?}"),
    }

    // Nothing was written: the request is still pending and unreviewed.
    let reloaded = budget_requests::Entity::find_by_id(second.id)
        .one(&fx.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.status, RequestStatus::Pending);
    assert_eq!(reloaded.reviewed_by, None);
}

#[tokio::test]
async fn approve_already_approved_fails_without_side_effects() {
    let fx = fixture().await;
    seed_budget(
        &fx.db,
        fx.category.id,
        fx.admin.id,
        dec!(1000),
        BudgetStatus::Active,
    )
    .await;
    let request = seed_request(
        &fx.db,
        fx.user.id,
        fx.category.id,
        dec!(100),
        RequestStatus::Pending,
    )
    .await;

    let repo = BudgetRequestRepository::new(fx.db.clone());
    repo.approve(request.id, &actor(&fx.admin)).await.unwrap();

    let err = repo.approve(request.id, &actor(&fx.admin)).await.unwrap_err();
    assert!(matches!(
        err,
        RequestError::Approval(ApprovalError::InvalidTransition { .. })
    ));

    // The approved amount is not double-counted.
    let availability = gasto_db::BudgetRepository::new(fx.db.clone())
        .available_for_category(fx.category.id)
        .await
        .unwrap();
    assert_eq!(availability.availability.raw(), dec!(900));
}

#[tokio::test]
async fn approve_by_non_admin_is_forbidden() {
    let fx = fixture().await;
    seed_budget(
        &fx.db,
        fx.category.id,
        fx.admin.id,
        dec!(1000),
        BudgetStatus::Active,
    )
    .await;
    let request = seed_request(
        &fx.db,
        fx.user.id,
        fx.category.id,
        dec!(100),
        RequestStatus::Pending,
    )
    .await;

    let repo = BudgetRequestRepository::new(fx.db.clone());
    let err = repo.approve(request.id, &actor(&fx.user)).await.unwrap_err();
    assert!(matches!(err, RequestError::Forbidden(_)));

    let reloaded = budget_requests::Entity::find_by_id(request.id)
        .one(&fx.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.status, RequestStatus::Pending);
}

#[tokio::test]
async fn approve_missing_request_is_not_found() {
    let fx = fixture().await;
    let repo = BudgetRequestRepository::new(fx.db.clone());

    let err = repo
        .approve(uuid::Uuid::new_v4(), &actor(&fx.admin))
        .await
        .unwrap_err();
    assert!(matches!(err, RequestError::NotFound(_)));
}

#[tokio::test]
async fn department_ceiling_is_enforced_independently() {
    let fx = fixture().await;
    // Second category in the same department, already over-drawn.
    let other = seed_category(
        &fx.db,
        fx.company.id,
        Some(fx.department.id),
        "Travel",
    )
    .await;
    seed_budget(
        &fx.db,
        fx.category.id,
        fx.admin.id,
        dec!(500),
        BudgetStatus::Active,
    )
    .await;
    seed_request(
        &fx.db,
        fx.user.id,
        other.id,
        dec!(400),
        RequestStatus::Approved,
    )
    .await;

    // Category alone could absorb 200 (500 available), but the
    // department pool is 500 - 400 = 100.
    let request = seed_request(
        &fx.db,
        fx.user.id,
        fx.category.id,
        dec!(200),
        RequestStatus::Pending,
    )
    .await;

    let repo = BudgetRequestRepository::new(fx.db.clone());
    let err = repo.approve(request.id, &actor(&fx.admin)).await.unwrap_err();

    match err {
        RequestError::Ledger(LedgerError::InsufficientDepartmentBudget {
            department,
            requested,
            available,
        }) => {
            assert_eq!(department, fx.department.name);
            assert_eq!(requested, dec!(200));
            assert_eq!(available, dec!(100));
        }
        other => panic!("expected InsufficientDepartmentBudget, got {other:?}"),
    }
}

#[tokio::test]
async fn reject_pending_succeeds_exactly_once() {
    let fx = fixture().await;
    let request = seed_request(
        &fx.db,
        fx.user.id,
        fx.category.id,
        dec!(50),
        RequestStatus::Pending,
    )
    .await;

    let repo = BudgetRequestRepository::new(fx.db.clone());
    let rejected = repo.reject(request.id, &actor(&fx.admin)).await.unwrap();
    assert_eq!(rejected.status, RequestStatus::Rejected);
    assert_eq!(rejected.reviewed_by, Some(fx.admin.id));

    let err = repo.reject(request.id, &actor(&fx.admin)).await.unwrap_err();
    assert!(matches!(
        err,
        RequestError::Approval(ApprovalError::InvalidTransition { .. })
    ));
}

#[tokio::test]
async fn reject_approved_request_fails() {
    let fx = fixture().await;
    seed_budget(
        &fx.db,
        fx.category.id,
        fx.admin.id,
        dec!(1000),
        BudgetStatus::Active,
    )
    .await;
    let request = seed_request(
        &fx.db,
        fx.user.id,
        fx.category.id,
        dec!(100),
        RequestStatus::Pending,
    )
    .await;

    let repo = BudgetRequestRepository::new(fx.db.clone());
    repo.approve(request.id, &actor(&fx.admin)).await.unwrap();

    // Approval is one-way.
    let err = repo.reject(request.id, &actor(&fx.admin)).await.unwrap_err();
    assert!(matches!(
        err,
        RequestError::Approval(ApprovalError::InvalidTransition { .. })
    ));
}

#[tokio::test]
async fn create_validates_amount_and_description() {
    let fx = fixture().await;
    let repo = BudgetRequestRepository::new(fx.db.clone());

    let err = repo
        .create(CreateRequestInput {
            user_id: fx.user.id,
            category_id: fx.category.id,
            requested_amount: dec!(0),
            description: "a perfectly valid description".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RequestError::Approval(ApprovalError::NonPositiveAmount)
    ));

    let err = repo
        .create(CreateRequestInput {
            user_id: fx.user.id,
            category_id: fx.category.id,
            requested_amount: dec!(100),
            description: "too short".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RequestError::Approval(ApprovalError::DescriptionTooShort { .. })
    ));

    // Markup is stripped before persisting.
    let created = repo
        .create(CreateRequestInput {
            user_id: fx.user.id,
            category_id: fx.category.id,
            requested_amount: dec!(250.25),
            description: "<b>replacement monitors</b> for the design team".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(created.description, "replacement monitors for the design team");
    assert_eq!(created.status, RequestStatus::Pending);
    assert_eq!(created.reviewed_by, None);
}

#[tokio::test]
async fn non_admin_update_drops_status_but_applies_other_fields() {
    let fx = fixture().await;
    let request = seed_request(
        &fx.db,
        fx.user.id,
        fx.category.id,
        dec!(100),
        RequestStatus::Pending,
    )
    .await;

    let repo = BudgetRequestRepository::new(fx.db.clone());
    let updated = repo
        .update(
            request.id,
            &actor(&fx.user),
            UpdateRequestInput {
                requested_amount: Some(dec!(150)),
                status: Some(RequestStatus::Approved),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    // Status silently unchanged; amount applied.
    assert_eq!(updated.status, RequestStatus::Pending);
    assert_eq!(updated.requested_amount, dec!(150));
}

#[tokio::test]
async fn admin_update_may_set_status() {
    let fx = fixture().await;
    let request = seed_request(
        &fx.db,
        fx.user.id,
        fx.category.id,
        dec!(100),
        RequestStatus::Pending,
    )
    .await;

    let repo = BudgetRequestRepository::new(fx.db.clone());
    let updated = repo
        .update(
            request.id,
            &actor(&fx.admin),
            UpdateRequestInput {
                status: Some(RequestStatus::Rejected),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.status, RequestStatus::Rejected);
}

#[tokio::test]
async fn update_by_stranger_is_forbidden() {
    let fx = fixture().await;
    let stranger = common::seed_user(
        &fx.db,
        fx.company.id,
        None,
        "maria@acme.test",
        gasto_db::entities::sea_orm_active_enums::UserRole::User,
    )
    .await;
    let request = seed_request(
        &fx.db,
        fx.user.id,
        fx.category.id,
        dec!(100),
        RequestStatus::Pending,
    )
    .await;

    let repo = BudgetRequestRepository::new(fx.db.clone());
    let err = repo
        .update(
            request.id,
            &actor(&stranger),
            UpdateRequestInput {
                requested_amount: Some(dec!(1)),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RequestError::Forbidden(_)));
}

#[tokio::test]
async fn delete_is_restricted_to_requester_or_admin() {
    let fx = fixture().await;
    let request = seed_request(
        &fx.db,
        fx.user.id,
        fx.category.id,
        dec!(100),
        RequestStatus::Pending,
    )
    .await;

    let repo = BudgetRequestRepository::new(fx.db.clone());
    repo.delete(request.id, &actor(&fx.user)).await.unwrap();

    let gone = budget_requests::Entity::find_by_id(request.id)
        .one(&fx.db)
        .await
        .unwrap();
    assert!(gone.is_none());
}
