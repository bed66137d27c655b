//! Integration tests for requisitions and their UID sequences.

mod common;

use chrono::{Datelike, Utc};
use rust_decimal_macros::dec;
use sea_orm::EntityTrait;

use gasto_core::approval::ApprovalError;
use gasto_db::RequisitionRepository;
use gasto_db::entities::{
    purchase_requests,
    sea_orm_active_enums::{RequestStatus, RequisitionPriority, UserRole},
};
use gasto_db::repositories::requisition::{
    CreateRequisitionInput, RequisitionError, RequisitionItemInput, UpdateRequisitionInput,
};

use common::{actor, fixture, seed_department, seed_user};

fn requisition_input(title: &str) -> CreateRequisitionInput {
    CreateRequisitionInput {
        title: title.to_string(),
        total_amount: dec!(750.50),
        justification: "replacement laptops for the onboarding batch".to_string(),
        priority: RequisitionPriority::High,
        supplier_id: None,
        client_id: None,
        items: vec![
            RequisitionItemInput {
                description: "laptop".to_string(),
                quantity: 2,
                unit_price: dec!(350),
            },
            RequisitionItemInput {
                description: "dock".to_string(),
                quantity: 1,
                unit_price: dec!(50.50),
            },
        ],
        attachments: vec!["attachments/quote.pdf".to_string()],
    }
}

#[tokio::test]
async fn create_allocates_sequential_uids() {
    let fx = fixture().await;
    let repo = RequisitionRepository::new(fx.db.clone());
    let year = Utc::now().year();

    let first = repo
        .create(&fx.user, requisition_input("Laptops"))
        .await
        .unwrap();
    let second = repo
        .create(&fx.user, requisition_input("Docks"))
        .await
        .unwrap();

    assert_eq!(
        first.requisition.requisition_uid,
        format!("REQ-O-{year}-001")
    );
    assert_eq!(
        second.requisition.requisition_uid,
        format!("REQ-O-{year}-002")
    );
    assert_eq!(first.requisition.status, RequestStatus::Pending);
    assert_eq!(first.items.len(), 2);
    assert_eq!(first.items[0].position, 0);
    assert_eq!(first.items[0].description, "laptop");
    assert_eq!(first.attachments.len(), 1);
}

#[tokio::test]
async fn sequences_are_scoped_per_department() {
    let fx = fixture().await;
    let finance = seed_department(&fx.db, fx.company.id, "Finance", true).await;
    let finance_user = seed_user(
        &fx.db,
        fx.company.id,
        Some(finance.id),
        "fina@acme.test",
        UserRole::User,
    )
    .await;

    let repo = RequisitionRepository::new(fx.db.clone());
    let year = Utc::now().year();

    repo.create(&fx.user, requisition_input("Ops one"))
        .await
        .unwrap();
    let fin = repo
        .create(&finance_user, requisition_input("Fin one"))
        .await
        .unwrap();

    // Each department starts its own sequence at 1.
    assert_eq!(fin.requisition.requisition_uid, format!("REQ-F-{year}-001"));
}

#[tokio::test]
async fn sequence_numbers_are_never_reused_after_deletion() {
    let fx = fixture().await;
    let repo = RequisitionRepository::new(fx.db.clone());
    let year = Utc::now().year();

    repo.create(&fx.user, requisition_input("One"))
        .await
        .unwrap();
    let second = repo
        .create(&fx.user, requisition_input("Two"))
        .await
        .unwrap();

    // Hard-delete the latest requisition directly.
    purchase_requests::Entity::delete_by_id(second.requisition.id)
        .exec(&fx.db)
        .await
        .unwrap();

    let third = repo
        .create(&fx.user, requisition_input("Three"))
        .await
        .unwrap();
    assert_eq!(
        third.requisition.requisition_uid,
        format!("REQ-O-{year}-003")
    );
}

#[tokio::test]
async fn inactive_department_blocks_creation() {
    let fx = fixture().await;
    let dormant = seed_department(&fx.db, fx.company.id, "Warehouse", false).await;
    let warehouse_user = seed_user(
        &fx.db,
        fx.company.id,
        Some(dormant.id),
        "wally@acme.test",
        UserRole::User,
    )
    .await;

    let repo = RequisitionRepository::new(fx.db.clone());
    let err = repo
        .create(&warehouse_user, requisition_input("Shelving"))
        .await
        .unwrap_err();

    match err {
        RequisitionError::DepartmentInactive { name } => assert_eq!(name, "Warehouse"),
        other => panic!("expected DepartmentInactive, got {other:?}"),
    }

    // No row was created.
    let count = purchase_requests::Entity::find().all(&fx.db).await.unwrap();
    assert!(count.is_empty());
}

#[tokio::test]
async fn user_without_department_cannot_create() {
    let fx = fixture().await;
    let floating = seed_user(&fx.db, fx.company.id, None, "free@acme.test", UserRole::User).await;

    let repo = RequisitionRepository::new(fx.db.clone());
    let err = repo
        .create(&floating, requisition_input("Anything"))
        .await
        .unwrap_err();
    assert!(matches!(err, RequisitionError::NoDepartment));
}

#[tokio::test]
async fn approve_and_reject_are_one_way() {
    let fx = fixture().await;
    let repo = RequisitionRepository::new(fx.db.clone());

    let created = repo
        .create(&fx.user, requisition_input("Chairs"))
        .await
        .unwrap();
    let id = created.requisition.id;

    let approved = repo.approve(id, &actor(&fx.admin)).await.unwrap();
    assert_eq!(approved.status, RequestStatus::Approved);
    assert_eq!(approved.reviewed_by, Some(fx.admin.id));

    // Re-approving and rejecting an approved requisition both fail.
    let err = repo.approve(id, &actor(&fx.admin)).await.unwrap_err();
    assert!(matches!(
        err,
        RequisitionError::Approval(ApprovalError::InvalidTransition { .. })
    ));
    let err = repo
        .reject(id, &actor(&fx.admin), Some("late".to_string()))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RequisitionError::Approval(ApprovalError::InvalidTransition { .. })
    ));
}

#[tokio::test]
async fn reject_stores_the_reason() {
    let fx = fixture().await;
    let repo = RequisitionRepository::new(fx.db.clone());

    let created = repo
        .create(&fx.user, requisition_input("Monitors"))
        .await
        .unwrap();

    let rejected = repo
        .reject(
            created.requisition.id,
            &actor(&fx.admin),
            Some("no budget this quarter".to_string()),
        )
        .await
        .unwrap();

    assert_eq!(rejected.status, RequestStatus::Rejected);
    assert_eq!(
        rejected.rejection_reason.as_deref(),
        Some("no budget this quarter")
    );
}

#[tokio::test]
async fn approve_by_non_admin_is_forbidden() {
    let fx = fixture().await;
    let repo = RequisitionRepository::new(fx.db.clone());

    let created = repo
        .create(&fx.user, requisition_input("Printer"))
        .await
        .unwrap();

    let err = repo
        .approve(created.requisition.id, &actor(&fx.user))
        .await
        .unwrap_err();
    assert!(matches!(err, RequisitionError::Forbidden(_)));
}

#[tokio::test]
async fn non_admin_update_drops_status() {
    let fx = fixture().await;
    let repo = RequisitionRepository::new(fx.db.clone());

    let created = repo
        .create(&fx.user, requisition_input("Desks"))
        .await
        .unwrap();

    let updated = repo
        .update(
            created.requisition.id,
            &actor(&fx.user),
            UpdateRequisitionInput {
                title: Some("Standing desks".to_string()),
                status: Some(RequestStatus::Approved),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "Standing desks");
    assert_eq!(updated.status, RequestStatus::Pending);
}
