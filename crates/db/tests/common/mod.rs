//! Shared fixtures for repository integration tests.
//!
//! Tests run against an in-memory SQLite database with the real
//! migrations applied. The pool is capped at one connection so every
//! query sees the same in-memory database.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use sea_orm_migration::MigratorTrait;
use uuid::Uuid;

use gasto_core::policy::Actor;
use gasto_db::entities::{
    budget_requests, budgets, categories, companies, departments, users,
    sea_orm_active_enums::{BudgetStatus, CategoryKind, CompanySize, RequestStatus, UserRole},
};
use gasto_db::migration::Migrator;

/// Connects to a fresh in-memory database and applies all migrations.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1);

    let db = Database::connect(options)
        .await
        .expect("connect to in-memory sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    db
}

/// A seeded tenant: one company, one active department, one category
/// linked to the department, an admin, and a regular user in the
/// department.
pub struct Fixture {
    pub db: DatabaseConnection,
    pub company: companies::Model,
    pub department: departments::Model,
    pub category: categories::Model,
    pub admin: users::Model,
    pub user: users::Model,
}

pub async fn fixture() -> Fixture {
    let db = setup_db().await;

    let company = seed_company(&db, "Acme Logistics").await;
    let department = seed_department(&db, company.id, "Operations", true).await;
    let category = seed_category(&db, company.id, Some(department.id), "Office Supplies").await;
    let admin = seed_user(&db, company.id, None, "ana@acme.test", UserRole::Admin).await;
    let user = seed_user(
        &db,
        company.id,
        Some(department.id),
        "luis@acme.test",
        UserRole::User,
    )
    .await;

    Fixture {
        db,
        company,
        department,
        category,
        admin,
        user,
    }
}

pub async fn seed_company(db: &DatabaseConnection, name: &str) -> companies::Model {
    let now = Utc::now().into();
    companies::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        contact_email: Set(format!("contact@{}.test", name.to_lowercase().replace(' ', "-"))),
        phone: Set(None),
        size: Set(CompanySize::Medium),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .expect("seed company")
}

pub async fn seed_department(
    db: &DatabaseConnection,
    company_id: Uuid,
    name: &str,
    is_active: bool,
) -> departments::Model {
    let now = Utc::now().into();
    departments::ActiveModel {
        id: Set(Uuid::new_v4()),
        company_id: Set(company_id),
        name: Set(name.to_string()),
        description: Set(None),
        is_active: Set(is_active),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .expect("seed department")
}

pub async fn seed_category(
    db: &DatabaseConnection,
    company_id: Uuid,
    department_id: Option<Uuid>,
    name: &str,
) -> categories::Model {
    let now = Utc::now().into();
    categories::ActiveModel {
        id: Set(Uuid::new_v4()),
        company_id: Set(company_id),
        department_id: Set(department_id),
        name: Set(name.to_string()),
        kind: Set(CategoryKind::Expense),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .expect("seed category")
}

pub async fn seed_user(
    db: &DatabaseConnection,
    company_id: Uuid,
    department_id: Option<Uuid>,
    email: &str,
    role: UserRole,
) -> users::Model {
    let now = Utc::now().into();
    users::ActiveModel {
        id: Set(Uuid::new_v4()),
        company_id: Set(company_id),
        department_id: Set(department_id),
        first_name: Set("Test".to_string()),
        last_name: Set("User".to_string()),
        email: Set(email.to_string()),
        password_hash: Set("$argon2id$test".to_string()),
        role: Set(role),
        is_active: Set(true),
        is_first_user: Set(false),
        created_by: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .expect("seed user")
}

pub async fn seed_budget(
    db: &DatabaseConnection,
    category_id: Uuid,
    user_id: Uuid,
    max_amount: Decimal,
    status: BudgetStatus,
) -> budgets::Model {
    let now = Utc::now().into();
    budgets::ActiveModel {
        id: Set(Uuid::new_v4()),
        category_id: Set(category_id),
        user_id: Set(user_id),
        max_amount: Set(max_amount),
        start_date: Set(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()),
        end_date: Set(NaiveDate::from_ymd_opt(2026, 12, 31).unwrap()),
        status: Set(status),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .expect("seed budget")
}

pub async fn seed_request(
    db: &DatabaseConnection,
    user_id: Uuid,
    category_id: Uuid,
    amount: Decimal,
    status: RequestStatus,
) -> budget_requests::Model {
    let now = Utc::now();
    budget_requests::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        category_id: Set(category_id),
        requested_amount: Set(amount),
        description: Set("seeded request for testing".to_string()),
        request_date: Set(now.date_naive()),
        status: Set(status),
        reviewed_by: Set(None),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(db)
    .await
    .expect("seed budget request")
}

pub fn actor(user: &users::Model) -> Actor {
    Actor::new(user.id, user.company_id, user.role.clone().into())
}
