//! User repository, including company registration.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{
    companies, users,
    sea_orm_active_enums::{CompanySize, UserRole},
};

/// Error types for user operations.
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    /// User not found.
    #[error("User not found: {0}")]
    NotFound(Uuid),

    /// Email already registered.
    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for registering a company with its bootstrap admin.
#[derive(Debug, Clone)]
pub struct RegisterCompanyInput {
    /// Company name.
    pub company_name: String,
    /// Company contact email.
    pub contact_email: String,
    /// Company phone.
    pub phone: Option<String>,
    /// Company size bucket.
    pub size: CompanySize,
    /// Admin first name.
    pub first_name: String,
    /// Admin last name.
    pub last_name: String,
    /// Admin email (unique).
    pub email: String,
    /// Argon2 hash of the admin password.
    pub password_hash: String,
}

/// Input for creating a user inside an existing company.
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    /// Company the user belongs to (the creating admin's company).
    pub company_id: Uuid,
    /// Optional department assignment.
    pub department_id: Option<Uuid>,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email (unique).
    pub email: String,
    /// Argon2 hash of the password.
    pub password_hash: String,
    /// Role.
    pub role: UserRole,
    /// The admin creating this user.
    pub created_by: Uuid,
}

/// Patch for updating a user.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserInput {
    /// New first name.
    pub first_name: Option<String>,
    /// New last name.
    pub last_name: Option<String>,
    /// New department.
    pub department_id: Option<Option<Uuid>>,
    /// New role.
    pub role: Option<UserRole>,
    /// New active flag.
    pub is_active: Option<bool>,
}

/// User repository.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a company together with its first user.
    ///
    /// The first user is always an admin and flagged as the company's
    /// first user; both rows are created in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateEmail` when the email is taken, or a database
    /// error.
    pub async fn register_company(
        &self,
        input: RegisterCompanyInput,
    ) -> Result<(companies::Model, users::Model), UserError> {
        let existing = users::Entity::find()
            .filter(users::Column::Email.eq(&input.email))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(UserError::DuplicateEmail(input.email));
        }

        let txn = self.db.begin().await?;
        let now = Utc::now().into();

        let company = companies::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.company_name),
            contact_email: Set(input.contact_email),
            phone: Set(input.phone),
            size: Set(input.size),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let company = company.insert(&txn).await?;

        let admin = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            company_id: Set(company.id),
            department_id: Set(None),
            first_name: Set(input.first_name),
            last_name: Set(input.last_name),
            email: Set(input.email),
            password_hash: Set(input.password_hash),
            role: Set(UserRole::Admin),
            is_active: Set(true),
            is_first_user: Set(true),
            created_by: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let admin = admin.insert(&txn).await?;

        txn.commit().await?;
        Ok((company, admin))
    }

    /// Creates a user in an existing company.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateEmail` when the email is taken, or a database
    /// error.
    pub async fn create_user(&self, input: CreateUserInput) -> Result<users::Model, UserError> {
        let existing = users::Entity::find()
            .filter(users::Column::Email.eq(&input.email))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(UserError::DuplicateEmail(input.email));
        }

        let now = Utc::now().into();
        let user = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            company_id: Set(input.company_id),
            department_id: Set(input.department_id),
            first_name: Set(input.first_name),
            last_name: Set(input.last_name),
            email: Set(input.email),
            password_hash: Set(input.password_hash),
            role: Set(input.role),
            is_active: Set(true),
            is_first_user: Set(false),
            created_by: Set(Some(input.created_by)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let created = user.insert(&self.db).await?;
        Ok(created)
    }

    /// Finds a user by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<users::Model>, UserError> {
        let user = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await?;
        Ok(user)
    }

    /// Finds a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the user is not found or the query fails.
    pub async fn find_by_id(&self, user_id: Uuid) -> Result<users::Model, UserError> {
        users::Entity::find_by_id(user_id)
            .one(&self.db)
            .await?
            .ok_or(UserError::NotFound(user_id))
    }

    /// Lists users of a company.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_by_company(&self, company_id: Uuid) -> Result<Vec<users::Model>, UserError> {
        let users_list = users::Entity::find()
            .filter(users::Column::CompanyId.eq(company_id))
            .order_by_asc(users::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(users_list)
    }

    /// Updates a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the user is not found or the operation fails.
    pub async fn update_user(
        &self,
        user_id: Uuid,
        input: UpdateUserInput,
    ) -> Result<users::Model, UserError> {
        let user = self.find_by_id(user_id).await?;

        let mut active: users::ActiveModel = user.into();

        if let Some(first_name) = input.first_name {
            active.first_name = Set(first_name);
        }
        if let Some(last_name) = input.last_name {
            active.last_name = Set(last_name);
        }
        if let Some(department_id) = input.department_id {
            active.department_id = Set(department_id);
        }
        if let Some(role) = input.role {
            active.role = Set(role);
        }
        if let Some(is_active) = input.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }
}
