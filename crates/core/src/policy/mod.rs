//! Role-based access policy.
//!
//! Every mutating endpoint consults this module before touching the
//! store. The mapping from action to required role is declarative and
//! tested independently of the HTTP layer.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User role within a company.
///
/// Roles are ordered; `Admin` can perform every action `User` can.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular user: operates on resources they created.
    User = 0,
    /// Administrator: unrestricted within the company.
    Admin = 1,
}

impl Role {
    /// Parse a role from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "user" => Some(Self::User),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Returns the string representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Actions gated by the access policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Create a budget allocation.
    CreateBudget,
    /// Update a budget allocation.
    UpdateBudget,
    /// Delete a budget allocation.
    DeleteBudget,
    /// View budget statistics.
    ViewStatistics,
    /// View the emergency fund summary.
    ViewEmergencyFund,
    /// Create a category.
    CreateCategory,
    /// Update a category.
    UpdateCategory,
    /// Delete a category.
    DeleteCategory,
    /// List categories of the company.
    ListCategories,
    /// Create a department.
    CreateDepartment,
    /// Update a department.
    UpdateDepartment,
    /// Delete a department.
    DeleteDepartment,
    /// List departments of the company.
    ListDepartments,
    /// Create a user in the company.
    CreateUser,
    /// Update a user.
    UpdateUser,
    /// Update company details.
    UpdateCompany,
    /// Approve a budget request or requisition.
    ApproveRequest,
    /// Reject a budget request or requisition.
    RejectRequest,
    /// Create a budget request or requisition.
    CreateRequest,
    /// Create a transaction.
    CreateTransaction,
    /// Update a transaction.
    UpdateTransaction,
    /// Soft-delete a transaction.
    DeleteTransaction,
    /// Create a supplier.
    CreateSupplier,
    /// Create a client.
    CreateClient,
    /// Create an invoice.
    CreateInvoice,
    /// Soft-delete an invoice.
    DeleteInvoice,
}

/// Returns the minimum role required for an action.
#[must_use]
pub const fn required_role(action: Action) -> Role {
    match action {
        Action::CreateBudget
        | Action::UpdateBudget
        | Action::DeleteBudget
        | Action::ViewStatistics
        | Action::ViewEmergencyFund
        | Action::CreateCategory
        | Action::UpdateCategory
        | Action::DeleteCategory
        | Action::CreateDepartment
        | Action::UpdateDepartment
        | Action::DeleteDepartment
        | Action::CreateUser
        | Action::UpdateUser
        | Action::UpdateCompany
        | Action::ApproveRequest
        | Action::RejectRequest => Role::Admin,

        Action::ListCategories
        | Action::ListDepartments
        | Action::CreateRequest
        | Action::CreateTransaction
        | Action::UpdateTransaction
        | Action::DeleteTransaction
        | Action::CreateSupplier
        | Action::CreateClient
        | Action::CreateInvoice
        | Action::DeleteInvoice => Role::User,
    }
}

/// An authenticated actor, extracted from the request context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    /// User ID.
    pub id: Uuid,
    /// Company the actor belongs to.
    pub company_id: Uuid,
    /// Actor's role.
    pub role: Role,
}

impl Actor {
    /// Creates an actor.
    #[must_use]
    pub const fn new(id: Uuid, company_id: Uuid, role: Role) -> Self {
        Self {
            id,
            company_id,
            role,
        }
    }

    /// Whether the actor holds the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Capability check: can `actor` perform `action`?
#[must_use]
pub fn can(actor: &Actor, action: Action) -> bool {
    actor.role >= required_role(action)
}

/// Whether `actor` may mutate a resource created by `owner_id`.
///
/// Admins may touch any resource of their company; regular users only
/// resources they created.
#[must_use]
pub fn can_modify_owned(actor: &Actor, owner_id: Uuid) -> bool {
    actor.is_admin() || actor.id == owner_id
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> Actor {
        Actor::new(Uuid::new_v4(), Uuid::new_v4(), Role::Admin)
    }

    fn user() -> Actor {
        Actor::new(Uuid::new_v4(), Uuid::new_v4(), Role::User)
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("USER"), Some(Role::User));
        assert_eq!(Role::parse("owner"), None);
    }

    #[test]
    fn test_role_ordering() {
        assert!(Role::Admin > Role::User);
    }

    #[test]
    fn test_admin_gated_actions() {
        let actor = user();
        for action in [
            Action::CreateBudget,
            Action::UpdateBudget,
            Action::DeleteBudget,
            Action::ViewStatistics,
            Action::ViewEmergencyFund,
            Action::CreateCategory,
            Action::CreateDepartment,
            Action::UpdateDepartment,
            Action::DeleteDepartment,
            Action::CreateUser,
            Action::UpdateUser,
            Action::UpdateCompany,
            Action::ApproveRequest,
            Action::RejectRequest,
        ] {
            assert!(!can(&actor, action), "user must not perform {action:?}");
            assert!(can(&admin(), action), "admin must perform {action:?}");
        }
    }

    #[test]
    fn test_user_level_actions() {
        let actor = user();
        for action in [
            Action::ListCategories,
            Action::ListDepartments,
            Action::CreateRequest,
            Action::CreateTransaction,
            Action::CreateSupplier,
            Action::CreateClient,
            Action::CreateInvoice,
        ] {
            assert!(can(&actor, action), "user must perform {action:?}");
        }
    }

    #[test]
    fn test_owner_can_modify_own_resource() {
        let actor = user();
        assert!(can_modify_owned(&actor, actor.id));
    }

    #[test]
    fn test_non_owner_cannot_modify() {
        let actor = user();
        assert!(!can_modify_owned(&actor, Uuid::new_v4()));
    }

    #[test]
    fn test_admin_can_modify_any_resource() {
        let actor = admin();
        assert!(can_modify_owned(&actor, Uuid::new_v4()));
    }
}
