//! Application error taxonomy.
//!
//! Every fallible operation eventually classifies its failure into one
//! of these variants at the HTTP boundary. Validation and authorization
//! failures are detected before any write; the business-rule variants
//! (insufficient budget, inactive department) carry the figures the
//! caller needs to explain the rejection.

use rust_decimal::Decimal;
use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// Malformed or out-of-range input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Authentication failed or missing.
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// The actor is not allowed to perform the operation.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Illegal transition, e.g. re-approving a reviewed request.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// The category budget cannot absorb the requested draw.
    #[error("Insufficient budget: requested {requested}, available {available}")]
    InsufficientBudget {
        /// The amount the request would draw.
        requested: Decimal,
        /// Remaining category budget, floored at zero for display.
        available: Decimal,
    },

    /// The department budget cannot absorb the requested draw.
    #[error(
        "Insufficient budget for department {department}: requested {requested}, available {available}"
    )]
    InsufficientDepartmentBudget {
        /// The department the category belongs to.
        department: String,
        /// The amount the request would draw.
        requested: Decimal,
        /// Remaining department budget, floored at zero for display.
        available: Decimal,
    },

    /// Requisitions require an active department.
    #[error("Department is inactive: {0}")]
    DepartmentInactive(String),

    /// Conflict (e.g., duplicate email).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    ///
    /// Business-rule rejections report as 400: nothing was written, the
    /// request itself names the draw that cannot be satisfied.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_)
            | Self::InvalidState(_)
            | Self::InsufficientBudget { .. }
            | Self::InsufficientDepartmentBudget { .. }
            | Self::DepartmentInactive(_) => 400,
            Self::Unauthorized(_) => 401,
            Self::Forbidden(_) => 403,
            Self::NotFound(_) => 404,
            Self::Conflict(_) => 409,
            Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the stable error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::InvalidState(_) => "INVALID_STATE",
            Self::InsufficientBudget { .. } => "INSUFFICIENT_BUDGET",
            Self::InsufficientDepartmentBudget { .. } => "INSUFFICIENT_DEPARTMENT_BUDGET",
            Self::DepartmentInactive(_) => "DEPARTMENT_INACTIVE",
            Self::Conflict(_) => "CONFLICT",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether the caller should see the message verbatim.
    ///
    /// Storage and internal failures keep their detail in the logs and
    /// surface an opaque message.
    #[must_use]
    pub const fn is_opaque(&self) -> bool {
        matches!(self, Self::Database(_) | Self::Internal(_))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::Validation(String::new()).status_code(), 400);
        assert_eq!(AppError::InvalidState(String::new()).status_code(), 400);
        assert_eq!(
            AppError::InsufficientBudget {
                requested: dec!(500),
                available: dec!(400),
            }
            .status_code(),
            400
        );
        assert_eq!(
            AppError::DepartmentInactive(String::new()).status_code(),
            400
        );
        assert_eq!(AppError::Unauthorized(String::new()).status_code(), 401);
        assert_eq!(AppError::Forbidden(String::new()).status_code(), 403);
        assert_eq!(AppError::NotFound(String::new()).status_code(), 404);
        assert_eq!(AppError::Conflict(String::new()).status_code(), 409);
        assert_eq!(AppError::Database(String::new()).status_code(), 500);
        assert_eq!(AppError::Internal(String::new()).status_code(), 500);
    }

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(
            AppError::InsufficientBudget {
                requested: dec!(1),
                available: dec!(0),
            }
            .error_code(),
            "INSUFFICIENT_BUDGET"
        );
        assert_eq!(
            AppError::InsufficientDepartmentBudget {
                department: "Operations".into(),
                requested: dec!(1),
                available: dec!(0),
            }
            .error_code(),
            "INSUFFICIENT_DEPARTMENT_BUDGET"
        );
        assert_eq!(
            AppError::DepartmentInactive("Warehouse".into()).error_code(),
            "DEPARTMENT_INACTIVE"
        );
        assert_eq!(AppError::NotFound(String::new()).error_code(), "NOT_FOUND");
    }

    #[test]
    fn test_insufficient_budget_message_carries_figures() {
        let err = AppError::InsufficientBudget {
            requested: dec!(500),
            available: dec!(400),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient budget: requested 500, available 400"
        );
    }

    #[test]
    fn test_opaque_errors() {
        assert!(AppError::Database("details".into()).is_opaque());
        assert!(AppError::Internal("details".into()).is_opaque());
        assert!(!AppError::Forbidden("details".into()).is_opaque());
    }
}
