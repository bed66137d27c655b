//! Ledger error types.

use gasto_shared::AppError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised when a draw does not fit the remaining budget.
///
/// The `available` figure carried in messages is floored at zero; the
/// raw (possibly negative) figure stays available on [`super::Availability`]
/// for callers that need to detect over-commitment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The category's remaining budget cannot absorb the draw.
    #[error("insufficient budget: requested {requested}, available {available}")]
    InsufficientBudget {
        /// Requested draw amount.
        requested: Decimal,
        /// Remaining category budget, floored at zero.
        available: Decimal,
    },

    /// The department's remaining budget cannot absorb the draw.
    #[error(
        "insufficient budget for department {department}: requested {requested}, available {available}"
    )]
    InsufficientDepartmentBudget {
        /// Department name.
        department: String,
        /// Requested draw amount.
        requested: Decimal,
        /// Remaining department budget, floored at zero.
        available: Decimal,
    },
}

impl From<LedgerError> for AppError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::InsufficientBudget {
                requested,
                available,
            } => Self::InsufficientBudget {
                requested,
                available,
            },
            LedgerError::InsufficientDepartmentBudget {
                department,
                requested,
                available,
            } => Self::InsufficientDepartmentBudget {
                department,
                requested,
                available,
            },
        }
    }
}
