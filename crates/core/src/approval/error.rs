//! Approval error types.

use gasto_shared::AppError;
use rust_decimal::Decimal;
use thiserror::Error;

use super::types::RequestStatus;

/// Errors that can occur during approval operations and request
/// validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApprovalError {
    /// Attempted a transition out of a terminal status.
    #[error("invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: RequestStatus,
        /// The attempted target status.
        to: RequestStatus,
    },

    /// Requested amount must be strictly positive.
    #[error("requested amount must be greater than zero")]
    NonPositiveAmount,

    /// Requested amount exceeds the hard ceiling.
    #[error("requested amount {amount} exceeds the maximum of {limit}")]
    AmountTooLarge {
        /// The requested amount.
        amount: Decimal,
        /// The hard ceiling.
        limit: Decimal,
    },

    /// Amounts carry at most two decimal places.
    #[error("requested amount must have at most two decimal places")]
    TooManyDecimalPlaces,

    /// Description too short after markup stripping.
    #[error("description must be at least {min} characters (got {len})")]
    DescriptionTooShort {
        /// Sanitized description length.
        len: usize,
        /// Minimum accepted length.
        min: usize,
    },

    /// Description too long after markup stripping.
    #[error("description must be at most {max} characters (got {len})")]
    DescriptionTooLong {
        /// Sanitized description length.
        len: usize,
        /// Maximum accepted length.
        max: usize,
    },

    /// Unknown priority value.
    #[error("invalid priority: {0}")]
    InvalidPriority(String),
}

impl From<ApprovalError> for AppError {
    fn from(e: ApprovalError) -> Self {
        match e {
            ApprovalError::InvalidTransition { from, to } => {
                Self::InvalidState(format!("cannot transition from {from} to {to}"))
            }
            other => Self::Validation(other.to_string()),
        }
    }
}
