//! Request state transitions.
//!
//! The state machine is deliberately small: `pending` is the only
//! status with outgoing edges. Approval is one-way; a rejected request
//! stays rejected and an approved request can never be rejected later.

use chrono::Utc;
use uuid::Uuid;

use super::error::ApprovalError;
use super::types::{ApprovalAction, RequestStatus};

/// Stateless service for request lifecycle transitions.
pub struct ApprovalService;

impl ApprovalService {
    /// Approve a pending request.
    ///
    /// # Errors
    ///
    /// Returns `ApprovalError::InvalidTransition` when the request is
    /// not `pending` (re-approving is an error, not a no-op).
    pub fn approve(
        current_status: RequestStatus,
        reviewed_by: Uuid,
    ) -> Result<ApprovalAction, ApprovalError> {
        match current_status {
            RequestStatus::Pending => Ok(ApprovalAction::Approve {
                new_status: RequestStatus::Approved,
                reviewed_by,
                reviewed_at: Utc::now(),
            }),
            _ => Err(ApprovalError::InvalidTransition {
                from: current_status,
                to: RequestStatus::Approved,
            }),
        }
    }

    /// Reject a pending request.
    ///
    /// The reason is carried on the action; requisitions persist it,
    /// budget requests do not.
    ///
    /// # Errors
    ///
    /// Returns `ApprovalError::InvalidTransition` when the request is
    /// not `pending`. Rejecting an approved request is always an error;
    /// approval is one-way.
    pub fn reject(
        current_status: RequestStatus,
        reviewed_by: Uuid,
        reason: Option<String>,
    ) -> Result<ApprovalAction, ApprovalError> {
        match current_status {
            RequestStatus::Pending => Ok(ApprovalAction::Reject {
                new_status: RequestStatus::Rejected,
                reviewed_by,
                reviewed_at: Utc::now(),
                reason,
            }),
            _ => Err(ApprovalError::InvalidTransition {
                from: current_status,
                to: RequestStatus::Rejected,
            }),
        }
    }

    /// Check if a status transition is valid.
    ///
    /// Valid transitions:
    /// - Pending → Approved (approve)
    /// - Pending → Rejected (reject)
    #[must_use]
    pub fn is_valid_transition(from: RequestStatus, to: RequestStatus) -> bool {
        matches!(
            (from, to),
            (
                RequestStatus::Pending,
                RequestStatus::Approved | RequestStatus::Rejected
            )
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approve_from_pending() {
        let reviewer = Uuid::new_v4();
        let action = ApprovalService::approve(RequestStatus::Pending, reviewer).unwrap();

        assert_eq!(action.new_status(), RequestStatus::Approved);
        assert_eq!(action.reviewed_by(), reviewer);
    }

    #[test]
    fn test_approve_already_approved_fails() {
        let result = ApprovalService::approve(RequestStatus::Approved, Uuid::new_v4());
        assert_eq!(
            result.unwrap_err(),
            ApprovalError::InvalidTransition {
                from: RequestStatus::Approved,
                to: RequestStatus::Approved,
            }
        );
    }

    #[test]
    fn test_approve_rejected_fails() {
        let result = ApprovalService::approve(RequestStatus::Rejected, Uuid::new_v4());
        assert!(matches!(
            result,
            Err(ApprovalError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_reject_from_pending() {
        let action = ApprovalService::reject(
            RequestStatus::Pending,
            Uuid::new_v4(),
            Some("over budget this quarter".to_string()),
        )
        .unwrap();

        assert_eq!(action.new_status(), RequestStatus::Rejected);
        match action {
            ApprovalAction::Reject { reason, .. } => {
                assert_eq!(reason.as_deref(), Some("over budget this quarter"));
            }
            ApprovalAction::Approve { .. } => panic!("expected reject action"),
        }
    }

    #[test]
    fn test_reject_without_reason() {
        let action =
            ApprovalService::reject(RequestStatus::Pending, Uuid::new_v4(), None).unwrap();
        assert_eq!(action.new_status(), RequestStatus::Rejected);
    }

    #[test]
    fn test_reject_approved_fails() {
        // Approval is one-way; an approved request can never be rejected.
        let result = ApprovalService::reject(RequestStatus::Approved, Uuid::new_v4(), None);
        assert!(matches!(
            result,
            Err(ApprovalError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_reject_rejected_fails() {
        let result = ApprovalService::reject(RequestStatus::Rejected, Uuid::new_v4(), None);
        assert!(matches!(
            result,
            Err(ApprovalError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_is_valid_transition() {
        assert!(ApprovalService::is_valid_transition(
            RequestStatus::Pending,
            RequestStatus::Approved
        ));
        assert!(ApprovalService::is_valid_transition(
            RequestStatus::Pending,
            RequestStatus::Rejected
        ));

        assert!(!ApprovalService::is_valid_transition(
            RequestStatus::Approved,
            RequestStatus::Rejected
        ));
        assert!(!ApprovalService::is_valid_transition(
            RequestStatus::Rejected,
            RequestStatus::Approved
        ));
        assert!(!ApprovalService::is_valid_transition(
            RequestStatus::Approved,
            RequestStatus::Pending
        ));
    }
}
