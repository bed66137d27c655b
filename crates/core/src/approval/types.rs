//! Request lifecycle types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a budget request or requisition.
///
/// `Approved` and `Rejected` are terminal; once a request leaves
/// `Pending` it can never transition again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Awaiting review.
    Pending,
    /// Approved by a reviewer. Terminal.
    Approved,
    /// Rejected by a reviewer. Terminal.
    Rejected,
}

impl RequestStatus {
    /// Parse a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Whether no further transitions are permitted.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requisition priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Can wait.
    Low,
    /// Normal processing.
    Medium,
    /// Should be handled soon.
    High,
    /// Blocks day-to-day operation.
    Urgent,
}

impl Priority {
    /// Parse a priority from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "urgent" => Some(Self::Urgent),
            _ => None,
        }
    }

    /// Returns the string representation of the priority.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

/// A validated state transition with audit trail information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApprovalAction {
    /// Approve a pending request.
    Approve {
        /// The status after the transition.
        new_status: RequestStatus,
        /// The reviewer performing the approval.
        reviewed_by: Uuid,
        /// When the approval happened.
        reviewed_at: DateTime<Utc>,
    },
    /// Reject a pending request.
    Reject {
        /// The status after the transition.
        new_status: RequestStatus,
        /// The reviewer performing the rejection.
        reviewed_by: Uuid,
        /// When the rejection happened.
        reviewed_at: DateTime<Utc>,
        /// Optional reason (stored for requisitions only).
        reason: Option<String>,
    },
}

impl ApprovalAction {
    /// Returns the status this action transitions into.
    #[must_use]
    pub const fn new_status(&self) -> RequestStatus {
        match self {
            Self::Approve { new_status, .. } | Self::Reject { new_status, .. } => *new_status,
        }
    }

    /// Returns the reviewer recorded on this action.
    #[must_use]
    pub const fn reviewed_by(&self) -> Uuid {
        match self {
            Self::Approve { reviewed_by, .. } | Self::Reject { reviewed_by, .. } => *reviewed_by,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("pending", RequestStatus::Pending)]
    #[case("approved", RequestStatus::Approved)]
    #[case("rejected", RequestStatus::Rejected)]
    #[case("APPROVED", RequestStatus::Approved)]
    fn test_status_parse(#[case] raw: &str, #[case] expected: RequestStatus) {
        assert_eq!(RequestStatus::parse(raw), Some(expected));
    }

    #[rstest]
    #[case(RequestStatus::Pending, "pending", false)]
    #[case(RequestStatus::Approved, "approved", true)]
    #[case(RequestStatus::Rejected, "rejected", true)]
    fn test_status_as_str_and_terminality(
        #[case] status: RequestStatus,
        #[case] expected: &str,
        #[case] terminal: bool,
    ) {
        assert_eq!(status.as_str(), expected);
        assert_eq!(status.to_string(), expected);
        assert_eq!(status.is_terminal(), terminal);
    }

    #[rstest]
    #[case("low", Priority::Low)]
    #[case("medium", Priority::Medium)]
    #[case("high", Priority::High)]
    #[case("urgent", Priority::Urgent)]
    #[case("Urgent", Priority::Urgent)]
    fn test_priority_parse(#[case] raw: &str, #[case] expected: Priority) {
        assert_eq!(Priority::parse(raw), Some(expected));
        assert_eq!(expected.as_str(), raw.to_lowercase());
    }

    #[rstest]
    #[case("")]
    #[case("critical")]
    #[case("done")]
    fn test_unknown_values_rejected(#[case] raw: &str) {
        assert_eq!(RequestStatus::parse(raw), None);
        assert_eq!(Priority::parse(raw), None);
    }
}
