//! Decide whether a pull request is ready to have its branch updated.

use super::reconcile::ApprovalSummary;
use crate::models::PullRequestDetail;
use std::fmt;

/// Outcome of the readiness check, with the reason it was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// No pending requests and a valid approval
    Ready { approval_count: usize },
    /// A reviewer or team was asked and has not answered yet
    PendingReviews,
    /// Approved by some, but someone's latest review requests changes
    ChangesRequested { approval_count: usize },
    /// No reviewer's latest review approves
    NotApproved,
}

impl Readiness {
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Readiness::Ready { .. })
    }
}

impl fmt::Display for Readiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Readiness::Ready { approval_count } => write!(
                f,
                "{approval_count} approval(s), no pending change requests, and no pending reviews"
            ),
            Readiness::PendingReviews => f.write_str("has pending reviews"),
            Readiness::ChangesRequested { .. } => {
                f.write_str("has approval(s) but also has pending change requests")
            }
            Readiness::NotApproved => f.write_str("does not have required approvals"),
        }
    }
}

/// Evaluate readiness. Pending review requests are checked first: an
/// outstanding request must be awaited even when others already approved.
#[must_use]
pub fn evaluate(detail: &PullRequestDetail, summary: &ApprovalSummary) -> Readiness {
    if detail.has_pending_reviews() {
        return Readiness::PendingReviews;
    }

    if !summary.has_valid_approval {
        return if summary.approval_count > 0 && summary.has_changes_requested {
            Readiness::ChangesRequested {
                approval_count: summary.approval_count,
            }
        } else {
            Readiness::NotApproved
        };
    }

    Readiness::Ready {
        approval_count: summary.approval_count,
    }
}
