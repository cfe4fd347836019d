//! Collapse a pull request's review history into one verdict.
//!
//! A reviewer's opinion is their most recent review. An approval followed by
//! a change request blocks; a change request later replaced by an approval
//! no longer does.

use crate::models::{Review, ReviewState};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// A reviewer's latest review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewerVerdict {
    pub reviewer: String,
    pub state: ReviewState,
    pub submitted_at: Option<DateTime<Utc>>,
}

/// Aggregate of every reviewer's latest verdict on one pull request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApprovalSummary {
    /// Reviewers whose latest review approves
    pub approval_count: usize,
    /// Whether any reviewer's latest review requests changes
    pub has_changes_requested: bool,
    /// At least one approval and no outstanding change request
    pub has_valid_approval: bool,
}

impl ApprovalSummary {
    /// Build the summary from per-reviewer verdicts.
    pub fn from_verdicts<'a>(verdicts: impl IntoIterator<Item = &'a ReviewerVerdict>) -> Self {
        let (approval_count, has_changes_requested) =
            verdicts
                .into_iter()
                .fold((0, false), |(approvals, changes), verdict| match verdict.state {
                    ReviewState::Approved => (approvals + 1, changes),
                    ReviewState::ChangesRequested => (approvals, true),
                    _ => (approvals, changes),
                });

        Self {
            approval_count,
            has_changes_requested,
            has_valid_approval: approval_count > 0 && !has_changes_requested,
        }
    }
}

/// Latest review per reviewer, keyed by reviewer login.
///
/// A later timestamp replaces an earlier one. On equal timestamps the record
/// that comes later in `reviews` wins. A review without a timestamp is older
/// than any timestamped one.
#[must_use]
pub fn latest_verdicts(reviews: &[Review]) -> BTreeMap<&str, ReviewerVerdict> {
    reviews
        .iter()
        .fold(BTreeMap::<&str, ReviewerVerdict>::new(), |mut latest, review| {
            let replace = latest
                .get(review.reviewer.as_str())
                .is_none_or(|current| current.submitted_at <= review.submitted_at);

            if replace {
                latest.insert(
                    review.reviewer.as_str(),
                    ReviewerVerdict {
                        reviewer: review.reviewer.clone(),
                        state: review.state,
                        submitted_at: review.submitted_at,
                    },
                );
            }
            latest
        })
}

/// Reconcile raw review history into an [`ApprovalSummary`].
#[must_use]
pub fn reconcile(reviews: &[Review]) -> ApprovalSummary {
    ApprovalSummary::from_verdicts(latest_verdicts(reviews).values())
}
