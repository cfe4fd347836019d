//! Pull request snapshots used by the readiness pipeline.
//!
//! These are deliberately smaller than octocrab's models: only the fields the
//! reconciler, evaluator and driver read. Conversions from the API types live
//! next to the operations that fetch them.

use chrono::{DateTime, Utc};

/// An open pull request as returned by the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    /// Web URL of the pull request (empty if the API omitted it)
    pub html_url: String,
    /// Source branch name
    pub head_ref: String,
    pub head_sha: String,
    /// Target branch name
    pub base_ref: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Per-pull-request detail: the review requests that are still outstanding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullRequestDetail {
    pub number: u64,
    /// Logins of reviewers who were asked and have not yet submitted
    pub requested_reviewers: Vec<String>,
    /// Slugs of teams that were asked and have not yet submitted
    pub requested_teams: Vec<String>,
}

impl PullRequestDetail {
    /// Whether any individual or team review request is outstanding.
    #[must_use]
    pub fn has_pending_reviews(&self) -> bool {
        !self.requested_reviewers.is_empty() || !self.requested_teams.is_empty()
    }
}

/// State of a single submitted review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReviewState {
    Approved,
    ChangesRequested,
    Commented,
    Dismissed,
    Pending,
    /// A state this crate does not know about
    Other,
}

/// One review record. A reviewer may have many of these on one pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub reviewer: String,
    pub state: ReviewState,
    /// `None` for reviews that were never submitted
    pub submitted_at: Option<DateTime<Utc>>,
}

impl Review {
    pub fn new(
        reviewer: impl Into<String>,
        state: ReviewState,
        submitted_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            reviewer: reviewer.into(),
            state,
            submitted_at,
        }
    }
}
