//! Repository API seam used by the readiness driver.
//!
//! `GitHubClient` is the production implementation; tests drive the driver
//! through in-memory fakes.

use crate::github::GitHubResult;
use crate::models::{PullRequest, PullRequestDetail, Review};
use async_trait::async_trait;

/// The repository operations the driver needs.
///
/// Implementations own authentication, pagination and rate limiting: every
/// listing comes back fully materialized.
#[async_trait]
pub trait PullRequestApi: Send + Sync {
    /// Open pull requests, oldest first, optionally only those targeting `base`.
    async fn open_pull_requests(
        &self,
        owner: &str,
        repo: &str,
        base: Option<&str>,
    ) -> GitHubResult<Vec<PullRequest>>;

    /// Outstanding reviewer and team requests for one pull request.
    async fn pull_request_detail(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> GitHubResult<PullRequestDetail>;

    /// Every review ever submitted on one pull request, in no particular order.
    async fn pull_request_reviews(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> GitHubResult<Vec<Review>>;

    /// Bring the pull request's head branch up to date with its base.
    ///
    /// A refusal because of a merge conflict is reported as status 422 with
    /// "merge conflict" in the message.
    async fn update_branch(&self, owner: &str, repo: &str, number: u64) -> GitHubResult<()>;
}
