//! Pull Requests API methods

use super::GitHubClient;
use crate::api::PullRequestApi;
use crate::github::ListPullRequestsRequest;
use crate::github::error::{GitHubError, GitHubResult};
use crate::github::rate_limit::wait_until;
use crate::models::{PullRequest, PullRequestDetail, Review};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use log::{debug, info};
use std::future::Future;
use std::time::Duration;

impl GitHubClient {
    /// List pull requests matching the request, all pages
    #[must_use]
    pub fn list_pull_requests(
        &self,
        request: ListPullRequestsRequest,
    ) -> crate::runtime::AsyncStream<Result<PullRequest, GitHubError>> {
        crate::github::list_pull_requests::list_pull_requests(self.inner.clone(), request)
    }

    /// Get a pull request's outstanding review requests
    pub fn get_pull_request(
        &self,
        owner: impl Into<String>,
        repo: impl Into<String>,
        pr_number: u64,
    ) -> crate::runtime::AsyncTask<Result<PullRequestDetail, GitHubError>> {
        crate::github::get_pull_request::get_pull_request(
            self.inner.clone(),
            owner,
            repo,
            pr_number,
        )
    }

    /// Get pull request reviews
    pub fn get_pull_request_reviews(
        &self,
        owner: impl Into<String>,
        repo: impl Into<String>,
        pr_number: u64,
    ) -> crate::runtime::AsyncStream<Result<Review, GitHubError>> {
        crate::github::get_pull_request_reviews::get_pull_request_reviews(
            self.inner.clone(),
            owner,
            repo,
            pr_number,
        )
    }

    /// Update a pull request branch with the latest changes from its base
    pub fn update_pull_request_branch(
        &self,
        owner: impl Into<String>,
        repo: impl Into<String>,
        pr_number: u64,
    ) -> crate::runtime::AsyncTask<Result<(), GitHubError>> {
        crate::github::update_pull_request_branch::update_pull_request_branch(
            self.inner.clone(),
            owner,
            repo,
            pr_number,
        )
    }

    /// Get the time the core request quota resets
    pub fn get_core_quota_reset(
        &self,
    ) -> crate::runtime::AsyncTask<Result<DateTime<Utc>, GitHubError>> {
        crate::github::get_rate_limit::get_core_quota_reset(self.inner.clone())
    }

    /// How long GitHub wants us to back off before the quota is available
    /// again. `None` when the rate limit status cannot be read.
    pub async fn quota_reset_wait(&self) -> Option<Duration> {
        match self.get_core_quota_reset().await {
            Ok(Ok(reset)) => Some(wait_until(reset, Utc::now())),
            Ok(Err(e)) => {
                debug!("Could not read rate limit status: {}", e.message());
                None
            }
            Err(_) => None,
        }
    }

    /// Run one request under the rate limit policy, backing off for the
    /// advertised quota reset on a primary limit.
    async fn rate_limited<T, F, Fut>(&self, route: &str, op: F) -> GitHubResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = GitHubResult<T>>,
    {
        self.rate_limit
            .run_with_reset(route, op, || self.quota_reset_wait())
            .await
    }
}

#[async_trait]
impl PullRequestApi for GitHubClient {
    async fn open_pull_requests(
        &self,
        owner: &str,
        repo: &str,
        base: Option<&str>,
    ) -> GitHubResult<Vec<PullRequest>> {
        if let Some(base) = base {
            info!("Filtering PRs by base branch: {base}");
        }

        let request = ListPullRequestsRequest {
            owner: owner.to_string(),
            repo: repo.to_string(),
            base: base.map(str::to_string),
        };
        let route = format!("GET /repos/{owner}/{repo}/pulls");
        let pulls: Vec<PullRequest> = self
            .rate_limited(&route, || self.list_pull_requests(request.clone()).try_collect())
            .await?;

        info!("Found {} open pull requests.", pulls.len());
        Ok(pulls)
    }

    async fn pull_request_detail(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> GitHubResult<PullRequestDetail> {
        let route = format!("GET /repos/{owner}/{repo}/pulls/{number}");
        self.rate_limited(&route, || async move {
            self.get_pull_request(owner, repo, number).await?
        })
        .await
    }

    async fn pull_request_reviews(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> GitHubResult<Vec<Review>> {
        let route = format!("GET /repos/{owner}/{repo}/pulls/{number}/reviews");
        self.rate_limited(&route, || {
            self.get_pull_request_reviews(owner, repo, number)
                .try_collect()
        })
        .await
    }

    async fn update_branch(&self, owner: &str, repo: &str, number: u64) -> GitHubResult<()> {
        let route = format!("PUT /repos/{owner}/{repo}/pulls/{number}/update-branch");
        self.rate_limited(&route, || async move {
            self.update_pull_request_branch(owner, repo, number).await?
        })
        .await
    }
}
