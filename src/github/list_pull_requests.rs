//! GitHub open pull request listing operation.

use crate::github::error::GitHubError;
use crate::models::PullRequest;
use crate::runtime::{AsyncStream, EmitterBuilder};
use octocrab::models::pulls::PullRequest as ApiPullRequest;
use octocrab::{Octocrab, Page, params};
use std::sync::Arc;

/// Request parameters for listing open pull requests
#[derive(Debug, Clone)]
pub struct ListPullRequestsRequest {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Only pull requests targeting this branch
    pub base: Option<String>,
}

impl From<ApiPullRequest> for PullRequest {
    fn from(pr: ApiPullRequest) -> Self {
        PullRequest {
            number: pr.number,
            title: pr.title.unwrap_or_default(),
            html_url: pr.html_url.map(|url| url.to_string()).unwrap_or_default(),
            head_ref: pr.head.ref_field,
            head_sha: pr.head.sha,
            base_ref: pr.base.ref_field,
            created_at: pr.created_at,
        }
    }
}

/// List open pull requests, oldest first, walking every page.
pub(crate) fn list_pull_requests(
    inner: Arc<Octocrab>,
    request: ListPullRequestsRequest,
) -> AsyncStream<Result<PullRequest, GitHubError>> {
    let builder = EmitterBuilder::new(Box::new(move || {
        Box::pin(async move {
            let pulls_handler = inner.pulls(&request.owner, &request.repo);
            let mut req = pulls_handler
                .list()
                .state(params::State::Open)
                .sort(params::pulls::Sort::Created)
                .direction(params::Direction::Ascending)
                .per_page(100);

            if let Some(base) = &request.base {
                req = req.base(base);
            }

            let mut page: Page<ApiPullRequest> = req.send().await.map_err(GitHubError::from)?;
            let mut pull_requests: Vec<PullRequest> =
                page.take_items().into_iter().map(PullRequest::from).collect();

            while let Some(next) = inner.get_page::<ApiPullRequest>(&page.next).await? {
                page = next;
                pull_requests.extend(page.take_items().into_iter().map(PullRequest::from));
            }
            Ok(pull_requests)
        })
    }));
    builder.emit()
}
