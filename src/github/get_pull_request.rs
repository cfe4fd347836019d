//! GitHub single pull request retrieval operation.

use crate::github::{error::GitHubError, util::spawn_task};
use crate::models::PullRequestDetail;
use crate::runtime::AsyncTask;
use octocrab::Octocrab;
use octocrab::models::pulls::PullRequest as ApiPullRequest;
use std::sync::Arc;

impl From<ApiPullRequest> for PullRequestDetail {
    fn from(pr: ApiPullRequest) -> Self {
        PullRequestDetail {
            number: pr.number,
            requested_reviewers: pr
                .requested_reviewers
                .unwrap_or_default()
                .into_iter()
                .map(|author| author.login)
                .collect(),
            requested_teams: pr
                .requested_teams
                .unwrap_or_default()
                .into_iter()
                .map(|team| team.slug)
                .collect(),
        }
    }
}

/// Fetch a pull request with its outstanding review requests.
///
/// The listing endpoint does not reliably carry `requested_reviewers`, so
/// readiness checks always go through this call.
pub(crate) fn get_pull_request(
    inner: Arc<Octocrab>,
    owner: impl Into<String>,
    repo: impl Into<String>,
    pr_number: u64,
) -> AsyncTask<Result<PullRequestDetail, GitHubError>> {
    let (owner, repo) = (owner.into(), repo.into());
    spawn_task(async move {
        let pr = inner
            .pulls(&owner, &repo)
            .get(pr_number)
            .await
            .map_err(GitHubError::from)?;

        Ok(PullRequestDetail::from(pr))
    })
}
