//! GitHub pull request update-branch operation.

use crate::github::{error::GitHubError, util::spawn_task};
use crate::runtime::AsyncTask;
use log::debug;
use octocrab::Octocrab;
use serde::Deserialize;
use std::sync::Arc;

/// Body of the 202 answer to an update-branch request
#[derive(Debug, Deserialize)]
struct UpdateBranchResponse {
    #[serde(default)]
    message: String,
}

/// Merge the base branch into the pull request's head branch.
///
/// GitHub answers 202 and performs the update asynchronously; a 422 means the
/// update was refused (for example on a merge conflict).
pub(crate) fn update_pull_request_branch(
    inner: Arc<Octocrab>,
    owner: impl Into<String>,
    repo: impl Into<String>,
    pr_number: u64,
) -> AsyncTask<Result<(), GitHubError>> {
    let (owner, repo) = (owner.into(), repo.into());

    spawn_task(async move {
        // Raw endpoint; octocrab has no typed builder for it.
        let route = format!("/repos/{owner}/{repo}/pulls/{pr_number}/update-branch");
        let body = serde_json::json!({});

        let response: UpdateBranchResponse = inner
            .put(route, Some(&body))
            .await
            .map_err(GitHubError::from)?;

        debug!("update-branch for #{pr_number}: {}", response.message);
        Ok(())
    })
}
