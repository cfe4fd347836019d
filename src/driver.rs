//! Scan open pull requests oldest-first and update the first ready one.

use crate::api::PullRequestApi;
use crate::config::Repository;
use crate::github::GitHubError;
use crate::models::PullRequest;
use crate::outputs::{self, OutputError, OutputSink};
use crate::readiness::{Readiness, evaluate, reconcile};
use log::{info, warn};
use std::future::Future;
use thiserror::Error;

/// Status GitHub answers with when it refuses to update a branch
const UNPROCESSABLE_ENTITY: u16 = 422;

/// Failures that abort the run
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Api(#[from] GitHubError),

    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Result of the branch update attempt. Informational only: none of these
/// fail the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    /// The head branch conflicts with the base and needs manual resolution
    Conflict,
    Failed,
}

/// What a completed run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunSummary {
    /// Nothing was ready; no outputs were set
    NoReadyPullRequest,
    /// `pull_request` was ready and its branch update was attempted
    Attempted {
        pull_request: PullRequest,
        outcome: UpdateOutcome,
    },
}

/// Classify a failed update. Conflicts are reported by GitHub as 422 with
/// "merge conflict" in the message; everything else is a plain failure.
#[must_use]
pub fn classify_update_error(error: &GitHubError) -> UpdateOutcome {
    if error.status() == Some(UNPROCESSABLE_ENTITY) && error.message().contains("merge conflict") {
        UpdateOutcome::Conflict
    } else {
        UpdateOutcome::Failed
    }
}

/// Return the first candidate `is_ready` accepts, checking strictly in
/// order and not looking past the first hit.
pub async fn find_first_ready<T, E, F, Fut>(
    candidates: impl IntoIterator<Item = T>,
    mut is_ready: F,
) -> Result<Option<T>, E>
where
    T: Copy,
    F: FnMut(T) -> Fut,
    Fut: Future<Output = Result<bool, E>>,
{
    for candidate in candidates {
        if is_ready(candidate).await? {
            return Ok(Some(candidate));
        }
    }
    Ok(None)
}

/// Drives one run against a repository.
pub struct UpdateDriver<'a, A: ?Sized> {
    api: &'a A,
    repository: &'a Repository,
    base_branch: Option<&'a str>,
}

impl<'a, A> UpdateDriver<'a, A>
where
    A: PullRequestApi + ?Sized,
{
    pub fn new(api: &'a A, repository: &'a Repository, base_branch: Option<&'a str>) -> Self {
        Self {
            api,
            repository,
            base_branch,
        }
    }

    /// Find the oldest ready pull request and update its branch.
    ///
    /// Fetch failures abort the run. The update itself never does: its
    /// outcome is reported through `outputs` and the returned summary.
    pub async fn run<O>(&self, outputs: &mut O) -> Result<RunSummary, RunError>
    where
        O: OutputSink + ?Sized,
    {
        let Repository { owner, name } = self.repository;
        info!("Searching for approved PRs in {owner}/{name}...");

        let pull_requests = self
            .api
            .open_pull_requests(owner, name, self.base_branch)
            .await?;

        let ready = find_first_ready(&pull_requests, |pr| self.check(pr)).await?;

        let Some(pr) = ready else {
            info!("No approved pull requests found that meet all criteria.");
            return Ok(RunSummary::NoReadyPullRequest);
        };

        let outcome = self.update(pr, outputs).await?;
        Ok(RunSummary::Attempted {
            pull_request: pr.clone(),
            outcome,
        })
    }

    /// Fetch detail and reviews for one pull request and decide readiness.
    pub async fn check(&self, pr: &PullRequest) -> Result<bool, GitHubError> {
        let Repository { owner, name } = self.repository;
        info!("Checking PR #{}: {}...", pr.number, pr.title);

        let detail = self.api.pull_request_detail(owner, name, pr.number).await?;
        let reviews = self.api.pull_request_reviews(owner, name, pr.number).await?;
        let readiness = evaluate(&detail, &reconcile(&reviews));

        match readiness {
            Readiness::Ready { .. } => {
                info!("Found approved PR #{}: {} with {readiness}", pr.number, pr.title);
            }
            _ => info!("PR #{} {readiness}. Skipping.", pr.number),
        }
        Ok(readiness.is_ready())
    }

    /// Publish the pull request's identity, then attempt the branch update
    /// exactly once.
    async fn update<O>(&self, pr: &PullRequest, outputs: &mut O) -> Result<UpdateOutcome, RunError>
    where
        O: OutputSink + ?Sized,
    {
        let Repository { owner, name } = self.repository;

        outputs.set_output(outputs::PR_NUMBER, &pr.number.to_string())?;
        outputs.set_output(outputs::PR_TITLE, &pr.title)?;
        outputs.set_output(outputs::PR_URL, &pr.html_url)?;
        outputs.set_output(outputs::BRANCH_NAME, &pr.head_ref)?;

        info!("Updating PR branch for PR #{}...", pr.number);
        let outcome = match self.api.update_branch(owner, name, pr.number).await {
            Ok(()) => {
                info!("Successfully updated branch for PR #{}", pr.number);
                UpdateOutcome::Updated
            }
            Err(err) => {
                warn!("Error updating branch: {}", err.message());
                classify_update_error(&err)
            }
        };

        outputs.set_output(
            outputs::BRANCH_UPDATED,
            if outcome == UpdateOutcome::Updated {
                "true"
            } else {
                "false"
            },
        )?;

        if outcome == UpdateOutcome::Conflict {
            outputs.set_output(outputs::HAS_CONFLICTS, "true")?;
            warn!("The PR branch has conflicts that need manual resolution");
        }

        Ok(outcome)
    }
}
