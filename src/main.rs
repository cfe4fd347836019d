// GitHub Action entry point: update the oldest approved pull request.
//
// Reads its inputs from the runner environment, writes outputs to
// GITHUB_OUTPUT, and exits non-zero only when the scan itself fails.

use anyhow::{Context, Result};
use approved_pr_updater::{
    ActionInputs, Credentials, GitHubClient, GithubOutputFile, RunSummary, UpdateDriver, logging,
};
use log::{debug, error, info};
use octocrab::models::{AppId, InstallationId};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Action failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    // Several crypto backends may be linked in; pick one before any TLS use.
    let _ = rustls::crypto::ring::default_provider().install_default();

    let inputs = ActionInputs::from_env().context("Invalid action inputs")?;

    debug!("owner: {}", inputs.repository.owner);
    debug!("repo: {}", inputs.repository.name);
    debug!("basebranch: {}", inputs.base_branch.as_deref().unwrap_or(""));
    debug!("auth: {:?}", inputs.credentials);

    let client = build_client(&inputs).context("Failed to create GitHub client")?;
    let mut outputs = GithubOutputFile::from_env();

    let driver = UpdateDriver::new(
        &client,
        &inputs.repository,
        inputs.base_branch.as_deref(),
    );

    match driver.run(&mut outputs).await? {
        RunSummary::Attempted {
            pull_request,
            outcome,
        } => info!(
            "Finished: attempted branch update on PR #{} ({outcome:?})",
            pull_request.number
        ),
        RunSummary::NoReadyPullRequest => {}
    }
    Ok(())
}

fn build_client(inputs: &ActionInputs) -> Result<GitHubClient> {
    let builder = GitHubClient::builder().base_uri(&inputs.api_url);

    let builder = match &inputs.credentials {
        Credentials::Token(token) => builder.personal_token(token),
        Credentials::App {
            app_id,
            private_key,
            installation_id,
        } => {
            let builder = builder.app(AppId(*app_id), private_key);
            match installation_id {
                Some(id) => builder.installation(InstallationId(*id)),
                None => builder,
            }
        }
    };

    Ok(builder.build()?)
}
