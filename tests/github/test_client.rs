//! `GitHubClient` against a local HTTP server speaking the GitHub REST API.

use super::stub::{Reply, StubServer};
use approved_pr_updater::{
    GitHubClient, GitHubError, PullRequestApi, RateLimitPolicy, UpdateOutcome,
    classify_update_error,
};
use serde_json::json;
use std::time::Duration;
use tokio::time::timeout;

const UPDATE_BRANCH: &str = "PUT /repos/octo/widgets/pulls/7/update-branch";
const RATE_LIMIT: &str = "GET /rate_limit";

fn client(server: &StubServer, policy: RateLimitPolicy) -> GitHubClient {
    let _ = rustls::crypto::ring::default_provider().install_default();

    GitHubClient::builder()
        .personal_token("ghp_test")
        .base_uri(server.base_uri())
        .rate_limit(policy)
        .build()
        .unwrap()
}

fn accepted() -> Reply {
    Reply::json(
        202,
        json!({
            "message": "Updating pull request branch.",
            "url": "https://github.com/octo/widgets/pull/7"
        }),
    )
}

fn rate(reset: i64) -> serde_json::Value {
    json!({ "limit": 5000, "used": 5000, "remaining": 0, "reset": reset })
}

#[tokio::test]
async fn test_update_branch_accepted() {
    let server = StubServer::start(vec![(UPDATE_BRANCH, vec![accepted()])]).await;
    let gh = client(&server, RateLimitPolicy::default());

    gh.update_branch("octo", "widgets", 7).await.unwrap();

    assert_eq!(server.requests(), vec![UPDATE_BRANCH.to_string()]);
}

#[tokio::test]
async fn test_update_branch_merge_conflict_is_classified_as_conflict() {
    let server = StubServer::start(vec![(
        UPDATE_BRANCH,
        vec![Reply::json(
            422,
            json!({
                "message": "merge conflict between base and head",
                "documentation_url": "https://docs.github.com/rest/pulls/pulls#update-a-pull-request-branch"
            }),
        )],
    )])
    .await;
    let gh = client(&server, RateLimitPolicy::default());

    let err = gh.update_branch("octo", "widgets", 7).await.unwrap_err();

    assert!(matches!(err, GitHubError::Octocrab(_)));
    assert_eq!(err.status(), Some(422));
    assert_eq!(err.message(), "merge conflict between base and head");
    assert_eq!(classify_update_error(&err), UpdateOutcome::Conflict);
    assert_eq!(server.requests().len(), 1);
}

#[tokio::test]
async fn test_primary_rate_limit_waits_for_advertised_reset() {
    let server = StubServer::start(vec![
        (
            UPDATE_BRANCH,
            vec![
                Reply::json(
                    403,
                    json!({
                        "message": "API rate limit exceeded for installation ID 1.",
                        "documentation_url": "https://docs.github.com/rest/overview/resources-in-the-rest-api#rate-limiting"
                    }),
                ),
                accepted(),
            ],
        ),
        (
            RATE_LIMIT,
            vec![Reply::json(200, {
                let reset = chrono::Utc::now().timestamp();
                json!({
                    "resources": {
                        "core": rate(reset),
                        "search": rate(reset),
                        "graphql": rate(reset),
                        "integration_manifest": rate(reset)
                    },
                    "rate": rate(reset)
                })
            })],
        ),
    ])
    .await;

    // Falling back to the fixed delay would sleep for an hour.
    let gh = client(
        &server,
        RateLimitPolicy {
            retry_delay: Duration::from_secs(3600),
            max_delay: Duration::from_secs(3600),
            max_retries: 1,
        },
    );

    timeout(Duration::from_secs(30), gh.update_branch("octo", "widgets", 7))
        .await
        .expect("retry did not use the advertised reset")
        .unwrap();

    assert_eq!(
        server.requests(),
        vec![
            UPDATE_BRANCH.to_string(),
            RATE_LIMIT.to_string(),
            UPDATE_BRANCH.to_string()
        ]
    );
}

#[tokio::test]
async fn test_secondary_rate_limit_is_not_retried() {
    let server = StubServer::start(vec![(
        UPDATE_BRANCH,
        vec![Reply::json(
            403,
            json!({
                "message": "You have exceeded a secondary rate limit.",
                "documentation_url": "https://docs.github.com/rest/overview/rate-limits-for-the-rest-api"
            }),
        )],
    )])
    .await;
    let gh = client(&server, RateLimitPolicy::default());

    let err = gh.update_branch("octo", "widgets", 7).await.unwrap_err();

    assert_eq!(err.status(), Some(403));
    assert_eq!(classify_update_error(&err), UpdateOutcome::Failed);
    assert_eq!(server.requests(), vec![UPDATE_BRANCH.to_string()]);
}
