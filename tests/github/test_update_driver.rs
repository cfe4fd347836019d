//! End-to-end runs of the update driver.

use super::fake::{Call, FakeGitHub, UpdateResponse, at};
use approved_pr_updater::outputs::{
    BRANCH_NAME, BRANCH_UPDATED, HAS_CONFLICTS, PR_NUMBER, PR_TITLE, PR_URL,
};
use approved_pr_updater::{
    MemoryOutputs, Repository, Review, ReviewState, RunError, RunSummary, UpdateDriver,
    UpdateOutcome,
};

fn repository() -> Repository {
    Repository {
        owner: "octo".to_string(),
        name: "widgets".to_string(),
    }
}

fn approved_by(reviewer: &str) -> Vec<Review> {
    vec![Review::new(reviewer, ReviewState::Approved, at(100))]
}

fn changes_requested_by(reviewer: &str) -> Vec<Review> {
    vec![Review::new(reviewer, ReviewState::ChangesRequested, at(100))]
}

async fn run(api: &FakeGitHub, base: Option<&str>) -> (Result<RunSummary, RunError>, MemoryOutputs) {
    let repository = repository();
    let mut outputs = MemoryOutputs::new();
    let result = UpdateDriver::new(api, &repository, base)
        .run(&mut outputs)
        .await;
    (result, outputs)
}

#[tokio::test]
async fn stops_at_the_first_ready_pull_request() {
    let api = FakeGitHub::new()
        .pull(1, "main", vec![])
        .pull(2, "main", changes_requested_by("alice"))
        .pull(3, "main", approved_by("bob"))
        .pull(4, "main", approved_by("bob"))
        .pull(5, "main", approved_by("carol"));

    let (result, outputs) = run(&api, None).await;

    let summary = result.unwrap();
    assert!(matches!(
        summary,
        RunSummary::Attempted { ref pull_request, outcome: UpdateOutcome::Updated }
            if pull_request.number == 3
    ));
    assert_eq!(
        api.calls(),
        vec![
            Call::List(None),
            Call::Detail(1),
            Call::Reviews(1),
            Call::Detail(2),
            Call::Reviews(2),
            Call::Detail(3),
            Call::Reviews(3),
            Call::Update(3),
        ]
    );
    assert_eq!(api.updates(), vec![3]);

    assert_eq!(outputs.get(PR_NUMBER), Some("3"));
    assert_eq!(outputs.get(PR_TITLE), Some("Change 3"));
    assert_eq!(
        outputs.get(PR_URL),
        Some("https://github.com/octo/widgets/pull/3")
    );
    assert_eq!(outputs.get(BRANCH_NAME), Some("feature-3"));
    assert_eq!(outputs.get(BRANCH_UPDATED), Some("true"));
    assert_eq!(outputs.get(HAS_CONFLICTS), None);
}

#[tokio::test]
async fn identity_outputs_are_set_before_the_update_result() {
    let api = FakeGitHub::new().pull(7, "main", approved_by("alice"));

    let (result, outputs) = run(&api, None).await;

    assert!(result.is_ok());
    assert_eq!(
        outputs.names().collect::<Vec<_>>(),
        vec![PR_NUMBER, PR_TITLE, PR_URL, BRANCH_NAME, BRANCH_UPDATED]
    );
}

#[tokio::test]
async fn pending_review_requests_block_approved_pull_requests() {
    let api = FakeGitHub::new()
        .pull(1, "main", approved_by("alice"))
        .requested_reviewer(1, "dave")
        .pull(2, "main", approved_by("alice"))
        .requested_team(2, "platform")
        .pull(3, "main", approved_by("alice"));

    let (result, _) = run(&api, None).await;

    assert!(matches!(
        result.unwrap(),
        RunSummary::Attempted { pull_request, .. } if pull_request.number == 3
    ));
    assert_eq!(api.updates(), vec![3]);
}

#[tokio::test]
async fn latest_review_per_reviewer_decides() {
    // alice requested changes, then approved; bob approved afterwards
    let api = FakeGitHub::new().pull(
        5,
        "main",
        vec![
            Review::new("bob", ReviewState::Approved, at(3)),
            Review::new("alice", ReviewState::Approved, at(2)),
            Review::new("alice", ReviewState::ChangesRequested, at(1)),
        ],
    );

    let (result, outputs) = run(&api, None).await;

    assert!(result.is_ok());
    assert_eq!(api.updates(), vec![5]);
    assert_eq!(outputs.get(PR_NUMBER), Some("5"));
}

#[tokio::test]
async fn merge_conflict_is_reported_without_failing() {
    let api = FakeGitHub::new()
        .pull(1, "main", approved_by("alice"))
        .update_response(UpdateResponse::Rejected {
            status: 422,
            message: "merge conflict between base and head".to_string(),
        });

    let (result, outputs) = run(&api, None).await;

    assert!(matches!(
        result.unwrap(),
        RunSummary::Attempted {
            outcome: UpdateOutcome::Conflict,
            ..
        }
    ));
    assert_eq!(outputs.get(BRANCH_UPDATED), Some("false"));
    assert_eq!(outputs.get(HAS_CONFLICTS), Some("true"));
    assert_eq!(api.updates(), vec![1]);
}

#[tokio::test]
async fn other_update_failures_are_reported_without_failing() {
    let api = FakeGitHub::new()
        .pull(1, "main", approved_by("alice"))
        .update_response(UpdateResponse::Rejected {
            status: 403,
            message: "Resource not accessible by integration".to_string(),
        });

    let (result, outputs) = run(&api, None).await;

    assert!(matches!(
        result.unwrap(),
        RunSummary::Attempted {
            outcome: UpdateOutcome::Failed,
            ..
        }
    ));
    assert_eq!(outputs.get(BRANCH_UPDATED), Some("false"));
    assert_eq!(outputs.get(HAS_CONFLICTS), None);
}

#[tokio::test]
async fn no_open_pull_requests_is_a_quiet_success() {
    let api = FakeGitHub::new();

    let (result, outputs) = run(&api, None).await;

    assert_eq!(result.unwrap(), RunSummary::NoReadyPullRequest);
    assert!(outputs.is_empty());
    assert_eq!(api.calls(), vec![Call::List(None)]);
}

#[tokio::test]
async fn nothing_ready_sets_no_outputs() {
    let api = FakeGitHub::new()
        .pull(1, "main", vec![])
        .pull(2, "main", changes_requested_by("alice"));

    let (result, outputs) = run(&api, None).await;

    assert_eq!(result.unwrap(), RunSummary::NoReadyPullRequest);
    assert!(outputs.is_empty());
    assert!(api.updates().is_empty());
}

#[tokio::test]
async fn base_branch_filter_is_passed_to_the_listing() {
    let api = FakeGitHub::new()
        .pull(1, "develop", approved_by("alice"))
        .pull(2, "main", approved_by("alice"));

    let (result, _) = run(&api, Some("main")).await;

    assert!(result.is_ok());
    assert_eq!(api.calls().first(), Some(&Call::List(Some("main".to_string()))));
    assert_eq!(api.updates(), vec![2]);
}

#[tokio::test]
async fn listing_failure_fails_the_run() {
    let api = FakeGitHub::new().pull(1, "main", approved_by("alice")).failing_list();

    let (result, outputs) = run(&api, None).await;

    let err = result.unwrap_err();
    assert!(matches!(err, RunError::Api(ref e) if e.status() == Some(401)));
    assert!(outputs.is_empty());
}

#[tokio::test]
async fn detail_failure_mid_scan_fails_the_run() {
    let api = FakeGitHub::new()
        .pull(1, "main", vec![])
        .pull(2, "main", approved_by("alice"))
        .pull(3, "main", approved_by("alice"))
        .failing_detail(2);

    let (result, outputs) = run(&api, None).await;

    assert!(matches!(result, Err(RunError::Api(_))));
    assert!(api.updates().is_empty());
    assert!(!api.calls().contains(&Call::Detail(3)));
    assert!(outputs.is_empty());
}
