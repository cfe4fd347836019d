//! GitHub Pull Request reviews listing operation.

use crate::github::error::GitHubError;
use crate::models::{Review, ReviewState};
use crate::runtime::{AsyncStream, EmitterBuilder};
use octocrab::models::pulls::{Review as ApiReview, ReviewState as ApiReviewState};
use octocrab::{Octocrab, Page};
use std::sync::Arc;

/// Login GitHub shows for reviews left by deleted accounts.
const GHOST_LOGIN: &str = "ghost";

impl From<ApiReview> for Review {
    fn from(review: ApiReview) -> Self {
        let state = match review.state {
            Some(ApiReviewState::Approved) => ReviewState::Approved,
            Some(ApiReviewState::ChangesRequested) => ReviewState::ChangesRequested,
            Some(ApiReviewState::Commented) => ReviewState::Commented,
            Some(ApiReviewState::Dismissed) => ReviewState::Dismissed,
            Some(ApiReviewState::Pending) => ReviewState::Pending,
            _ => ReviewState::Other,
        };

        Review {
            reviewer: review
                .user
                .map(|user| user.login)
                .unwrap_or_else(|| GHOST_LOGIN.to_string()),
            state,
            submitted_at: review.submitted_at,
        }
    }
}

/// Stream every review on a pull request, all pages.
pub(crate) fn get_pull_request_reviews(
    inner: Arc<Octocrab>,
    owner: impl Into<String>,
    repo: impl Into<String>,
    pr_number: u64,
) -> AsyncStream<Result<Review, GitHubError>> {
    let (owner, repo) = (owner.into(), repo.into());

    let builder = EmitterBuilder::new(Box::new(move || {
        Box::pin(async move {
            let mut page: Page<ApiReview> = inner
                .pulls(&owner, &repo)
                .list_reviews(pr_number)
                .per_page(100)
                .send()
                .await
                .map_err(GitHubError::from)?;

            let mut reviews: Vec<Review> =
                page.take_items().into_iter().map(Review::from).collect();

            while let Some(next) = inner.get_page::<ApiReview>(&page.next).await? {
                page = next;
                reviews.extend(page.take_items().into_iter().map(Review::from));
            }
            Ok(reviews)
        })
    }));
    builder.emit()
}
