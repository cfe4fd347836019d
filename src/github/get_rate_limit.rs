//! GitHub rate limit status retrieval.

use crate::github::{error::GitHubError, util::spawn_task};
use crate::runtime::AsyncTask;
use chrono::{DateTime, Utc};
use octocrab::Octocrab;
use std::sync::Arc;

/// When the core request quota resets.
///
/// `GET /rate_limit` does not count against the quota, so it still answers
/// once the quota is exhausted.
pub(crate) fn get_core_quota_reset(
    inner: Arc<Octocrab>,
) -> AsyncTask<Result<DateTime<Utc>, GitHubError>> {
    spawn_task(async move {
        let rate_limit = inner.ratelimit().get().await.map_err(GitHubError::from)?;
        let reset = rate_limit.resources.core.reset;

        DateTime::from_timestamp(reset as i64, 0)
            .ok_or_else(|| GitHubError::Other(format!("Invalid quota reset timestamp {reset}")))
    })
}
