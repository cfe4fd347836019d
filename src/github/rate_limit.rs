//! Rate limit handling for GitHub requests
//!
//! Two tiers: a primary quota exhaustion is retried once after the wait the
//! API advertises, a secondary (abuse) limit is only logged and the error is
//! handed back.

use crate::github::error::{GitHubError, GitHubResult};
use chrono::{DateTime, Utc};
use log::{info, warn};
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

/// What kind of rate limit, if any, an error represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitKind {
    /// Hourly request quota exhausted
    Primary,
    /// Secondary or abuse-detection limit
    Secondary,
    /// Not a rate limit error
    None,
}

/// Classify an API error by status code and message.
///
/// GitHub reports both tiers as 403 or 429; only the message tells them apart.
#[must_use]
pub fn classify_rate_limit(error: &GitHubError) -> RateLimitKind {
    match error.status() {
        Some(403 | 429) => {}
        _ => return RateLimitKind::None,
    }

    let message = error.message().to_lowercase();
    if message.contains("secondary rate limit") || message.contains("abuse") {
        RateLimitKind::Secondary
    } else if message.contains("rate limit") {
        RateLimitKind::Primary
    } else {
        RateLimitKind::None
    }
}

/// Time left until the quota resets at `reset`; zero once it has passed.
#[must_use]
pub fn wait_until(reset: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    (reset - now).to_std().unwrap_or(Duration::ZERO)
}

/// Retry policy applied around every GitHub request.
#[derive(Debug, Clone)]
pub struct RateLimitPolicy {
    /// Wait before retrying a primary limit when the API advertises none
    pub retry_delay: Duration,
    /// Upper bound on any wait, advertised or not
    pub max_delay: Duration,
    /// Retries allowed for a primary limit
    pub max_retries: u32,
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self {
            retry_delay: Duration::from_secs(60),
            max_delay: Duration::from_secs(15 * 60),
            max_retries: 1,
        }
    }
}

impl RateLimitPolicy {
    /// How long to sleep before a retry given the advertised wait, if any.
    #[must_use]
    pub fn delay_for(&self, advertised: Option<Duration>) -> Duration {
        advertised
            .unwrap_or(self.retry_delay)
            .min(self.max_delay)
    }

    /// Run `op`, re-invoking it after [`Self::retry_delay`] when it fails on
    /// a primary rate limit and retries remain. `request` names the call in
    /// log messages.
    pub async fn run<T, F, Fut>(&self, request: &str, op: F) -> GitHubResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = GitHubResult<T>>,
    {
        self.run_with_reset(request, op, || async { None }).await
    }

    /// Like [`Self::run`], but asks `advertised_wait` how long the API wants
    /// the caller to back off before sleeping for a retry.
    pub async fn run_with_reset<T, F, Fut, W, WFut>(
        &self,
        request: &str,
        mut op: F,
        mut advertised_wait: W,
    ) -> GitHubResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = GitHubResult<T>>,
        W: FnMut() -> WFut,
        WFut: Future<Output = Option<Duration>>,
    {
        let mut retries = 0;
        loop {
            let err = match op().await {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };

            match classify_rate_limit(&err) {
                RateLimitKind::Primary => {
                    warn!("Request quota exhausted for request {request}");
                    if retries >= self.max_retries {
                        return Err(err);
                    }
                    retries += 1;
                    let delay = self.delay_for(advertised_wait().await);
                    info!("Retrying after {} seconds!", delay.as_secs());
                    sleep(delay).await;
                }
                RateLimitKind::Secondary => {
                    warn!("SecondaryRateLimit detected for request {request}");
                    return Err(err);
                }
                RateLimitKind::None => return Err(err),
            }
        }
    }
}
