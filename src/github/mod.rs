//! GitHub API operations module
//!
//! Provides the pull request operations the driver needs, using the octocrab
//! library.

pub mod client;
pub mod error;
pub mod rate_limit;
pub mod util;

// Re-export client types
pub use client::{GitHubClient, GitHubClientBuilder};

// Re-export error types
pub use error::{GitHubError, GitHubResult};
pub use rate_limit::{RateLimitKind, RateLimitPolicy, classify_rate_limit, wait_until};
pub use util::spawn_task;

// Re-export options types
pub use list_pull_requests::ListPullRequestsRequest;

// GitHub API operations - Pull Requests (internal)
pub(crate) mod get_pull_request;
pub(crate) mod get_pull_request_reviews;
pub(crate) mod get_rate_limit;
pub(crate) mod list_pull_requests;
pub(crate) mod update_pull_request_branch;
