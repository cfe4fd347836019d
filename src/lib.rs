//! `approved_pr_updater` - keep the oldest approved pull request up to date
//!
//! Scans a repository's open pull requests oldest-first, reconciles each
//! one's review history into a single approval verdict, and merges the base
//! branch into the first pull request that has a valid approval and no
//! outstanding review requests. GitHub access goes through octocrab.

// Module declarations
pub mod api;
pub mod config;
pub mod driver;
pub mod github;
pub mod logging;
pub mod models;
pub mod outputs;
pub mod readiness;
pub mod runtime;

// Re-export runtime types
pub use runtime::{AsyncStream, AsyncTask, EmitterBuilder};

// Re-export GitHub client types
pub use api::PullRequestApi;
pub use github::{GitHubClient, GitHubClientBuilder, RateLimitPolicy};

// Re-export GitHub error types
pub use github::{GitHubError, GitHubResult};

// Re-export the readiness pipeline
pub use config::{ActionInputs, ConfigError, Credentials, Repository};
pub use driver::{RunError, RunSummary, UpdateDriver, UpdateOutcome, classify_update_error};
pub use models::{PullRequest, PullRequestDetail, Review, ReviewState};
pub use outputs::{GithubOutputFile, MemoryOutputs, OutputError, OutputSink};
pub use readiness::{ApprovalSummary, Readiness, ReviewerVerdict, evaluate, reconcile};
