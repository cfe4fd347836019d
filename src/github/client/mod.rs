//! GitHub API client wrapper
//!
//! Provides a clean API for the pull request operations without exposing
//! Octocrab.
//!
//! # Examples
//!
//! ```rust,no_run
//! use approved_pr_updater::{GitHubClient, PullRequestApi};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let gh = GitHubClient::with_token("ghp_...")?;
//!
//!     let open = gh.open_pull_requests("owner", "repo", Some("main")).await?;
//!     println!("{} open pull requests", open.len());
//!
//!     Ok(())
//! }
//! ```

use crate::github::error::{GitHubError, GitHubResult};
use crate::github::rate_limit::RateLimitPolicy;
use jsonwebtoken::EncodingKey;
use octocrab::{
    Octocrab,
    models::{AppId, InstallationId},
};
use std::sync::Arc;

mod pull_requests;

/// GitHub API client wrapper that encapsulates Octocrab.
///
/// Cloning is cheap (Arc clone).
#[derive(Clone, Debug)]
pub struct GitHubClient {
    inner: Arc<Octocrab>,
    rate_limit: RateLimitPolicy,
}

impl GitHubClient {
    /// Create a new client builder
    #[must_use]
    pub fn builder() -> GitHubClientBuilder {
        GitHubClientBuilder::new()
    }

    /// Convenience: create client with personal access token
    pub fn with_token(token: impl Into<String>) -> GitHubResult<Self> {
        Self::builder().personal_token(token).build()
    }

    /// Get inner Octocrab client
    #[must_use]
    pub fn inner(&self) -> &Arc<Octocrab> {
        &self.inner
    }

    /// Rate limit policy applied by the `PullRequestApi` implementation
    #[must_use]
    pub fn rate_limit(&self) -> &RateLimitPolicy {
        &self.rate_limit
    }
}

/// GitHub App credentials: app id, PEM private key, installation to act as
#[derive(Clone)]
struct AppCredentials {
    app_id: AppId,
    private_key: String,
    installation_id: Option<InstallationId>,
}

/// Builder for creating `GitHubClient` with various authentication methods
pub struct GitHubClientBuilder {
    token: Option<String>,
    app_auth: Option<AppCredentials>,
    base_uri: Option<String>,
    rate_limit: RateLimitPolicy,
}

impl GitHubClientBuilder {
    /// Create a new builder
    #[must_use]
    pub fn new() -> Self {
        Self {
            token: None,
            app_auth: None,
            base_uri: None,
            rate_limit: RateLimitPolicy::default(),
        }
    }

    /// Set personal access token for authentication
    pub fn personal_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set GitHub App authentication (app ID and private key).
    ///
    /// Takes precedence over a personal token when both are set.
    pub fn app(mut self, app_id: AppId, private_key: impl Into<String>) -> Self {
        self.app_auth = Some(AppCredentials {
            app_id,
            private_key: private_key.into(),
            installation_id: None,
        });
        self
    }

    /// Act as the given installation of the app set with [`Self::app`].
    pub fn installation(mut self, installation_id: InstallationId) -> Self {
        if let Some(app) = self.app_auth.as_mut() {
            app.installation_id = Some(installation_id);
        }
        self
    }

    /// Set base URI (for GitHub Enterprise)
    pub fn base_uri(mut self, uri: impl Into<String>) -> Self {
        self.base_uri = Some(uri.into());
        self
    }

    /// Override the rate limit retry policy
    pub fn rate_limit(mut self, policy: RateLimitPolicy) -> Self {
        self.rate_limit = policy;
        self
    }

    /// Build the `GitHubClient`
    pub fn build(self) -> GitHubResult<GitHubClient> {
        let mut builder = Octocrab::builder();

        // App auth wins over a token
        let installation_id = if let Some(app) = self.app_auth {
            let key = EncodingKey::from_rsa_pem(app.private_key.as_bytes())
                .map_err(|e| GitHubError::ClientSetup(format!("Invalid RSA key: {e}")))?;
            builder = builder.app(app.app_id, key);
            app.installation_id
        } else {
            if let Some(token) = self.token {
                builder = builder.personal_token(token);
            }
            None
        };

        // Set base URI if provided
        if let Some(uri) = self.base_uri {
            builder = builder
                .base_uri(&uri)
                .map_err(|e| GitHubError::ClientSetup(e.to_string()))?;
        }

        // Build Octocrab instance
        let mut octocrab = builder
            .build()
            .map_err(|e| GitHubError::ClientSetup(e.to_string()))?;

        if let Some(id) = installation_id {
            octocrab = octocrab
                .installation(id)
                .map_err(|e| GitHubError::ClientSetup(e.to_string()))?;
        }

        Ok(GitHubClient {
            inner: Arc::new(octocrab),
            rate_limit: self.rate_limit,
        })
    }
}

impl Default for GitHubClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
