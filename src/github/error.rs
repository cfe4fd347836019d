//! GitHub API error types

use thiserror::Error;

/// Error types for GitHub API operations
#[derive(Debug, Error)]
pub enum GitHubError {
    /// Octocrab library error
    #[error("Octocrab error: {0}")]
    Octocrab(#[from] octocrab::Error),

    /// API responded with a non-success status
    #[error("GitHub API error ({status}): {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Message from the response body
        message: String,
    },

    /// Client setup/configuration error
    #[error("Client setup failed: {0}")]
    ClientSetup(String),

    /// The spawned request task was dropped before it produced a result
    #[error("GitHub request task was cancelled")]
    TaskCancelled(#[from] tokio::sync::oneshot::error::RecvError),

    /// Other error with message
    #[error("{0}")]
    Other(String),
}

impl GitHubError {
    /// HTTP status code carried by the error, if the API produced one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            GitHubError::Octocrab(octocrab::Error::GitHub { source, .. }) => {
                Some(source.status_code.as_u16())
            }
            GitHubError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Human-readable message. For API errors this is the message GitHub put
    /// in the response body; otherwise the error's display form.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            GitHubError::Octocrab(octocrab::Error::GitHub { source, .. }) => source.message.clone(),
            GitHubError::Status { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Convenience result alias for GitHub operations
pub type GitHubResult<T> = Result<T, GitHubError>;

// Convenience conversions
impl From<String> for GitHubError {
    fn from(s: String) -> Self {
        GitHubError::Other(s)
    }
}

impl From<&str> for GitHubError {
    fn from(s: &str) -> Self {
        GitHubError::Other(s.to_string())
    }
}
