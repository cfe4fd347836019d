//! Action inputs read from the workflow environment.
//!
//! The runner exposes each `with:` input as `INPUT_<NAME>`. Parsing goes
//! through a lookup function so it can be exercised without touching the
//! process environment.

use std::fmt;
use thiserror::Error;

const DEFAULT_API_URL: &str = "https://api.github.com";

/// Invalid or missing action input
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("No repository given: set the `repo` input or GITHUB_REPOSITORY")]
    MissingRepository,

    #[error("Repository must be in owner/name form, got `{0}`")]
    InvalidRepository(String),

    #[error("No credentials given: set `github_token` or the GitHub App inputs")]
    MissingCredentials,

    #[error("`github_app_id` must be a number, got `{0}`")]
    InvalidAppId(String),

    #[error("`github_installation_id` must be a number, got `{0}`")]
    InvalidInstallationId(String),

    #[error("`github_private_key` is required with `github_app_id`")]
    MissingPrivateKey,
}

/// `owner/name` of the repository to scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub owner: String,
    pub name: String,
}

impl Repository {
    pub fn parse(full_name: &str) -> Result<Self, ConfigError> {
        match full_name.trim().split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(ConfigError::InvalidRepository(full_name.to_string())),
        }
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// How to authenticate against the API
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    Token(String),
    App {
        app_id: u64,
        private_key: String,
        installation_id: Option<u64>,
    },
}

// Secrets stay out of debug logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Token(_) => f.debug_tuple("Token").field(&"***").finish(),
            Credentials::App {
                app_id,
                installation_id,
                ..
            } => f
                .debug_struct("App")
                .field("app_id", app_id)
                .field("private_key", &"***")
                .field("installation_id", installation_id)
                .finish(),
        }
    }
}

/// Everything the action reads from its environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionInputs {
    pub credentials: Credentials,
    pub repository: Repository,
    /// Only consider pull requests targeting this branch
    pub base_branch: Option<String>,
    pub api_url: String,
}

impl ActionInputs {
    /// Read inputs from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read inputs through `lookup`, which maps an environment variable name
    /// to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let input = |name: &str| non_empty(lookup(&input_var(name)));

        let credentials = match input("github_app_id") {
            Some(app_id) => Credentials::App {
                app_id: app_id
                    .parse()
                    .map_err(|_| ConfigError::InvalidAppId(app_id.clone()))?,
                private_key: input("github_private_key").ok_or(ConfigError::MissingPrivateKey)?,
                installation_id: input("github_installation_id")
                    .map(|id| id.parse().map_err(|_| ConfigError::InvalidInstallationId(id)))
                    .transpose()?,
            },
            None => input("github_token")
                .or_else(|| non_empty(lookup("GITHUB_TOKEN")))
                .map(Credentials::Token)
                .ok_or(ConfigError::MissingCredentials)?,
        };

        let repository = input("repo")
            .or_else(|| non_empty(lookup("GITHUB_REPOSITORY")))
            .ok_or(ConfigError::MissingRepository)
            .and_then(|full_name| Repository::parse(&full_name))?;

        Ok(Self {
            credentials,
            repository,
            base_branch: input("base_branch"),
            api_url: input("api_url").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        })
    }
}

/// Environment variable the runner uses for input `name`.
fn input_var(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
