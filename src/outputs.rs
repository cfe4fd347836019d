//! Run outputs handed back to the calling workflow.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use thiserror::Error;

pub const PR_NUMBER: &str = "pr_number";
pub const PR_TITLE: &str = "pr_title";
pub const PR_URL: &str = "pr_url";
pub const BRANCH_NAME: &str = "branch_name";
pub const BRANCH_UPDATED: &str = "branch_updated";
pub const HAS_CONFLICTS: &str = "has_conflicts";

/// Failure to record an output
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Unable to write output {name} to {path}: {source}")]
    Write {
        name: String,
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Destination for named string outputs.
pub trait OutputSink {
    fn set_output(&mut self, name: &str, value: &str) -> Result<(), OutputError>;
}

/// Writes outputs the way the Actions runner expects them.
///
/// With `GITHUB_OUTPUT` set, appends to that file; otherwise prints the legacy
/// `::set-output` command to stdout.
#[derive(Debug, Clone, Default)]
pub struct GithubOutputFile {
    path: Option<PathBuf>,
}

impl GithubOutputFile {
    #[must_use]
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// Use the file named by `GITHUB_OUTPUT`, if any.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(
            std::env::var_os("GITHUB_OUTPUT")
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
        )
    }
}

impl OutputSink for GithubOutputFile {
    fn set_output(&mut self, name: &str, value: &str) -> Result<(), OutputError> {
        let Some(path) = &self.path else {
            println!("::set-output name={name}::{}", escape_data(value));
            return Ok(());
        };

        let write_err = |source| OutputError::Write {
            name: name.to_string(),
            path: path.display().to_string(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(write_err)?;
        file.write_all(file_command_entry(name, value).as_bytes())
            .map_err(write_err)
    }
}

/// Format one entry of the `GITHUB_OUTPUT` file.
///
/// Single-line values use `name=value`; anything with a line break uses the
/// heredoc form with a delimiter that does not occur in the value.
#[must_use]
pub fn file_command_entry(name: &str, value: &str) -> String {
    if !value.contains('\n') && !value.contains('\r') {
        return format!("{name}={value}\n");
    }

    let mut delimiter = format!("ghadelimiter_{}", std::process::id());
    while value.contains(&delimiter) {
        delimiter.push('_');
    }
    format!("{name}<<{delimiter}\n{value}\n{delimiter}\n")
}

/// Escape data for a workflow command (`::cmd::data`).
#[must_use]
pub fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Records outputs in memory, in the order they were set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryOutputs {
    entries: Vec<(String, String)>,
}

impl MemoryOutputs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last value set for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names in the order they were set.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }
}

impl OutputSink for MemoryOutputs {
    fn set_output(&mut self, name: &str, value: &str) -> Result<(), OutputError> {
        self.entries.push((name.to_string(), value.to_string()));
        Ok(())
    }
}
