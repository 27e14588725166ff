//! Repository Data Source Abstraction
//!
//! The engine never talks to a remote API directly; it depends on the
//! [`RepositorySource`] trait and receives an implementation by
//! injection. Calls are neither cheap nor unlimited, which is why every
//! implementation is expected to route through the [`RateLimitGovernor`].
//!
//! ## Modules
//!
//! - `github`: reqwest-based GitHub REST implementation
//! - `rate_limit`: shared call-budget governor with backoff retry

pub mod github;
pub mod rate_limit;

pub use github::GitHubSource;
pub use rate_limit::{GovernorConfig, GovernorStats, RateLimitGovernor, RateLimitSnapshot};

use std::sync::Arc;

use async_trait::async_trait;

use crate::types::{FileEntry, RepoGraphError, Result};

/// Owner/name pair identifying one remote repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    /// Build a reference, rejecting missing identifying parts.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        let owner = owner.into();
        let name = name.into();
        if owner.trim().is_empty() {
            return Err(RepoGraphError::PreconditionFailed("owner".to_string()));
        }
        if name.trim().is_empty() {
            return Err(RepoGraphError::PreconditionFailed("repository name".to_string()));
        }
        Ok(Self { owner, name })
    }

    /// Parse an `owner/name` spec as given on the command line.
    pub fn parse(spec: &str) -> Result<Self> {
        match spec.split_once('/') {
            Some((owner, name)) => Self::new(owner, name),
            None => Err(RepoGraphError::PreconditionFailed(format!(
                "repository spec '{}' (expected owner/name)",
                spec
            ))),
        }
    }
}

impl std::fmt::Display for RepoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// One recursive tree listing. `truncated` reports whether the remote
/// cut the listing short for size.
#[derive(Debug, Clone, Default)]
pub struct TreeListing {
    pub entries: Vec<FileEntry>,
    pub truncated: bool,
}

/// Abstract repository metadata/content source.
#[async_trait]
pub trait RepositorySource: Send + Sync {
    /// Name of the repository's default branch.
    async fn default_branch(&self, repo: &RepoRef) -> Result<String>;

    /// Recursive file listing of `branch`.
    async fn tree(&self, repo: &RepoRef, branch: &str) -> Result<TreeListing>;

    /// Raw text content of one file.
    async fn file_content(&self, repo: &RepoRef, path: &str, branch: &str) -> Result<String>;
}

/// Shared source handle passed across analysis stages.
pub type SharedSource = Arc<dyn RepositorySource>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_ref_parse() {
        let repo = RepoRef::parse("rust-lang/cargo").unwrap();
        assert_eq!(repo.owner, "rust-lang");
        assert_eq!(repo.name, "cargo");
        assert_eq!(repo.to_string(), "rust-lang/cargo");
    }

    #[test]
    fn test_repo_ref_rejects_missing_parts() {
        assert!(matches!(
            RepoRef::parse("justaname").unwrap_err(),
            RepoGraphError::PreconditionFailed(_)
        ));
        assert!(RepoRef::new("", "cargo").is_err());
        assert!(RepoRef::new("rust-lang", "  ").is_err());
    }
}
