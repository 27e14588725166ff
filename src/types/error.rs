//! Unified Error Type System
//!
//! Centralized error types for the whole analysis engine.
//!
//! ## Error Taxonomy
//!
//! - **NotFound**: repository or branch absent (fail fast)
//! - **Auth**: expired/invalid credential (fail fast)
//! - **RateLimited**: API budget exhausted (wait and retry at the governor)
//! - **EmptyRepository**: repository has no content
//! - **Fetch**: single-file content fetch failed (recovered locally)
//! - **PreconditionFailed**: missing required identifying input
//!
//! Stage-level errors abort an analysis run and surface to the caller;
//! per-file `Fetch` errors are caught inside the dependency analyzer and
//! degrade to "file excluded from graph".

use chrono::DateTime;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoGraphError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Repository Source Errors
    // -------------------------------------------------------------------------
    #[error("repository or branch not found: {0}")]
    NotFound(String),

    #[error("authentication failed: {0}")]
    Auth(String),

    /// API call budget exhausted. Carries the epoch second at which the
    /// remote budget resets; Display renders it human-readable.
    #[error("API rate limit exceeded, resets at {}", format_reset(.reset_epoch))]
    RateLimited { reset_epoch: i64 },

    #[error("repository is empty: {0}")]
    EmptyRepository(String),

    /// Transient failure fetching one file's content. Never escapes the
    /// dependency analyzer; the file is dropped from the graph instead.
    #[error("content fetch failed for {path}: {message}")]
    Fetch { path: String, message: String },

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    #[error("missing required parameter: {0}")]
    PreconditionFailed(String),

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, RepoGraphError>;

fn format_reset(reset_epoch: &i64) -> String {
    DateTime::from_timestamp(*reset_epoch, 0)
        .map(|t| t.format("%H:%M:%S UTC").to_string())
        .unwrap_or_else(|| format!("epoch {}", reset_epoch))
}

impl RepoGraphError {
    /// Create a per-file fetch error
    pub fn fetch(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Check whether this error is the rate-limit condition the governor
    /// retries on.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    /// Classify an HTTP status from the repository data source into the
    /// error taxonomy. 403 is ambiguous on the GitHub API: it is rate
    /// limiting when the remaining budget is zero, an auth failure
    /// otherwise.
    pub fn classify_status(
        status: u16,
        message: &str,
        remaining: Option<u32>,
        reset_epoch: Option<i64>,
    ) -> Self {
        match status {
            404 => Self::NotFound(message.to_string()),
            401 => Self::Auth(message.to_string()),
            429 => Self::RateLimited {
                reset_epoch: reset_epoch.unwrap_or(0),
            },
            403 if remaining == Some(0) => Self::RateLimited {
                reset_epoch: reset_epoch.unwrap_or(0),
            },
            403 => Self::Auth(message.to_string()),
            409 => Self::EmptyRepository(message.to_string()),
            _ => Self::fetch("", format!("HTTP {}: {}", status, message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_not_found() {
        let err = RepoGraphError::classify_status(404, "no such repo", None, None);
        assert!(matches!(err, RepoGraphError::NotFound(_)));
    }

    #[test]
    fn test_classify_auth() {
        let err = RepoGraphError::classify_status(401, "bad credentials", None, None);
        assert!(matches!(err, RepoGraphError::Auth(_)));

        // 403 with budget left is an auth problem, not rate limiting
        let err = RepoGraphError::classify_status(403, "forbidden", Some(100), None);
        assert!(matches!(err, RepoGraphError::Auth(_)));
    }

    #[test]
    fn test_classify_rate_limited() {
        let err = RepoGraphError::classify_status(403, "rate limited", Some(0), Some(1_700_000_000));
        assert!(err.is_rate_limited());

        let err = RepoGraphError::classify_status(429, "too many requests", None, Some(42));
        assert!(err.is_rate_limited());
    }

    #[test]
    fn test_classify_empty_repository() {
        let err = RepoGraphError::classify_status(409, "Git Repository is empty", None, None);
        assert!(matches!(err, RepoGraphError::EmptyRepository(_)));
    }

    #[test]
    fn test_rate_limited_display_is_human_readable() {
        let err = RepoGraphError::RateLimited {
            reset_epoch: 1_700_000_000,
        };
        let text = err.to_string();
        assert!(text.contains("rate limit exceeded"));
        assert!(text.contains("UTC"));
    }

    #[test]
    fn test_fetch_error_carries_path() {
        let err = RepoGraphError::fetch("src/app.js", "connection reset");
        assert_eq!(
            err.to_string(),
            "content fetch failed for src/app.js: connection reset"
        );
    }
}
