//! Configuration Types
//!
//! Runtime configuration for the data source and the analysis engine,
//! merged by [`loader::ConfigLoader`] from defaults, a project file and
//! environment variables.

pub mod loader;

pub use loader::ConfigLoader;

use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::analyzer::AnalyzerConfig;
use crate::constants::{analysis, network};
use crate::types::{RepoGraphError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub github: GithubConfig,
    pub analysis: AnalysisConfig,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.github.api_base)
            .map_err(|e| RepoGraphError::Config(format!("invalid api_base: {}", e)))?;
        if self.analysis.max_files == 0 {
            return Err(RepoGraphError::Config(
                "analysis.max_files must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Data-source settings.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    /// REST API base URL.
    pub api_base: String,
    /// Access token. Falls back to the GITHUB_TOKEN environment variable;
    /// never serialized back out.
    #[serde(skip_serializing)]
    pub token: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for GithubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubConfig")
            .field("api_base", &self.api_base)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_base: network::DEFAULT_API_BASE.to_string(),
            token: None,
            timeout_secs: network::DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Analysis engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Sampling cap for dependency analysis.
    pub max_files: usize,
    /// Stagger between consecutive content fetch starts, in milliseconds.
    pub stagger_delay_ms: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_files: analysis::MAX_FILES_TO_ANALYZE,
            stagger_delay_ms: analysis::STAGGER_DELAY_MS,
        }
    }
}

impl AnalysisConfig {
    pub fn to_analyzer_config(&self) -> AnalyzerConfig {
        AnalyzerConfig {
            max_files: self.max_files,
            stagger_delay: Duration::from_millis(self.stagger_delay_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.analysis.max_files, analysis::MAX_FILES_TO_ANALYZE);
        assert_eq!(config.github.api_base, network::DEFAULT_API_BASE);
    }

    #[test]
    fn test_invalid_api_base_rejected() {
        let config = Config {
            github: GithubConfig {
                api_base: "not a url".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            config.validate().unwrap_err(),
            RepoGraphError::Config(_)
        ));
    }

    #[test]
    fn test_zero_cap_rejected() {
        let config = Config {
            analysis: AnalysisConfig {
                max_files: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_token_never_serialized() {
        let config = GithubConfig {
            token: Some("ghp_secret".to_string()),
            ..Default::default()
        };
        let toml = toml::to_string(&config).unwrap();
        assert!(!toml.contains("ghp_secret"));
        let debug = format!("{:?}", config);
        assert!(!debug.contains("ghp_secret"));
    }
}
