//! GitHub REST Data Source
//!
//! [`RepositorySource`] implementation against the GitHub REST API with
//! secure token handling. Every request runs under the injected
//! [`RateLimitGovernor`], and the `X-RateLimit-*` headers of every
//! response (success or failure) are fed back into it.
//!
//! File content is requested with the raw media type, so responses carry
//! the file text directly instead of a base64 JSON envelope.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::debug;

use super::{RateLimitGovernor, RateLimitSnapshot, RepoRef, RepositorySource, TreeListing};
use crate::config::GithubConfig;
use crate::types::{EntryKind, FileEntry, RepoGraphError, Result};

const RAW_CONTENT_TYPE: &str = "application/vnd.github.raw+json";
const JSON_CONTENT_TYPE: &str = "application/vnd.github+json";

pub struct GitHubSource {
    client: reqwest::Client,
    api_base: String,
    token: Option<SecretString>,
    governor: Arc<RateLimitGovernor>,
}

impl std::fmt::Debug for GitHubSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubSource")
            .field("api_base", &self.api_base)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl GitHubSource {
    pub fn new(config: GithubConfig, governor: Arc<RateLimitGovernor>) -> Result<Self> {
        let token = config
            .token
            .or_else(|| std::env::var("GITHUB_TOKEN").ok())
            .map(SecretString::from);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(crate::constants::network::USER_AGENT)
            .build()
            .map_err(RepoGraphError::Http)?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            token,
            governor,
        })
    }

    /// Send one GET, feed the response's budget headers to the governor,
    /// and map failure statuses into the error taxonomy.
    async fn get(&self, url: &str, accept: &'static str) -> Result<reqwest::Response> {
        debug!("GET {}", url);

        let mut request = self.client.get(url).header("Accept", accept);
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {}", token.expose_secret()));
        }

        let response = request.send().await?;
        self.observe_headers(response.headers());

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let remaining = header_num::<u32>(response.headers(), "x-ratelimit-remaining");
        let reset = header_num::<i64>(response.headers(), "x-ratelimit-reset");
        let body = response.text().await.unwrap_or_default();
        let message = if body.is_empty() {
            status.to_string()
        } else {
            body
        };
        Err(RepoGraphError::classify_status(
            status.as_u16(),
            &message,
            remaining,
            reset,
        ))
    }

    /// Merge whatever budget headers the response carried over the
    /// previous observation; absent headers keep their old values.
    fn observe_headers(&self, headers: &HeaderMap) {
        let prev = self.governor.state();
        self.governor.record(RateLimitSnapshot {
            remaining: header_num(headers, "x-ratelimit-remaining").unwrap_or(prev.remaining),
            reset_epoch: header_num(headers, "x-ratelimit-reset").unwrap_or(prev.reset_epoch),
            limit: header_num(headers, "x-ratelimit-limit").unwrap_or(prev.limit),
        });
    }
}

#[async_trait]
impl RepositorySource for GitHubSource {
    async fn default_branch(&self, repo: &RepoRef) -> Result<String> {
        let url = format!("{}/repos/{}/{}", self.api_base, repo.owner, repo.name);
        self.governor
            .execute(|| async {
                let info: RepoInfo = self.get(&url, JSON_CONTENT_TYPE).await?.json().await?;
                Ok(info.default_branch.unwrap_or_else(|| "main".to_string()))
            })
            .await
    }

    async fn tree(&self, repo: &RepoRef, branch: &str) -> Result<TreeListing> {
        let url = format!(
            "{}/repos/{}/{}/git/trees/{}?recursive=1",
            self.api_base, repo.owner, repo.name, branch
        );
        self.governor
            .execute(|| async {
                let response: TreeResponse =
                    self.get(&url, JSON_CONTENT_TYPE).await?.json().await?;
                Ok(TreeListing {
                    entries: map_tree_items(response.tree),
                    truncated: response.truncated,
                })
            })
            .await
    }

    async fn file_content(&self, repo: &RepoRef, path: &str, branch: &str) -> Result<String> {
        let url = format!(
            "{}/repos/{}/{}/contents/{}?ref={}",
            self.api_base, repo.owner, repo.name, path, branch
        );
        self.governor
            .execute(|| async {
                let content = self.get(&url, RAW_CONTENT_TYPE).await?.text().await?;
                Ok(content)
            })
            .await
    }
}

// Response types

#[derive(Debug, Deserialize)]
struct RepoInfo {
    default_branch: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TreeResponse {
    #[serde(default)]
    tree: Vec<TreeItem>,
    #[serde(default)]
    truncated: bool,
}

#[derive(Debug, Deserialize)]
struct TreeItem {
    path: String,
    #[serde(rename = "type")]
    kind: String,
}

/// Map raw tree items onto engine entries. Blobs become files, trees
/// become directories; other kinds (submodule commits) are dropped.
fn map_tree_items(items: Vec<TreeItem>) -> Vec<FileEntry> {
    items
        .into_iter()
        .filter_map(|item| match item.kind.as_str() {
            "blob" => Some(FileEntry {
                path: item.path,
                kind: EntryKind::File,
            }),
            "tree" => Some(FileEntry {
                path: item.path,
                kind: EntryKind::Directory,
            }),
            _ => None,
        })
        .collect()
}

fn header_num<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers.get(name)?.to_str().ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_map_tree_items_kinds() {
        let entries = map_tree_items(vec![
            TreeItem {
                path: "src".to_string(),
                kind: "tree".to_string(),
            },
            TreeItem {
                path: "src/main.rs".to_string(),
                kind: "blob".to_string(),
            },
            TreeItem {
                path: "vendor/dep".to_string(),
                kind: "commit".to_string(),
            },
        ]);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].kind, EntryKind::Directory);
        assert_eq!(entries[1].kind, EntryKind::File);
    }

    #[test]
    fn test_header_num_parsing() {
        let mut headers = HeaderMap::new();
        headers.insert("x-ratelimit-remaining", HeaderValue::from_static("4999"));
        headers.insert("x-ratelimit-reset", HeaderValue::from_static("1700000000"));
        headers.insert("x-ratelimit-limit", HeaderValue::from_static("garbage"));

        assert_eq!(header_num::<u32>(&headers, "x-ratelimit-remaining"), Some(4999));
        assert_eq!(
            header_num::<i64>(&headers, "x-ratelimit-reset"),
            Some(1_700_000_000)
        );
        assert_eq!(header_num::<u32>(&headers, "x-ratelimit-limit"), None);
        assert_eq!(header_num::<u32>(&headers, "missing"), None);
    }
}
