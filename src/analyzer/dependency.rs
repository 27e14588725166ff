//! Dependency Analyzer
//!
//! Turns the repository listing plus fetched file contents into the
//! dependency graph: select a bounded sample of recognized source files,
//! fetch contents with staggered concurrent starts, scrape imports with
//! the language registry's patterns, resolve each import against the
//! sampled file set, and emit edges whose endpoints are both present as
//! nodes.
//!
//! Per-file fetch failures are logged and exclude just that file; the
//! batch never aborts. Node emission follows fetch-completion order, so
//! node and edge *lists* are nondeterministic while the underlying sets
//! are stable for a fixed input.

use std::collections::HashSet;
use std::time::Duration;

use futures::stream::{FuturesUnordered, StreamExt};
use tracing::{debug, warn};

use super::language::{LanguageProfile, LanguageRegistry};
use super::resolver::resolve_relative;
use crate::constants::analysis as analysis_constants;
use crate::source::{RepoRef, SharedSource};
use crate::types::{
    DependencyEdge, DependencyGraph, DependencyNode, FileEntry, basename_of, parent_dir_of,
};

/// Tuning knobs for one analyzer instance.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Sampling cap: files beyond this count are neither nodes nor edge
    /// endpoints.
    pub max_files: usize,
    /// Start-time stagger between consecutive fetches.
    pub stagger_delay: Duration,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            max_files: analysis_constants::MAX_FILES_TO_ANALYZE,
            stagger_delay: Duration::from_millis(analysis_constants::STAGGER_DELAY_MS),
        }
    }
}

pub struct DependencyAnalyzer<'r> {
    registry: &'r LanguageRegistry,
    source: SharedSource,
    config: AnalyzerConfig,
}

impl<'r> DependencyAnalyzer<'r> {
    pub fn new(registry: &'r LanguageRegistry, source: SharedSource) -> Self {
        Self::with_config(registry, source, AnalyzerConfig::default())
    }

    pub fn with_config(
        registry: &'r LanguageRegistry,
        source: SharedSource,
        config: AnalyzerConfig,
    ) -> Self {
        Self {
            registry,
            source,
            config,
        }
    }

    /// Analyze `entries` of `repo`@`branch` into a dependency graph.
    ///
    /// Infallible by design: every per-file problem degrades to "file
    /// excluded from the graph". Identifying-parameter preconditions are
    /// enforced when the [`RepoRef`] is constructed.
    pub async fn analyze(
        &self,
        repo: &RepoRef,
        branch: &str,
        entries: &[FileEntry],
    ) -> DependencyGraph {
        let sampled = self.sample(entries);
        debug!(
            "analyzing {} of {} listed entries for {}",
            sampled.len(),
            entries.len(),
            repo
        );

        let (nodes, import_map) = self.fetch_and_extract(repo, branch, &sampled).await;
        let edges = self.link_imports(&nodes, &import_map, &sampled);

        DependencyGraph { nodes, edges }
    }

    /// Step 1+2: recognized source files, truncated to the sampling cap.
    fn sample(&self, entries: &[FileEntry]) -> Vec<String> {
        entries
            .iter()
            .filter(|entry| entry.is_file() && self.registry.profile_for_path(&entry.path).is_some())
            .take(self.config.max_files)
            .map(|entry| entry.path.clone())
            .collect()
    }

    /// Step 3+4: staggered concurrent content fetches, then per-profile
    /// import extraction. Returns nodes and the import map in fetch
    /// completion order.
    async fn fetch_and_extract(
        &self,
        repo: &RepoRef,
        branch: &str,
        sampled: &[String],
    ) -> (Vec<DependencyNode>, Vec<(String, Vec<String>)>) {
        let mut fetches = FuturesUnordered::new();
        for (index, path) in sampled.iter().enumerate() {
            let stagger = self.config.stagger_delay * index as u32;
            fetches.push(async move {
                tokio::time::sleep(stagger).await;
                match self.source.file_content(repo, path, branch).await {
                    Ok(content) => Some((path.clone(), content)),
                    Err(err) => {
                        warn!("excluding {} from graph: {}", path, err);
                        None
                    }
                }
            });
        }

        let mut nodes = Vec::new();
        let mut import_map = Vec::new();
        while let Some(fetched) = fetches.next().await {
            let Some((path, content)) = fetched else {
                continue;
            };
            let Some(profile) = self.registry.profile_for_path(&path) else {
                continue;
            };
            nodes.push(DependencyNode::for_file(&path));
            import_map.push((path, profile.extract_imports(&content)));
        }
        (nodes, import_map)
    }

    /// Step 5+6: resolve every scraped import and keep the edges whose
    /// endpoints both exist as nodes.
    fn link_imports(
        &self,
        nodes: &[DependencyNode],
        import_map: &[(String, Vec<String>)],
        sampled: &[String],
    ) -> Vec<DependencyEdge> {
        let sampled_set: HashSet<&str> = sampled.iter().map(String::as_str).collect();
        let node_ids: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();

        let mut edges = Vec::new();
        for (source_path, imports) in import_map {
            for import in imports {
                let Some(target) =
                    self.find_matching_file(import, source_path, sampled, &sampled_set)
                else {
                    continue;
                };
                if node_ids.contains(target.as_str()) {
                    edges.push(DependencyEdge {
                        source: source_path.clone(),
                        target,
                    });
                }
            }
        }
        edges
    }

    /// Resolve one raw import string to a sampled file, or `None`.
    fn find_matching_file(
        &self,
        import: &str,
        importing_path: &str,
        sampled: &[String],
        sampled_set: &HashSet<&str>,
    ) -> Option<String> {
        let profile = self.registry.profile_for_path(importing_path)?;

        if import.starts_with("./") || import.starts_with("../") {
            resolve_probing(import, importing_path, profile, sampled_set)
        } else {
            match_bare_import(import, profile, sampled)
        }
    }
}

/// Relative import: normalize against the importing file's directory,
/// then probe in preference order - exact path, each resolution
/// extension appended, each index file inside the resolved directory.
/// First existing candidate wins.
fn resolve_probing(
    import: &str,
    importing_path: &str,
    profile: &LanguageProfile,
    sampled_set: &HashSet<&str>,
) -> Option<String> {
    let resolved = resolve_relative(parent_dir_of(importing_path), import);

    if sampled_set.contains(resolved.as_str()) {
        return Some(resolved);
    }
    for ext in profile.resolution_extensions {
        let candidate = format!("{}{}", resolved, ext);
        if sampled_set.contains(candidate.as_str()) {
            return Some(candidate);
        }
    }
    for index_name in profile.index_file_names {
        let candidate = format!("{}/{}", resolved, index_name);
        if sampled_set.contains(candidate.as_str()) {
            return Some(candidate);
        }
    }
    None
}

/// Bare (non-relative) import: only intra-repository references are
/// modeled, so anything shaped like an external package is skipped.
/// Otherwise the import's last segment is matched by basename against
/// the sampled files in list order - exact name, name plus a resolution
/// extension, or an index file under a same-named directory. Multiple
/// files sharing a basename resolve to the first in list order.
fn match_bare_import(
    import: &str,
    profile: &LanguageProfile,
    sampled: &[String],
) -> Option<String> {
    if import.contains('/') || import.starts_with('@') {
        return None;
    }
    // slash-shaped imports were skipped above, so the import is its own
    // last path segment
    let segment = import;

    for path in sampled {
        let base = basename_of(path);
        if base == segment {
            return Some(path.clone());
        }
        if profile
            .resolution_extensions
            .iter()
            .any(|ext| base == format!("{}{}", segment, ext))
        {
            return Some(path.clone());
        }
        if profile
            .index_file_names
            .iter()
            .any(|index_name| path.ends_with(&format!("{}/{}", segment, index_name)))
        {
            return Some(path.clone());
        }
    }
    None
}
