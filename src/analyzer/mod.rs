//! Repository Analysis Engine
//!
//! Composes the analysis stages into one operation:
//! default branch -> recursive tree listing -> file tree build ->
//! dependency analysis. Stage failures abort the run and surface as one
//! taxonomy error; per-file problems inside the dependency stage degrade
//! locally instead.
//!
//! ## Modules
//!
//! - [`language`]: extension -> language profile registry
//! - [`resolver`]: relative import path normalization
//! - [`tree`]: flat listing -> nested file tree
//! - [`dependency`]: sampled fetch + import scraping -> graph

pub mod dependency;
pub mod language;
pub mod resolver;
pub mod tree;

pub use dependency::{AnalyzerConfig, DependencyAnalyzer};
pub use language::{LanguageProfile, LanguageRegistry};
pub use resolver::resolve_relative;
pub use tree::build_file_tree;

use serde::Serialize;
use tracing::info;

use crate::source::{RepoRef, SharedSource};
use crate::types::{DependencyGraph, Result, TreeNode};

/// Everything one analysis run produces. Owned by the caller; render
/// layers consume `tree` and `graph` read-only.
#[derive(Debug, Clone, Serialize)]
pub struct RepositoryAnalysis {
    pub repository: String,
    pub default_branch: String,
    /// Whether the remote truncated the recursive listing.
    pub truncated: bool,
    pub tree: Vec<TreeNode>,
    pub graph: DependencyGraph,
}

/// Facade over the full analysis pipeline.
pub struct RepositoryAnalyzer {
    source: SharedSource,
    registry: LanguageRegistry,
    config: AnalyzerConfig,
}

impl RepositoryAnalyzer {
    pub fn new(source: SharedSource) -> Self {
        Self::with_config(source, AnalyzerConfig::default())
    }

    pub fn with_config(source: SharedSource, config: AnalyzerConfig) -> Self {
        Self {
            source,
            registry: LanguageRegistry::new(),
            config,
        }
    }

    pub fn registry(&self) -> &LanguageRegistry {
        &self.registry
    }

    /// Run the full pipeline for one repository.
    pub async fn analyze(&self, repo: &RepoRef) -> Result<RepositoryAnalysis> {
        let default_branch = self.source.default_branch(repo).await?;
        info!("analyzing {} (branch {})", repo, default_branch);

        let listing = self.source.tree(repo, &default_branch).await?;
        let tree = build_file_tree(&listing.entries);

        let analyzer = DependencyAnalyzer::with_config(
            &self.registry,
            self.source.clone(),
            self.config.clone(),
        );
        let graph = analyzer.analyze(repo, &default_branch, &listing.entries).await;

        info!(
            "{}: {} tree roots, {} nodes, {} edges",
            repo,
            tree.len(),
            graph.nodes.len(),
            graph.edges.len()
        );

        Ok(RepositoryAnalysis {
            repository: repo.to_string(),
            default_branch,
            truncated: listing.truncated,
            tree,
            graph,
        })
    }
}
