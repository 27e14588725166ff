//! RepoGraph - Repository Dependency Analysis Engine
//!
//! Ingests a remote repository's file listing and file contents and
//! produces two derived views: a hierarchical file/directory tree and a
//! dependency graph connecting source files through their import
//! statements.
//!
//! ## Core Pieces
//!
//! - **Language Registry**: extension -> language profile table with
//!   best-effort regex import patterns for 17 languages
//! - **File Tree Builder**: flat listing -> nested tree, synthesizing
//!   implied directories
//! - **Dependency Analyzer**: bounded sampling, staggered concurrent
//!   fetching, import resolution with extension/index-file probing
//! - **Rate-Limit Governor**: shared call budget with exponential
//!   backoff retry
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use repograph::{GitHubSource, RateLimitGovernor, RepoRef, RepositoryAnalyzer};
//! use repograph::config::GithubConfig;
//!
//! let governor = Arc::new(RateLimitGovernor::with_defaults());
//! let source = Arc::new(GitHubSource::new(GithubConfig::default(), governor)?);
//! let analyzer = RepositoryAnalyzer::new(source);
//! let analysis = analyzer.analyze(&RepoRef::parse("rust-lang/cargo")?).await?;
//! ```
//!
//! ## Modules
//!
//! - [`analyzer`]: registry, resolver, tree builder, dependency analyzer, facade
//! - [`source`]: repository data source abstraction + GitHub REST client
//! - [`config`]: figment-based configuration
//! - [`types`]: data model and error taxonomy

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod constants;
pub mod source;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Error Types
pub use types::{RepoGraphError, Result};

// Data Model
pub use types::{DependencyEdge, DependencyGraph, DependencyNode, EntryKind, FileEntry, TreeNode};

// =============================================================================
// Engine Re-exports
// =============================================================================

pub use analyzer::{
    AnalyzerConfig, DependencyAnalyzer, LanguageProfile, LanguageRegistry, RepositoryAnalysis,
    RepositoryAnalyzer, build_file_tree, resolve_relative,
};

// =============================================================================
// Source Re-exports
// =============================================================================

pub use source::{
    GitHubSource, GovernorConfig, RateLimitGovernor, RateLimitSnapshot, RepoRef, RepositorySource,
    SharedSource, TreeListing,
};

// Configuration
pub use config::{Config, ConfigLoader};
