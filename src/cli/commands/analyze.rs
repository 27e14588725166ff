//! Analyze Command
//!
//! Runs the full analysis pipeline for one remote repository and prints
//! either a styled summary or the complete `{tree, graph}` document.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use console::style;

use crate::analyzer::{RepositoryAnalysis, RepositoryAnalyzer};
use crate::config::ConfigLoader;
use crate::source::{GitHubSource, RateLimitGovernor, RepoRef};
use crate::types::{Result, TreeNode};

pub struct AnalyzeOptions {
    /// `owner/name` spec of the repository to analyze.
    pub repo_spec: String,
    /// Print the full JSON document instead of the summary.
    pub json: bool,
    /// Write the JSON document to a file.
    pub output: Option<PathBuf>,
    /// Token override; otherwise config/env is consulted.
    pub token: Option<String>,
}

pub async fn run(options: AnalyzeOptions) -> Result<()> {
    let mut config = ConfigLoader::load()?;
    if options.token.is_some() {
        config.github.token = options.token;
    }

    let repo = RepoRef::parse(&options.repo_spec)?;
    let governor = Arc::new(RateLimitGovernor::with_defaults());
    let source = Arc::new(GitHubSource::new(config.github, governor.clone())?);
    let analyzer = RepositoryAnalyzer::with_config(source, config.analysis.to_analyzer_config());

    let analysis = analyzer.analyze(&repo).await?;

    if let Some(path) = &options.output {
        fs::write(path, serde_json::to_string_pretty(&analysis)?)?;
        println!("Wrote analysis to {}", path.display());
    }

    if options.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else if options.output.is_none() {
        print_summary(&analysis, &analyzer);
        let state = governor.state();
        println!(
            "\n{} {}/{} API calls remaining",
            style("budget:").dim(),
            state.remaining,
            state.limit
        );
    }

    Ok(())
}

fn print_summary(analysis: &RepositoryAnalysis, analyzer: &RepositoryAnalyzer) {
    println!(
        "{} {} (branch {})",
        style("Analyzed").green().bold(),
        style(&analysis.repository).bold(),
        analysis.default_branch
    );
    if analysis.truncated {
        println!(
            "{}",
            style("note: the remote truncated the file listing").yellow()
        );
    }

    let total: usize = analysis.tree.iter().map(TreeNode::subtree_size).sum();
    println!("  tree:  {} entries under {} roots", total, analysis.tree.len());
    println!(
        "  graph: {} nodes, {} edges",
        analysis.graph.nodes.len(),
        analysis.graph.edges.len()
    );

    let mut by_language: HashMap<&str, usize> = HashMap::new();
    for node in &analysis.graph.nodes {
        let name = analyzer
            .registry()
            .profile_for_extension(&node.language)
            .map(|p| p.display_name)
            .unwrap_or("Other");
        *by_language.entry(name).or_insert(0) += 1;
    }
    if !by_language.is_empty() {
        println!("\nLanguages:");
        let mut sorted: Vec<_> = by_language.into_iter().collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        for (name, count) in sorted {
            println!("  {}: {} files", name, count);
        }
    }
}
