//! Config Command
//!
//! Inspect the merged runtime configuration.

use console::style;

use crate::config::ConfigLoader;
use crate::types::{RepoGraphError, Result};

/// Print the effective configuration (defaults + file + env).
pub fn show(as_json: bool) -> Result<()> {
    let config = ConfigLoader::load()?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        println!(
            "{}",
            toml::to_string_pretty(&config).map_err(|e| RepoGraphError::Config(e.to_string()))?
        );
    }
    Ok(())
}

/// Print where the project config file is looked up.
pub fn path() -> Result<()> {
    let project = ConfigLoader::project_config_path();
    let marker = if project.exists() { "✓" } else { "✗" };
    println!("Project config: {} {}", marker, project.display());
    println!(
        "{}",
        style("Environment overrides use the REPOGRAPH_ prefix (e.g. REPOGRAPH_GITHUB_TOKEN)")
            .dim()
    );
    Ok(())
}
