//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Project config (repograph.toml)
//! 3. Environment variables (REPOGRAPH_* prefix)

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::Config;
use crate::types::{RepoGraphError, Result};

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with the full resolution chain:
    /// defaults -> project file -> env vars.
    pub fn load() -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        let project_path = Self::project_config_path();
        if project_path.exists() {
            debug!("loading project config from {}", project_path.display());
            figment = figment.merge(Toml::file(&project_path));
        }

        // e.g. REPOGRAPH_GITHUB_TOKEN -> github.token
        figment = figment.merge(Env::prefixed("REPOGRAPH_").split('_').lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| RepoGraphError::Config(format!("configuration error: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file only (plus defaults).
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(|e| RepoGraphError::Config(format!("configuration error: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Path of the project config file.
    pub fn project_config_path() -> PathBuf {
        PathBuf::from("repograph.toml")
    }
}
