//! Configuration file support for Wharf.
//!
//! Wharf supports two configuration file locations:
//! - Global: `~/.wharf/config.toml` - User-wide defaults
//! - Project: `.wharf/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::ops::encode::{LOCK_NAME, MANIFEST_NAME};

/// Wharf configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Import settings
    pub import: ImportConfig,
}

/// Import-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Derive a constraint from the locked version when none was given
    /// (None = enabled)
    pub default_constraint_from_lock: Option<bool>,

    /// Report discarded constraints at info level
    #[serde(default)]
    pub verbose: bool,

    /// File name for the generated manifest
    pub manifest: Option<String>,

    /// File name for the generated lock
    pub lock: Option<String>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.import.default_constraint_from_lock.is_some() {
            self.import.default_constraint_from_lock = other.import.default_constraint_from_lock;
        }
        if other.import.verbose {
            self.import.verbose = true;
        }
        if other.import.manifest.is_some() {
            self.import.manifest = other.import.manifest;
        }
        if other.import.lock.is_some() {
            self.import.lock = other.import.lock;
        }
    }

    pub fn default_constraint_from_lock(&self) -> bool {
        self.import.default_constraint_from_lock.unwrap_or(true)
    }

    pub fn manifest_name(&self) -> &str {
        self.import.manifest.as_deref().unwrap_or(MANIFEST_NAME)
    }

    pub fn lock_name(&self) -> &str {
        self.import.lock.as_deref().unwrap_or(LOCK_NAME)
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.wharf/config.toml)
/// 2. Global config (~/.wharf/config.toml)
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    if global_path.exists() {
        let global = Config::load_or_default(global_path);
        config.merge(global);
    }

    // Project config overrides global
    if project_path.exists() {
        let project = Config::load_or_default(project_path);
        config.merge(project);
    }

    config
}

/// Get the global wharf config directory (~/.wharf).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".wharf"))
}

/// Get the global config path (~/.wharf/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.wharf/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".wharf").join("config.toml")
}

/// Load the configuration that applies to `project_root`.
pub fn load_for_project(project_root: &Path) -> Config {
    let project_path = project_config_path(project_root);
    match global_config_path() {
        Some(global_path) => load_config(&global_path, &project_path),
        None => Config::load_or_default(&project_path),
    }
}
