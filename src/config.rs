//! Configuration for moodboard paths and curation settings.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (MOODBOARD_HOME, MOODBOARD_CATALOG, MOODBOARD_PROFILE)
//! 2. Config file (.moodboard/config.yaml)
//! 3. Defaults (~/.moodboard)
//!
//! Config file discovery:
//! - Searches current directory and parents for .moodboard/config.yaml
//! - Paths in config file are relative to the project root (the parent of .moodboard/)

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::core::{AggregateOptions, BoardOptions, PackLimits, TipSelector};

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub curation: Option<CurationConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// State directory (relative to project root)
    pub home: Option<String>,
    /// Catalog JSON file
    pub catalog: Option<String>,
    /// Profile JSON file
    pub profile: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurationConfig {
    pub ending_soon_days: Option<i64>,
    pub max_rows: Option<usize>,
    /// Seed for reproducible tip variety; deterministic first choice if unset
    pub tip_seed: Option<u64>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Absolute path to moodboard home
    pub home: PathBuf,
    /// Catalog file
    pub catalog: PathBuf,
    /// Profile file
    pub profile: PathBuf,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
    /// Curation settings
    pub curation: CurationSettings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurationSettings {
    pub ending_soon_days: i64,
    pub max_rows: usize,
    pub tip_seed: Option<u64>,
}

impl Default for CurationSettings {
    fn default() -> Self {
        let aggregate = AggregateOptions::default();
        Self {
            ending_soon_days: aggregate.ending_soon_days,
            max_rows: PackLimits::default().max_rows,
            tip_seed: None,
        }
    }
}

impl CurationSettings {
    fn from_file(curation: Option<&CurationConfig>) -> Self {
        let defaults = Self::default();
        let Some(curation) = curation else {
            return defaults;
        };

        Self {
            ending_soon_days: curation.ending_soon_days.unwrap_or(defaults.ending_soon_days),
            max_rows: curation.max_rows.unwrap_or(defaults.max_rows),
            tip_seed: curation.tip_seed.or(defaults.tip_seed),
        }
    }

    /// Board options for these settings
    pub fn board_options(&self) -> BoardOptions {
        BoardOptions {
            aggregate: AggregateOptions {
                ending_soon_days: self.ending_soon_days,
                tip_selector: self
                    .tip_seed
                    .map(TipSelector::Seeded)
                    .unwrap_or(TipSelector::First),
            },
            limits: PackLimits { max_rows: self.max_rows },
        }
    }
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".moodboard").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to `base`
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

/// Resolve configuration from an optional config file plus the environment
fn resolve(config_file: Option<PathBuf>, default_home: PathBuf) -> Result<ResolvedConfig> {
    let parsed = config_file
        .as_deref()
        .map(load_config_file)
        .transpose()?;

    // Project root is the parent of .moodboard/
    let base_dir = config_file
        .as_deref()
        .and_then(Path::parent)
        .and_then(Path::parent)
        .unwrap_or(Path::new("."))
        .to_path_buf();

    let paths = parsed.as_ref().map(|c| c.paths.clone()).unwrap_or_default();

    let home = if let Ok(env_home) = std::env::var("MOODBOARD_HOME") {
        PathBuf::from(env_home)
    } else if let Some(ref home) = paths.home {
        resolve_path(&base_dir, home)
    } else {
        default_home
    };

    let catalog = if let Ok(env_catalog) = std::env::var("MOODBOARD_CATALOG") {
        PathBuf::from(env_catalog)
    } else if let Some(ref catalog) = paths.catalog {
        resolve_path(&base_dir, catalog)
    } else {
        home.join("catalog.json")
    };

    let profile = if let Ok(env_profile) = std::env::var("MOODBOARD_PROFILE") {
        PathBuf::from(env_profile)
    } else if let Some(ref profile) = paths.profile {
        resolve_path(&base_dir, profile)
    } else {
        home.join("profile.json")
    };

    let curation = CurationSettings::from_file(parsed.as_ref().and_then(|c| c.curation.as_ref()));

    Ok(ResolvedConfig {
        home,
        catalog,
        profile,
        config_file,
        curation,
    })
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let default_home = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(".moodboard");

    resolve(find_config_file(), default_home)
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}
