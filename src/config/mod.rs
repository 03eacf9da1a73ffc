use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub identity: IdentityConfig,
    #[serde(default)]
    pub paging: PagingConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Stand-in for the platform session: who signs mission/tactics updates.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct IdentityConfig {
    /// Sent as `owner_pubkey` in update bodies. Empty means an anonymous
    /// session, which the backend accepts for sample data.
    #[serde(default)]
    pub owner_pubkey: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PagingConfig {
    /// Features per page in the mission panel.
    #[serde(default = "default_feature_limit")]
    pub feature_limit: usize,
    /// Bounty cards per planner feed page.
    #[serde(default = "default_bounty_page_size")]
    pub bounty_page_size: usize,
}

fn default_feature_limit() -> usize {
    4
}

fn default_bounty_page_size() -> usize {
    5
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            feature_limit: default_feature_limit(),
            bounty_page_size: default_bounty_page_size(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiConfig {
    /// Workspace opened at startup when `--workspace` is not given.
    #[serde(default)]
    pub default_workspace: Option<String>,
    /// Slide the feature page tabs to follow a direct page jump, instead of
    /// the web UI's behavior of leaving the tab row where it was.
    #[serde(default)]
    pub realign_page_jumps: bool,
}

pub fn config_dir() -> Result<PathBuf> {
    let dir = directories::ProjectDirs::from("", "", "bountyboard")
        .context("no config directory for this platform")?
        .config_dir()
        .to_path_buf();
    Ok(dir)
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Load from the given path, or the default location. Every field has a
/// default so a missing file just means a stock setup; a malformed file is
/// an error.
pub fn load(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };

    if !path.exists() {
        tracing::debug!("no config at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("could not read config at {}", path.display()))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("invalid config at {}", path.display()))?;

    Ok(config)
}
