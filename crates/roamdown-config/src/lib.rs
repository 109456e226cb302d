use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variables that override the config file; the original
/// tooling loaded these from `.env`, so existing setups keep working.
pub const GRAPH_ENV: &str = "ROAM_GRAPH_NAME";
pub const TOKEN_ENV: &str = "ROAM_API_TOKEN";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Graph name on the remote backend.
    pub graph: Option<String>,
    /// API token for the remote backend.
    pub token: Option<String>,
    /// Output format used when the CLI gets no `--to` flag
    /// ("roam", "markdown" or "json").
    pub default_format: Option<String>,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(config))
    }

    /// Loads the config file (if any) and applies environment overrides.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config = Self::load_from_path(Self::config_path())?;
        Ok(Self::apply_env_overrides(config))
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to_path(Self::config_path())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/roamdown");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// `ROAM_GRAPH_NAME` / `ROAM_API_TOKEN` win over file values. A missing
    /// file with overrides present still yields a config.
    fn apply_env_overrides(config: Option<Self>) -> Option<Self> {
        let graph_env = std::env::var(GRAPH_ENV).ok().filter(|v| !v.is_empty());
        let token_env = std::env::var(TOKEN_ENV).ok().filter(|v| !v.is_empty());

        if graph_env.is_none() && token_env.is_none() {
            return config;
        }

        let mut config = config.unwrap_or_default();
        if graph_env.is_some() {
            config.graph = graph_env;
        }
        if token_env.is_some() {
            config.token = token_env;
        }
        Some(config)
    }
}
