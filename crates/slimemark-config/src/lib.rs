use serde::{Deserialize, Serialize};
use slimemark_engine::Dialect;
use std::path::{Path, PathBuf};
use thiserror::Error;

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

/// Settings shared by every `slimemark` invocation. All keys are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub dialect: Dialect,
    /// Directory include directives resolve against; the working directory when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_base: Option<PathBuf>,
    /// Where front-matter properties are saved on render.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties_path: Option<PathBuf>,
    pub add_extra_new_lines: bool,
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

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in configured paths
        config.include_base = config.include_base.map(Self::expand_or_keep);
        config.properties_path = config.properties_path.map(Self::expand_or_keep);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    /// Loads `config_path` if given, the default location otherwise, falling
    /// back to defaults when no file exists.
    pub fn load_or_default(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let loaded = match config_path {
            Some(path) => Self::load_from_path(path)?,
            None => Self::load()?,
        };
        Ok(loaded.unwrap_or_default())
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

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/slimemark");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    fn expand_or_keep(path: PathBuf) -> PathBuf {
        Self::expand_path(&path).unwrap_or(path)
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
