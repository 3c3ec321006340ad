use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::Config;

/// Name of the optional config file, looked up beside the todo file
pub const CONFIG_FILE: &str = "todotxt.toml";

/// Error type for config loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse todotxt.toml: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Load `todotxt.toml` from `dir`. A missing file means all defaults.
pub fn load_config(dir: &Path) -> Result<Config, ConfigError> {
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
        tracing::debug!(dir = %dir.display(), "no config file, using defaults");
        return Ok(Config::default());
    }
    let text = fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        source: e,
    })?;
    let config: Config = toml::from_str(&text)?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}
