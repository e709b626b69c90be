//! Configuration file discovery and parsing.

use std::fs;
use std::path::{Path, PathBuf};

use super::AppConfig;
use crate::domain::AppError;

/// File name looked up in the working directory.
pub const CONFIG_FILE: &str = "eduspark.toml";

/// Resolve and load configuration.
///
/// An explicit path must exist. Otherwise `<dir>/eduspark.toml` is used when present,
/// and built-in defaults when not.
pub fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<AppConfig, AppError> {
    let path = match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(AppError::ConfigMissing(path.display().to_string()));
            }
            Some(path.to_path_buf())
        }
        None => Some(dir.join(CONFIG_FILE)).filter(|candidate: &PathBuf| candidate.is_file()),
    };

    let Some(path) = path else {
        tracing::debug!("no config file found, using defaults");
        return Ok(AppConfig::default());
    };

    tracing::debug!(path = %path.display(), "loading config");
    let content = fs::read_to_string(&path)?;
    parse_config_content(&content)
}

/// Parse configuration from string content.
pub fn parse_config_content(content: &str) -> Result<AppConfig, AppError> {
    let config: AppConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}
