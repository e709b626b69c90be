//! Application configuration models.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::AppError;
use crate::domain::flow::ModelSelection;

/// Configuration loaded from `eduspark.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Generative backend configuration.
    #[serde(default)]
    pub backend: BackendConfig,
    /// Local persistence configuration.
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        self.backend.validate()?;
        self.storage.validate()?;
        Ok(())
    }
}

/// Generative backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackendConfig {
    /// Base URL of the Generative Language API.
    #[serde(default = "default_api_url")]
    pub api_url: Url,
    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Model serving text tasks.
    #[serde(default = "default_text_model")]
    pub text_model: String,
    /// Model serving image tasks.
    #[serde(default = "default_image_model")]
    pub image_model: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout(),
            text_model: default_text_model(),
            image_model: default_image_model(),
        }
    }
}

impl BackendConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.timeout_secs == 0 {
            return Err(AppError::InvalidConfig("timeout_secs must be greater than 0".to_string()));
        }
        if self.api_key_env.trim().is_empty() {
            return Err(AppError::InvalidConfig("api_key_env must not be empty".to_string()));
        }
        if self.text_model.trim().is_empty() || self.image_model.trim().is_empty() {
            return Err(AppError::InvalidConfig("model names must not be empty".to_string()));
        }
        if !matches!(self.api_url.scheme(), "http" | "https") {
            return Err(AppError::InvalidConfig(format!(
                "api_url must use http or https: {}",
                self.api_url
            )));
        }
        Ok(())
    }

    pub fn models(&self) -> ModelSelection {
        ModelSelection { text: self.text_model.clone(), image: self.image_model.clone() }
    }
}

fn default_api_url() -> Url {
    Url::parse("https://generativelanguage.googleapis.com/v1beta")
        .expect("Default API URL must be valid")
}

fn default_api_key_env() -> String {
    "GOOGLE_API_KEY".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_text_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_image_model() -> String {
    "gemini-2.0-flash-preview-image-generation".to_string()
}

/// Where achievements and activity logs are kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_dir: default_data_dir() }
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(AppError::InvalidConfig("data_dir must not be empty".to_string()));
        }
        Ok(())
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".eduspark")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_config_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.backend.api_url.as_str(), "https://generativelanguage.googleapis.com/v1beta");
        assert_eq!(config.backend.api_key_env, "GOOGLE_API_KEY");
        assert_eq!(config.backend.timeout_secs, 60);
        assert_eq!(config.storage.data_dir, PathBuf::from(".eduspark"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_backend_config_invalid_timeout() {
        let config = BackendConfig { timeout_secs: 0, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_backend_config_rejects_non_http_scheme() {
        let config =
            BackendConfig { api_url: Url::parse("ftp://example.com").unwrap(), ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn models_follow_config() {
        let config = BackendConfig { text_model: "m-text".into(), ..Default::default() };
        let models = config.models();
        assert_eq!(models.text, "m-text");
        assert_eq!(models.image, "gemini-2.0-flash-preview-image-generation");
    }
}
