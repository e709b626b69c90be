use std::io;

use thiserror::Error;

use crate::domain::flow::FlowError;

/// Library-wide error type for eduspark operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Required environment variable is not set.
    #[error("Environment variable '{0}' is not set")]
    EnvironmentVariableMissing(String),

    /// Configuration values failed validation.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Explicitly requested config file does not exist.
    #[error("Config file not found: {0}")]
    ConfigMissing(String),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    /// Embedded task asset is missing or malformed.
    #[error("Asset error: {0}")]
    AssetError(String),

    /// Caller-supplied data could not be read.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Identifier is empty or contains characters outside `[A-Za-z0-9_-]`.
    #[error("Invalid {what} '{value}': must be alphanumeric with hyphens or underscores")]
    InvalidIdentifier { what: &'static str, value: String },

    /// Persistent store failure (achievements, activity log).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Parse error.
    #[error("Failed to parse {what}: {details}")]
    ParseError { what: String, details: String },

    /// Prompt flow failure.
    #[error(transparent)]
    Flow(#[from] FlowError),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    /// Provide an `io::ErrorKind`-like view for callers mapping errors to exit codes.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::Configuration(_)
            | AppError::EnvironmentVariableMissing(_)
            | AppError::InvalidConfig(_)
            | AppError::TomlParseError(_)
            | AppError::AssetError(_)
            | AppError::InvalidInput(_)
            | AppError::InvalidIdentifier { .. }
            | AppError::ParseError { .. } => io::ErrorKind::InvalidInput,
            AppError::ConfigMissing(_) => io::ErrorKind::NotFound,
            AppError::Storage(_) => io::ErrorKind::Other,
            AppError::Flow(err) => match err {
                FlowError::UnknownTask(_) => io::ErrorKind::NotFound,
                FlowError::DuplicateTask(_) => io::ErrorKind::AlreadyExists,
                FlowError::BackendTimeout { .. } => io::ErrorKind::TimedOut,
                _ => io::ErrorKind::InvalidData,
            },
        }
    }
}
