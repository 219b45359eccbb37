//! Core error types for bussola-core.
//!
//! Pure state operations never fail; these errors come from the checked
//! [`Store`](crate::Store) entry points, the blob store and configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for bussola-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Blob store errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A business limit (priorities per day, concurrent experiments) was hit
    #[error("Limit exceeded for {resource}: at most {limit} allowed")]
    CapExceeded { resource: String, limit: usize },

    /// Referenced entity does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    pub fn not_found(entity: &str, id: impl Into<String>) -> Self {
        CoreError::NotFound {
            entity: entity.to_string(),
            id: id.into(),
        }
    }

    pub fn cap_exceeded(resource: &str, limit: usize) -> Self {
        CoreError::CapExceeded {
            resource: resource.to_string(),
            limit,
        }
    }
}

/// Blob store errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to read a stored blob
    #[error("Failed to read '{key}' from {path}: {source}")]
    ReadFailed {
        key: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a blob
    #[error("Failed to write '{key}' to {path}: {source}")]
    WriteFailed {
        key: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to remove a blob
    #[error("Failed to remove '{key}' at {path}: {source}")]
    RemoveFailed {
        key: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Key contains characters that cannot be mapped to a file name
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDirUnavailable(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required text was empty after trimming
    #[error("'{0}' must not be empty")]
    EmptyText(String),

    /// Energy reading outside 1..=5
    #[error("Energy value for '{field}' must be between 1 and 5, got {value}")]
    EnergyOutOfRange { field: String, value: u8 },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
