//! Persistence: the blob store, the state document and the TOML config.

mod blob;
mod config;
pub mod persistence;

pub use blob::{BlobStore, FileBlobStore, MemoryBlobStore};
pub use config::{Config, LimitsConfig, LogConfig, StorageConfig, TrialConfig};
pub use persistence::{load, reset, save, AppState, STATE_KEY};

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns `~/.config/bussola[-dev]/` based on BUSSOLA_ENV.
///
/// Set BUSSOLA_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("BUSSOLA_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("bussola-dev")
    } else {
        base_dir.join("bussola")
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDirUnavailable(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
