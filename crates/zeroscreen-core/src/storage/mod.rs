mod config;
pub mod database;
pub mod store;

pub use config::{Config, DebugConfig, LoggingConfig, ShareConfig};
pub use database::Database;
pub use store::{keys, MemoryStore, StateStore};

use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Returns the data directory, creating it if needed.
///
/// Resolution order:
/// - `ZEROSCREEN_DATA_DIR`, used as-is
/// - `~/.config/zeroscreen-dev/` when `ZEROSCREEN_ENV=dev`
/// - `~/.config/zeroscreen/`
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("ZEROSCREEN_DATA_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .ok_or_else(|| ConfigError::DataDir("home directory not found".into()))?
                .join(".config");

            let env = std::env::var("ZEROSCREEN_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("zeroscreen-dev")
            } else {
                base_dir.join("zeroscreen")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
