mod config;
pub mod database;
pub mod keys;
mod memory;

pub use config::{Config, StorageConfig, TrackerConfig};
pub use database::SqliteStore;
pub use memory::MemoryStore;

use std::path::PathBuf;

use crate::error::{Result, StoreError};

/// Minimal contract the core needs from persistent storage.
///
/// Keys and values are plain strings. Every write must be durable before the
/// call returns; the core never re-reads to confirm.
pub trait KvStore {
    /// Value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Insert or overwrite `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;

    /// All keys starting with `prefix`, in ascending key order.
    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError>;

    /// Remove every key starting with `prefix`, returning how many went away.
    fn remove_prefix(&mut self, prefix: &str) -> Result<usize, StoreError> {
        let keys = self.keys_with_prefix(prefix)?;
        for key in &keys {
            self.remove(key)?;
        }
        Ok(keys.len())
    }
}

/// Returns `~/.config/ritual[-dev]/` based on RITUAL_ENV.
///
/// Set RITUAL_ENV=dev to use the development data directory, or
/// RITUAL_DATA_DIR to point somewhere else entirely.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("RITUAL_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("RITUAL_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("ritual-dev")
            } else {
                base_dir.join("ritual")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
