//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. The intent is to avoid reading process-wide environment variables
//! during request handling, which can lead to inconsistent behaviour in multi-threaded runtimes
//! and test harnesses.

use crate::constants::DEFAULT_CONTENT_DATA_DIR;
use crate::models::ContentTable;
use crate::{StoreError, StoreResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    content_data_dir: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    pub fn new(content_data_dir: PathBuf) -> StoreResult<Self> {
        if content_data_dir.as_os_str().is_empty() {
            return Err(StoreError::InvalidInput(
                "content_data_dir cannot be empty".into(),
            ));
        }

        Ok(Self { content_data_dir })
    }

    pub fn content_data_dir(&self) -> &Path {
        &self.content_data_dir
    }

    /// Directory holding every record of `table`.
    pub fn table_dir(&self, table: ContentTable) -> PathBuf {
        self.content_data_dir.join(table.name())
    }
}

/// Parse the content data directory from an optional environment value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_CONTENT_DATA_DIR`].
pub fn content_data_dir_from_env_value(value: Option<String>) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONTENT_DATA_DIR))
}

/// Create the content data directory and one directory per table.
///
/// Safe to run against an already initialised directory.
pub fn initialise_storage(cfg: &CoreConfig) -> StoreResult<()> {
    for table in ContentTable::ALL {
        fs::create_dir_all(cfg.table_dir(table)).map_err(StoreError::StorageDirCreation)?;
    }
    tracing::info!(
        "content storage ready at {}",
        cfg.content_data_dir().display()
    );
    Ok(())
}
