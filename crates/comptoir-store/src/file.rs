//! # JSON File Store
//!
//! One JSON document per record, in a data directory.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  <data_dir>/                                                            │
//! │  ├── pos-categories.json                                                │
//! │  ├── pos-products.json                                                  │
//! │  ├── pos-sales.json                                                     │
//! │  ├── pos-notifications.json                                             │
//! │  └── pos-settings.json                                                  │
//! │                                                                         │
//! │  save_raw(key, json)                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  write <key>.json.tmp ──► fsync ──► rename over <key>.json              │
//! │  (a crash leaves either the old or the new document, never half)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::keys::StateKey;
use crate::store::KeyValueStore;

// =============================================================================
// Configuration
// =============================================================================

/// File store configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = StoreConfig::new("/var/lib/comptoir")
///     .pretty(true);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding the record files.
    pub data_dir: PathBuf,

    /// Create the directory (and parents) on open.
    /// Default: true
    pub create_dir: bool,

    /// Pretty-print documents. Handy when inspecting data by hand.
    /// Default: false
    pub pretty: bool,
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        StoreConfig {
            data_dir: data_dir.into(),
            create_dir: true,
            pretty: false,
        }
    }

    pub fn create_dir(mut self, create: bool) -> Self {
        self.create_dir = create;
        self
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

// =============================================================================
// JsonFileStore
// =============================================================================

/// File-backed [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    config: StoreConfig,
}

impl JsonFileStore {
    /// Opens the store, creating the data directory if configured to.
    ///
    /// ## Errors
    /// - `Unavailable` if the directory is missing and `create_dir` is off,
    ///   or if the path is not a directory
    /// - `Io` if the directory cannot be created
    pub fn open(config: StoreConfig) -> StoreResult<Self> {
        let dir = &config.data_dir;

        if !dir.exists() {
            if !config.create_dir {
                return Err(StoreError::Unavailable(format!(
                    "data directory {} does not exist",
                    dir.display()
                )));
            }
            fs::create_dir_all(dir).map_err(|e| StoreError::io(dir.display().to_string(), e))?;
            info!(path = %dir.display(), "Created data directory");
        } else if !dir.is_dir() {
            return Err(StoreError::Unavailable(format!(
                "{} is not a directory",
                dir.display()
            )));
        }

        debug!(path = %dir.display(), "Opened JSON file store");
        Ok(JsonFileStore { config })
    }

    pub fn data_dir(&self) -> &Path {
        &self.config.data_dir
    }

    /// Path of the file backing `key`.
    pub fn path_for(&self, key: StateKey) -> PathBuf {
        self.config.data_dir.join(format!("{}.json", key.as_str()))
    }

    /// Temp file, fsync, rename. On any failure the temp file is removed and
    /// the previous document stays in place.
    fn write_atomically(&self, key: StateKey, contents: &[u8]) -> std::io::Result<()> {
        let target = self.path_for(key);
        let tmp = target.with_extension("json.tmp");

        let result = write_synced(&tmp, contents).and_then(|()| fs::rename(&tmp, &target));
        if let Err(e) = &result {
            debug!(path = %tmp.display(), error = %e, "Write failed, removing temp file");
            // The write error is the one reported.
            let _ = fs::remove_file(&tmp);
        }
        result
    }
}

fn write_synced(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(contents)?;
    file.sync_all()
}

impl KeyValueStore for JsonFileStore {
    fn load_raw(&self, key: StateKey) -> StoreResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(key.as_str(), e)),
        }
    }

    fn save_raw(&mut self, key: StateKey, json: &str) -> StoreResult<()> {
        let contents = if self.config.pretty {
            let value: serde_json::Value = serde_json::from_str(json)
                .map_err(|e| StoreError::serialization(key.as_str(), e))?;
            serde_json::to_string_pretty(&value)
                .map_err(|e| StoreError::serialization(key.as_str(), e))?
        } else {
            json.to_string()
        };

        self.write_atomically(key, contents.as_bytes())
            .map_err(|e| StoreError::io(key.as_str(), e))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
