//! # Key-Value Store
//!
//! The persistence contract the engine depends on.
//!
//! ## Load / Save Semantics
//! ```text
//! load_or_default(key, default)
//!      │
//!      ├── record missing           ──► default (silent)
//!      ├── record unreadable        ──► default + warn!
//!      ├── record not valid JSON    ──► default + warn!
//!      └── record ok                ──► decoded value
//!
//! save(key, &value)
//!      │
//!      ├── ok                       ──► Ok(())
//!      └── encode / write failure   ──► Err(StoreError)  (never swallowed)
//! ```
//!
//! Implementors only provide the raw string operations; the typed helpers
//! come for free.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};
use crate::keys::StateKey;

/// A synchronous store of named JSON documents.
pub trait KeyValueStore {
    /// Returns the raw JSON of a record, or `None` if it was never saved.
    fn load_raw(&self, key: StateKey) -> StoreResult<Option<String>>;

    /// Replaces a record with the given JSON document.
    fn save_raw(&mut self, key: StateKey, json: &str) -> StoreResult<()>;

    /// Loads and decodes a record, falling back to `default`.
    ///
    /// Never fails: a broken record must not keep the application from
    /// starting.
    fn load_or_default<T>(&self, key: StateKey, default: T) -> T
    where
        T: DeserializeOwned,
        Self: Sized,
    {
        let raw = match self.load_raw(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %key, "Record absent, using default");
                return default;
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Record unreadable, using default");
                return default;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                let e = StoreError::serialization(key.as_str(), e);
                warn!(key = %key, error = %e, "Record corrupt, using default");
                default
            }
        }
    }

    /// Encodes and saves a record.
    fn save<T>(&mut self, key: StateKey, value: &T) -> StoreResult<()>
    where
        T: Serialize + ?Sized,
        Self: Sized,
    {
        let json = serde_json::to_string(value)
            .map_err(|e| StoreError::serialization(key.as_str(), e))?;
        self.save_raw(key, &json)?;
        debug!(key = %key, bytes = json.len(), "Record saved");
        Ok(())
    }
}
