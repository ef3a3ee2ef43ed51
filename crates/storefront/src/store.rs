//! Persistent key-value store adapter.
//!
//! Wraps a state directory with JSON (de)serialization: one file per key,
//! written atomically via a temp-file rename so a crash mid-write never
//! leaves a half-serialized value behind. Each component owns a disjoint
//! key namespace (see [`keys`]); there are no transactions across keys.
//!
//! Failure policy: reads and writes are best-effort. A read that fails for
//! any reason (missing file, bad JSON, I/O error) reports the key as absent;
//! a failed write is logged and otherwise ignored, leaving in-memory state
//! authoritative for the rest of the session. Storage problems must never
//! block browsing or mutate user-visible state.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::StoreError;

/// Storage keys, one namespace per owning component.
pub mod keys {
    /// Cart line items (owned by the cart manager).
    pub const CART_LINES: &str = "cart.lines";

    /// Recent search terms (owned by the search history).
    pub const RECENT_SEARCHES: &str = "search.recent";

    /// Product list cache mapping (owned by the list cache).
    pub const LIST_CACHE: &str = "catalog.list_cache";
}

/// JSON file-per-key persistent store.
#[derive(Debug, Clone)]
pub struct StateStore {
    dir: PathBuf,
}

impl StateStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    ///
    /// Directory creation failure is logged and tolerated; subsequent writes
    /// will fail (and be swallowed) until the path becomes writable.
    #[must_use]
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        if let Err(e) = fs::create_dir_all(&dir) {
            warn!(dir = %dir.display(), error = %e, "Failed to create state directory");
        }
        Self { dir }
    }

    /// The directory backing this store.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Read and deserialize the value under `key`.
    ///
    /// Any failure (absent file, corrupt JSON, I/O error) is reported as
    /// `None`; corruption is logged at warn level.
    #[must_use]
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.try_get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "Discarding unreadable persisted state");
                None
            }
        }
    }

    /// Serialize and write `value` under `key`, best-effort.
    ///
    /// Write failures are logged and swallowed; the caller's in-memory state
    /// stays authoritative either way.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) {
        if let Err(e) = self.try_set(key, value) {
            warn!(key, error = %e, "Failed to persist state");
        }
    }

    /// Delete the value under `key`, if present.
    pub fn remove(&self, key: &str) {
        let path = self.path_for(key);
        if path.exists()
            && let Err(e) = fs::remove_file(&path)
        {
            warn!(key, error = %e, "Failed to remove persisted state");
        }
    }

    fn try_get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)?;
        let value = serde_json::from_str(&raw)?;
        debug!(key, "Loaded persisted state");
        Ok(Some(value))
    }

    fn try_set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value)?;
        let path = self.path_for(key);
        // Write-then-rename keeps the previous value intact on partial writes.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}
