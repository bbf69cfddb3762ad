//! Flat-file record store
//!
//! One JSON file per named collection under the data directory, holding a
//! single object keyed by record identifier. A missing or unparsable file
//! reads as an empty collection rather than an error, so a fresh install and
//! a corrupted file both start clean.
//!
//! Writes are not atomic: a crash mid-write can truncate the file. That risk
//! is accepted; the interesting hazard is the read-modify-write race between
//! two concurrently dispatched commands, which [`RecordStore::update`] closes
//! with a per-collection mutex. All mutation paths must go through `update`;
//! bare `load`/`save` are for read-only callers and tests.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: Serialized read-modify-write via per-collection locks
//! - 1.0.0: Initial creation with load/save

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use dashmap::DashMap;
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;

/// Handle to the on-disk collection files. Cheap to clone; clones share the
/// same lock table, so `update` stays serialized across the whole process.
#[derive(Clone)]
pub struct RecordStore {
    data_dir: PathBuf,
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl RecordStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        RecordStore {
            data_dir: data_dir.into(),
            locks: Arc::new(DashMap::new()),
        }
    }

    /// Path of the backing file for a collection.
    pub fn collection_path(&self, collection: &str) -> PathBuf {
        self.data_dir.join(format!("{collection}.json"))
    }

    /// Load a collection. Missing or unparsable files read as empty.
    pub fn load<T: DeserializeOwned>(&self, collection: &str) -> HashMap<String, T> {
        let path = self.collection_path(collection);
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(_) => return HashMap::new(),
        };

        match serde_json::from_str(&contents) {
            Ok(records) => records,
            Err(e) => {
                warn!(
                    "Collection '{collection}' at {} is unreadable ({e}); treating as empty",
                    path.display()
                );
                HashMap::new()
            }
        }
    }

    /// Save a collection, creating the data directory if needed. Overwrites
    /// the previous file content.
    pub fn save<T: Serialize>(&self, collection: &str, records: &HashMap<String, T>) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir).with_context(|| {
            format!("creating data directory {}", self.data_dir.display())
        })?;

        let path = self.collection_path(collection);
        let json = serde_json::to_string_pretty(records)
            .with_context(|| format!("serializing collection '{collection}'"))?;
        std::fs::write(&path, json)
            .with_context(|| format!("writing collection file {}", path.display()))?;
        Ok(())
    }

    fn lock_for(&self, collection: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(collection.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Serialized read-modify-write on one collection.
    ///
    /// Holds the collection's mutex across load, mutation, and save, so two
    /// interleaved command dispatches cannot silently drop each other's
    /// writes. The closure's return value is passed through.
    pub async fn update<T, R, F>(&self, collection: &str, f: F) -> Result<R>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&mut HashMap<String, T>) -> R,
    {
        let lock = self.lock_for(collection);
        let _guard = lock.lock().await;

        let mut records = self.load(collection);
        let result = f(&mut records);
        self.save(collection, &records)?;
        Ok(result)
    }

    /// The configured data directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
