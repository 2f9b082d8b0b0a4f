// src/store.rs
//
// Query-keyed record cache. One JSON file per sanitized query; staleness is
// judged at read time and stale files are left for the next write to replace.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::core::sanitize::cache_file_stem;
use crate::data::Organization;
use crate::error::Result;
use crate::log::Log;

pub trait CacheStore: Send + Sync {
    /// Fresh record for `key`, if any.
    fn get(&self, key: &str) -> Option<Organization>;

    /// Store `org` under `key`, replacing any previous entry.
    fn set(&self, key: &str, org: &Organization);

    fn is_valid(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// On-disk entry layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub cached_at: NaiveDateTime,
    pub query: String,
    pub organization: Organization,
}

impl CacheEntry {
    pub fn now(query: &str, org: &Organization) -> Self {
        Self { cached_at: Local::now().naive_local(), query: s!(query), organization: org.clone() }
    }

    /// Whole days elapsed since the write, compared against `max_age_days`.
    pub fn is_fresh(&self, now: NaiveDateTime, max_age_days: i64) -> bool {
        (now - self.cached_at).num_days() < max_age_days
    }
}

pub struct FileCache {
    dir: PathBuf,
    max_age_days: i64,
    log: Log,
}

impl FileCache {
    pub fn new(dir: impl Into<PathBuf>, max_age_days: i64, log: Log) -> Self {
        Self { dir: dir.into(), max_age_days, log }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(join!(&cache_file_stem(key), ".json"))
    }

    /// Raw entry regardless of age. Missing file → Ok(None).
    pub fn read_entry(&self, key: &str) -> Result<Option<CacheEntry>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&path)?;
        let entry: CacheEntry = serde_json::from_str(&text)?;
        entry.organization.validate()?;
        Ok(Some(entry))
    }

    /// Write `entry` as-is (creating the directory on first use).
    pub fn write_entry(&self, key: &str, entry: &CacheEntry) -> Result<PathBuf> {
        crate::file::ensure_directory(&self.dir)?;
        let path = self.path_for(key);
        let json = serde_json::to_string_pretty(entry)?;
        fs::write(&path, json)?;
        Ok(path)
    }
}

impl CacheStore for FileCache {
    fn get(&self, key: &str) -> Option<Organization> {
        match self.read_entry(key) {
            Ok(Some(entry)) => {
                if entry.is_fresh(Local::now().naive_local(), self.max_age_days) {
                    Some(entry.organization)
                } else {
                    logd!(self.log, key, cached_at = %entry.cached_at, "cache entry is stale");
                    None
                }
            }
            Ok(None) => None,
            Err(e) => {
                logw!(self.log, key, "cache read failed, treating as miss: {e}");
                None
            }
        }
    }

    fn set(&self, key: &str, org: &Organization) {
        if let Err(e) = self.write_entry(key, &CacheEntry::now(key, org)) {
            loge!(self.log, key, "cache write failed: {e}");
        }
    }
}

/// Caching disabled: always misses, never writes.
pub struct NoCache;

impl CacheStore for NoCache {
    fn get(&self, _key: &str) -> Option<Organization> {
        None
    }

    fn set(&self, _key: &str, _org: &Organization) {}

    fn is_valid(&self, _key: &str) -> bool {
        false
    }
}
