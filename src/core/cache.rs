//! Look-aside response cache.
//!
//! Entries hold the raw, undecoded response body keyed by a hash of the encoded query
//! string. Freshness depends only on when an entry was written, never on its content.

use std::collections::HashMap;
use std::fmt::Debug;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::{Duration, SystemTime};

/// Default freshness window for cached responses.
pub const DEFAULT_CACHE_DURATION: Duration = Duration::from_secs(280);

/// A cached body together with the time it was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedBody {
    /// Raw response bytes as received from the service.
    pub body: Vec<u8>,
    /// When the entry was last written.
    pub written: SystemTime,
}

/// Byte store addressed by cache key.
///
/// Errors returned from a store are never surfaced to callers of a query; the fetcher treats
/// a failed load as a miss and ignores a failed store.
pub trait CacheStore: Send + Sync + Debug {
    /// Returns the entry for `key`, or `Ok(None)` if there is none.
    fn load(&self, key: &str) -> io::Result<Option<CachedBody>>;

    /// Writes `body` under `key`, replacing any previous entry and stamping it with the
    /// current time.
    fn store(&self, key: &str, body: &[u8]) -> io::Result<()>;
}

impl<T: CacheStore + ?Sized> CacheStore for Arc<T> {
    fn load(&self, key: &str) -> io::Result<Option<CachedBody>> {
        (**self).load(key)
    }

    fn store(&self, key: &str, body: &[u8]) -> io::Result<()> {
        (**self).store(key, body)
    }
}

/// Computes the cache key for an encoded query string (hex BLAKE3 digest).
pub fn cache_key(encoded_query: &str) -> String {
    blake3::hash(encoded_query.as_bytes()).to_hex().to_string()
}

/// An entry is fresh while `now - written < ttl`. Entries stamped in the future are fresh.
pub fn is_fresh(written: SystemTime, now: SystemTime, ttl: Duration) -> bool {
    match now.duration_since(written) {
        Ok(age) => age < ttl,
        Err(_) => true,
    }
}

/* ----------------------- Disk ----------------------- */

/// Stores one file per key inside a directory; the file's modification time is the write
/// timestamp.
///
/// Writes land in a temporary file in the same directory and are renamed into place, so a
/// concurrent reader sees either the old body or the new one.
#[derive(Debug, Clone)]
pub struct DiskStore {
    dir: PathBuf,
}

impl DiskStore {
    /// Uses `dir` as the cache directory. It is created on the first write if missing.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory holding the cache files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl CacheStore for DiskStore {
    fn load(&self, key: &str) -> io::Result<Option<CachedBody>> {
        let path = self.path(key);
        let meta = match fs::metadata(&path) {
            Ok(m) => m,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };
        let written = meta.modified()?;
        let body = fs::read(&path)?;
        Ok(Some(CachedBody { body, written }))
    }

    fn store(&self, key: &str, body: &[u8]) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(body)?;
        tmp.persist(self.path(key))?;
        Ok(())
    }
}

/* ----------------------- Memory ----------------------- */

/// In-process store. Entries live as long as the store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    map: RwLock<HashMap<String, CachedBody>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry with an explicit write time.
    pub fn insert_at(&self, key: impl Into<String>, body: impl Into<Vec<u8>>, written: SystemTime) {
        let entry = CachedBody {
            body: body.into(),
            written,
        };
        let mut guard = self.map.write().unwrap_or_else(|p| p.into_inner());
        guard.insert(key.into(), entry);
    }

    /// Number of entries held.
    pub fn len(&self) -> usize {
        self.map.read().map(|g| g.len()).unwrap_or_default()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CacheStore for MemoryStore {
    fn load(&self, key: &str) -> io::Result<Option<CachedBody>> {
        let guard = self
            .map
            .read()
            .map_err(|_| io::Error::other("memory cache lock poisoned"))?;
        Ok(guard.get(key).cloned())
    }

    fn store(&self, key: &str, body: &[u8]) -> io::Result<()> {
        self.insert_at(key, body, SystemTime::now());
        Ok(())
    }
}
