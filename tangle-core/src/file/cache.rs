use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::SystemTime;

/// A cached file read: content served for as long as the tracked modification
/// time still matches the filesystem.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub modified: SystemTime,
    pub content: String,
}

impl CacheEntry {
    /// Timestamp stored when the post-read stat fails. No real file carries
    /// this modification time, so the entry never validates and the next
    /// access re-reads - caching is effectively disabled for that file
    /// rather than caching wrong metadata.
    pub const STALE_SENTINEL: SystemTime = SystemTime::UNIX_EPOCH;
}

/// Process-lifetime content cache keyed by file path.
///
/// Each backend owns exactly one, constructed empty; entries are never shared
/// across backends and never persisted. Invalidation is per-entry: staleness
/// evicts the entry, there is no bulk flush and no update-in-place.
#[derive(Debug, Default)]
pub struct ContentCache {
    entries: Mutex<HashMap<PathBuf, CacheEntry>>,
}

impl ContentCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &Path) -> Option<CacheEntry> {
        self.entries.lock().expect("lock poisoned").get(path).cloned()
    }

    pub fn insert(&self, path: PathBuf, modified: SystemTime, content: String) {
        self.entries
            .lock()
            .expect("lock poisoned")
            .insert(path, CacheEntry { modified, content });
    }

    pub fn evict(&self, path: &Path) {
        self.entries.lock().expect("lock poisoned").remove(path);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
