//! Bare concurrent blob cache

use attachment_core::CachedBlob;
use dashmap::DashMap;

/// Keyed cache of ready-to-serve blobs with explicit invalidation
///
/// This is a bare cache, not a loader-based one: `get` is a pure read and
/// never populates. Reads are lock-free; `put` and `clear` are visible to
/// subsequent reads without external synchronization. Entries live until an
/// explicit `remove`/`clear`, there is no TTL.
#[derive(Debug, Default)]
pub struct BlobCache {
    entries: DashMap<String, CachedBlob>,
}

impl BlobCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached blob for a key, `None` on miss
    pub fn get(&self, key: &str) -> Option<CachedBlob> {
        self.entries.get(key).map(|e| e.value().clone())
    }

    /// Unconditional overwrite
    pub fn put(&self, key: impl Into<String>, blob: CachedBlob) {
        self.entries.insert(key.into(), blob);
    }

    pub fn remove(&self, key: &str) {
        self.entries.remove(key);
    }

    /// Drop every entry in this cache
    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
