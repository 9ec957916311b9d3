//! Single-flight loader cache keyed by (parent, image name)

use std::sync::Arc;
use std::time::Duration;

use attachment_core::{AttachmentParent, CachedBlob, DocumentStore, StoreError};
use moka::future::Cache;
use tracing::debug;

use crate::error::{ImageCacheError, Result};

/// Upper bound on resident entries
pub const MAX_ENTRIES: u64 = 10_000;

/// One year: effectively "until evicted or invalidated"
pub const ENTRY_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Blocking, loader-based cache for portal background images
///
/// On a miss exactly one loader execution runs per key, no matter how many
/// requesters arrive concurrently; the rest block until it completes and
/// observe the same value. A "no document" result is cached as
/// [`CachedBlob::Absent`] so repeated misses don't re-query the store. Load
/// failures are never cached.
pub struct PortalImageCache {
    cache: Cache<String, CachedBlob>,
    store: Arc<dyn DocumentStore>,
}

impl PortalImageCache {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        let cache = Cache::builder()
            .max_capacity(MAX_ENTRIES)
            .time_to_live(ENTRY_TTL)
            .build();

        Self { cache, store }
    }

    /// Cached image for (parent, name), loading it on miss
    ///
    /// Store errors propagate uncached; the next request retries.
    pub async fn get(&self, parent: &AttachmentParent, image_name: &str) -> Result<CachedBlob> {
        let key = cache_key(parent, image_name);
        let store = Arc::clone(&self.store);
        let parent = parent.clone();
        let name = image_name.to_string();

        self.cache
            .try_get_with(key, async move { load(store, parent, name).await })
            .await
            .map_err(ImageCacheError::Store)
    }

    /// Explicit invalidation, used when an image is updated or replaced
    pub async fn remove(&self, parent: &AttachmentParent, image_name: &str) {
        self.cache.invalidate(&cache_key(parent, image_name)).await;
    }

    /// Drop every cached image
    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}

fn cache_key(parent: &AttachmentParent, image_name: &str) -> String {
    // "|" never appears in entity ids, so keys are collision-free across
    // distinct owners.
    format!("Portal: {}|{}", parent.entity_id, image_name)
}

async fn load(
    store: Arc<dyn DocumentStore>,
    parent: AttachmentParent,
    name: String,
) -> std::result::Result<CachedBlob, StoreError> {
    let Some(_attachment) = store.get_attachment(&parent, &name).await? else {
        debug!(entity_id = %parent.entity_id, name = %name, "No portal image, caching absence");
        return Ok(CachedBlob::Absent);
    };

    match store.read_document(&parent, &name).await? {
        Some(content) => Ok(content.into_blob()),
        // Deleted between the metadata fetch and the read; treat as absent.
        None => Ok(CachedBlob::Absent),
    }
}
