//! Error types for the portal image cache

use std::fmt;
use std::sync::Arc;

use attachment_core::StoreError;

/// A document-store failure observed while loading an image
///
/// The store error is `Arc`-shared because every caller blocked on the same
/// single-flight load observes the same failure. Failures are never cached;
/// the next `get` retries from scratch.
#[derive(Debug, Clone)]
pub enum ImageCacheError {
    Store(Arc<StoreError>),
}

impl fmt::Display for ImageCacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store(e) => write!(f, "Portal image load failed: {}", e),
        }
    }
}

impl std::error::Error for ImageCacheError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(e) => Some(e.as_ref()),
        }
    }
}

/// Result type for portal image cache operations
pub type Result<T> = std::result::Result<T, ImageCacheError>;
