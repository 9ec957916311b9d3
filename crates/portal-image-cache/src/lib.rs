//! Portal Image Cache
//!
//! Loader-based, single-flight cache for arbitrary (parent, image-name)
//! pairs. Unlike the fixed well-known-name caches, many distinct keys can
//! exist here, so the cache is bounded and entries carry a long TTL.

pub mod cache;
pub mod error;

pub use cache::{PortalImageCache, ENTRY_TTL, MAX_ENTRIES};
pub use error::{ImageCacheError, Result};
