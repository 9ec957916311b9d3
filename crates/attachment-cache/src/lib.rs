//! Attachment caches for well-known site resources
//!
//! A bare concurrent blob cache plus the facade that exposes the three named
//! caches (site/mobile logo, favicon, auth-provider logo) and the
//! convention/prefix lookups against the document store.

pub mod blob_cache;
pub mod service;

pub use blob_cache::BlobCache;
pub use service::{
    AttachmentCacheService, AUTH_LOGO_FILE_NAME_PREFIX, FAVICON_FILE_NAME,
    LOGO_FILE_NAME_PREFIX, MOBILE_LOGO_FILE_NAME_PREFIX, STYLESHEET_FILE_NAME,
};
