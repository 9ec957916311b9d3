//! Facade over the three named attachment caches

use std::sync::Arc;

use attachment_core::{Attachment, AttachmentParent, CachedBlob, DocumentStore, Result};
use tracing::debug;

use crate::blob_cache::BlobCache;

/// Site logos are stored under this name prefix; the suffix varies with the
/// uploaded file's extension
pub const LOGO_FILE_NAME_PREFIX: &str = "site-logo";

/// Mobile logo prefix, also filed in the logo namespace
pub const MOBILE_LOGO_FILE_NAME_PREFIX: &str = "site-logo-mobile";

/// Auth-provider logos are stored under this prefix, one parent entity per
/// provider
pub const AUTH_LOGO_FILE_NAME_PREFIX: &str = "auth-logo";

/// Exact favicon document name
pub const FAVICON_FILE_NAME: &str = "favicon.ico";

/// Exact custom stylesheet document name
pub const STYLESHEET_FILE_NAME: &str = "stylesheet.css";

/// Named caches for the fixed well-known resources, plus document-store
/// lookups for the attachments behind them
///
/// Loading on miss is the caller's job: the HTTP layer looks up the
/// attachment, streams it, and writes the result back with `put_*`. The
/// three namespaces are independently clearable; clearing one never touches
/// the others.
pub struct AttachmentCacheService {
    store: Arc<dyn DocumentStore>,
    logos: BlobCache,
    favicons: BlobCache,
    auth_logos: BlobCache,
}

impl AttachmentCacheService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            logos: BlobCache::new(),
            favicons: BlobCache::new(),
            auth_logos: BlobCache::new(),
        }
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    // Logo namespace. Site and mobile logos share it under distinct keys.

    pub fn get_logo(&self, container_id: &str) -> Option<CachedBlob> {
        self.logos.get(&logo_key(container_id, false))
    }

    pub fn put_logo(&self, container_id: &str, blob: CachedBlob) {
        self.logos.put(logo_key(container_id, false), blob);
    }

    pub fn get_mobile_logo(&self, container_id: &str) -> Option<CachedBlob> {
        self.logos.get(&logo_key(container_id, true))
    }

    pub fn put_mobile_logo(&self, container_id: &str, blob: CachedBlob) {
        self.logos.put(logo_key(container_id, true), blob);
    }

    pub fn clear_logo_cache(&self) {
        debug!("Clearing logo cache");
        self.logos.clear();
    }

    // Favicon namespace.

    pub fn get_favicon(&self, container_id: &str) -> Option<CachedBlob> {
        self.favicons.get(container_id)
    }

    pub fn put_favicon(&self, container_id: &str, blob: CachedBlob) {
        self.favicons.put(container_id, blob);
    }

    pub fn clear_favicon_cache(&self) {
        debug!("Clearing favicon cache");
        self.favicons.clear();
    }

    // Auth-provider logo namespace, keyed by provider name.

    pub fn get_auth_logo(&self, provider: &str) -> Option<CachedBlob> {
        self.auth_logos.get(provider)
    }

    pub fn put_auth_logo(&self, provider: &str, blob: CachedBlob) {
        self.auth_logos.put(provider, blob);
    }

    pub fn clear_auth_logo_cache(&self) {
        debug!("Clearing auth logo cache");
        self.auth_logos.clear();
    }

    pub fn clear_all(&self) {
        self.clear_logo_cache();
        self.clear_favicon_cache();
        self.clear_auth_logo_cache();
    }

    /// First attachment whose name starts with the site-logo prefix
    ///
    /// Logos are identified by prefix because the suffix varies with the
    /// uploaded extension; the owner's attachment set is small, so a linear
    /// scan of the full listing is fine.
    pub async fn lookup_logo_attachment(
        &self,
        parent: &AttachmentParent,
    ) -> Result<Option<Attachment>> {
        self.lookup_by_prefix(parent, LOGO_FILE_NAME_PREFIX).await
    }

    /// First attachment whose name starts with the mobile-logo prefix
    pub async fn lookup_mobile_logo_attachment(
        &self,
        parent: &AttachmentParent,
    ) -> Result<Option<Attachment>> {
        self.lookup_by_prefix(parent, MOBILE_LOGO_FILE_NAME_PREFIX)
            .await
    }

    /// First attachment whose name starts with the auth-logo prefix
    pub async fn lookup_auth_logo_attachment(
        &self,
        parent: &AttachmentParent,
    ) -> Result<Option<Attachment>> {
        self.lookup_by_prefix(parent, AUTH_LOGO_FILE_NAME_PREFIX)
            .await
    }

    /// Favicon attachment under its exact well-known name, straight from
    /// the document store (these are not hot paths, the cache is bypassed)
    pub async fn lookup_favicon_attachment(
        &self,
        parent: &AttachmentParent,
    ) -> Result<Option<Attachment>> {
        self.store.get_attachment(parent, FAVICON_FILE_NAME).await
    }

    /// Custom stylesheet attachment under its exact well-known name
    pub async fn lookup_stylesheet_attachment(
        &self,
        parent: &AttachmentParent,
    ) -> Result<Option<Attachment>> {
        self.store
            .get_attachment(parent, STYLESHEET_FILE_NAME)
            .await
    }

    async fn lookup_by_prefix(
        &self,
        parent: &AttachmentParent,
        prefix: &str,
    ) -> Result<Option<Attachment>> {
        let attachments = self.store.get_attachments(parent).await?;
        Ok(attachments.into_iter().find(|a| a.name.starts_with(prefix)))
    }
}

fn logo_key(container_id: &str, mobile: bool) -> String {
    if mobile {
        format!("{}|mobile", container_id)
    } else {
        format!("{}|site", container_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attachment_core::MemoryDocumentStore;
    use chrono::Utc;

    fn parent() -> AttachmentParent {
        AttachmentParent::new("container-1", "entity-1")
    }

    fn blob(bytes: &[u8]) -> CachedBlob {
        CachedBlob::present(bytes.to_vec(), "image/png", Utc::now())
    }

    fn service_with_store() -> (AttachmentCacheService, Arc<MemoryDocumentStore>) {
        let store = Arc::new(MemoryDocumentStore::new());
        (AttachmentCacheService::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_prefix_lookup_returns_first_in_listing_order() {
        let (service, store) = service_with_store();
        store.insert(&parent(), "site-logo.png", vec![]);
        store.insert(&parent(), "site-logo-mobile.png", vec![]);

        let logo = service.lookup_logo_attachment(&parent()).await.unwrap();
        assert_eq!(logo.unwrap().name, "site-logo.png");

        // Both names match the site-logo prefix; listing order decides.
        store.remove(&parent(), "site-logo.png");
        let logo = service.lookup_logo_attachment(&parent()).await.unwrap();
        assert_eq!(logo.unwrap().name, "site-logo-mobile.png");
    }

    #[tokio::test]
    async fn test_prefix_lookup_none_when_no_match() {
        let (service, store) = service_with_store();
        store.insert(&parent(), "banner.png", vec![]);

        let logo = service.lookup_logo_attachment(&parent()).await.unwrap();
        assert!(logo.is_none());
    }

    #[tokio::test]
    async fn test_mobile_lookup_uses_longer_prefix() {
        let (service, store) = service_with_store();
        store.insert(&parent(), "site-logo.png", vec![]);
        store.insert(&parent(), "site-logo-mobile.svg", vec![]);

        let mobile = service
            .lookup_mobile_logo_attachment(&parent())
            .await
            .unwrap();
        assert_eq!(mobile.unwrap().name, "site-logo-mobile.svg");
    }

    #[tokio::test]
    async fn test_convention_lookups_use_exact_names() {
        let (service, store) = service_with_store();
        store.insert(&parent(), "favicon.ico", vec![]);
        store.insert(&parent(), "stylesheet.css", vec![]);

        let favicon = service.lookup_favicon_attachment(&parent()).await.unwrap();
        assert_eq!(favicon.unwrap().name, FAVICON_FILE_NAME);

        let css = service
            .lookup_stylesheet_attachment(&parent())
            .await
            .unwrap();
        assert_eq!(css.unwrap().name, STYLESHEET_FILE_NAME);
    }

    #[tokio::test]
    async fn test_clear_semantics_are_independent() {
        let (service, _store) = service_with_store();
        service.put_logo("c1", blob(b"logo"));
        service.put_favicon("c1", blob(b"icon"));
        service.put_auth_logo("okta", blob(b"auth"));

        service.clear_logo_cache();

        assert!(service.get_logo("c1").is_none());
        assert!(service.get_favicon("c1").is_some());
        assert!(service.get_auth_logo("okta").is_some());
    }

    #[tokio::test]
    async fn test_site_and_mobile_logos_do_not_collide() {
        let (service, _store) = service_with_store();
        service.put_logo("c1", blob(b"site"));
        service.put_mobile_logo("c1", blob(b"mobile-bytes"));

        assert_eq!(service.get_logo("c1").unwrap().content_length(), Some(4));
        assert_eq!(
            service.get_mobile_logo("c1").unwrap().content_length(),
            Some(12)
        );
    }

    #[tokio::test]
    async fn test_clear_all() {
        let (service, _store) = service_with_store();
        service.put_logo("c1", blob(b"logo"));
        service.put_favicon("c1", blob(b"icon"));
        service.put_auth_logo("okta", blob(b"auth"));

        service.clear_all();

        assert!(service.get_logo("c1").is_none());
        assert!(service.get_favicon("c1").is_none());
        assert!(service.get_auth_logo("okta").is_none());
    }
}
