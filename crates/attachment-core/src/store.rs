//! Async contracts implemented by concrete document stores

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::blob::CachedBlob;
use crate::error::Result;
use crate::types::{Attachment, AttachmentParent};

/// Bytes and HTTP metadata for one stored document
#[derive(Debug, Clone)]
pub struct DocumentContent {
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub last_modified: DateTime<Utc>,
}

impl DocumentContent {
    /// Wrap the content in a cacheable payload
    pub fn into_blob(self) -> CachedBlob {
        CachedBlob::present(self.bytes, self.content_type, self.last_modified)
    }
}

/// Storage backend that files documents under a parent entity
///
/// Implementations must be `Send + Sync` and safe for concurrent access.
/// Absence is reported as `None`, never as an error. `get_attachments` must
/// return a stable listing order for a given store state; prefix-based logo
/// lookups rely on it.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Metadata for one document, `None` if the parent has no such name
    async fn get_attachment(
        &self,
        parent: &AttachmentParent,
        name: &str,
    ) -> Result<Option<Attachment>>;

    /// Full attachment listing for a parent, in listing order
    async fn get_attachments(&self, parent: &AttachmentParent) -> Result<Vec<Attachment>>;

    /// Buffer a document's bytes and metadata, `None` if absent
    async fn read_document(
        &self,
        parent: &AttachmentParent,
        name: &str,
    ) -> Result<Option<DocumentContent>>;
}

/// Lists resource names under a logical path
///
/// Used by the icon registry to enumerate the icon directory; a registry may
/// hold a secondary lister to fall back to.
#[async_trait]
pub trait ResourceLister: Send + Sync {
    async fn list_names(&self, logical_path: &str) -> Result<Vec<String>>;
}
