//! In-memory [`DocumentStore`] for tests and demos

use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::Result;
use crate::mime::content_type_for_name;
use crate::store::{DocumentContent, DocumentStore};
use crate::types::{Attachment, AttachmentParent};

#[derive(Debug, Clone)]
struct StoredDocument {
    attachment: Attachment,
    content_type: String,
    bytes: Vec<u8>,
}

/// In-memory [`DocumentStore`] backed by a [`DashMap`]
///
/// Documents are kept per parent in insertion order, which is also the
/// listing order reported by `get_attachments`.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    docs: DashMap<String, Vec<StoredDocument>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a document, replacing any existing one with the same name.
    /// The content type is derived from the name's extension.
    pub fn insert(&self, parent: &AttachmentParent, name: &str, bytes: Vec<u8>) {
        let doc = StoredDocument {
            attachment: Attachment::new(parent, name),
            content_type: content_type_for_name(name).to_string(),
            bytes,
        };

        let mut entry = self.docs.entry(parent.entity_id.clone()).or_default();
        match entry.iter_mut().find(|d| d.attachment.name == name) {
            Some(existing) => *existing = doc,
            None => entry.push(doc),
        }
    }

    /// Delete a document. Returns `true` if it existed.
    pub fn remove(&self, parent: &AttachmentParent, name: &str) -> bool {
        let Some(mut entry) = self.docs.get_mut(&parent.entity_id) else {
            return false;
        };
        let before = entry.len();
        entry.retain(|d| d.attachment.name != name);
        entry.len() != before
    }

    fn find(&self, parent: &AttachmentParent, name: &str) -> Option<StoredDocument> {
        self.docs
            .get(&parent.entity_id)
            .and_then(|docs| docs.iter().find(|d| d.attachment.name == name).cloned())
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get_attachment(
        &self,
        parent: &AttachmentParent,
        name: &str,
    ) -> Result<Option<Attachment>> {
        Ok(self.find(parent, name).map(|d| d.attachment))
    }

    async fn get_attachments(&self, parent: &AttachmentParent) -> Result<Vec<Attachment>> {
        Ok(self
            .docs
            .get(&parent.entity_id)
            .map(|docs| docs.iter().map(|d| d.attachment.clone()).collect())
            .unwrap_or_default())
    }

    async fn read_document(
        &self,
        parent: &AttachmentParent,
        name: &str,
    ) -> Result<Option<DocumentContent>> {
        Ok(self.find(parent, name).map(|d| DocumentContent {
            bytes: d.bytes,
            content_type: d.content_type,
            last_modified: d.attachment.created_at,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parent() -> AttachmentParent {
        AttachmentParent::new("c1", "e1")
    }

    #[tokio::test]
    async fn test_insert_and_read() {
        let store = MemoryDocumentStore::new();
        store.insert(&parent(), "logo.png", b"png".to_vec());

        let att = store.get_attachment(&parent(), "logo.png").await.unwrap();
        assert!(att.is_some());

        let content = store.read_document(&parent(), "logo.png").await.unwrap();
        let content = content.unwrap();
        assert_eq!(content.bytes, b"png");
        assert_eq!(content.content_type, "image/png");
    }

    #[tokio::test]
    async fn test_listing_preserves_insertion_order() {
        let store = MemoryDocumentStore::new();
        store.insert(&parent(), "b.png", vec![]);
        store.insert(&parent(), "a.png", vec![]);
        store.insert(&parent(), "c.png", vec![]);

        let names: Vec<String> = store
            .get_attachments(&parent())
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(names, vec!["b.png", "a.png", "c.png"]);
    }

    #[tokio::test]
    async fn test_insert_replaces_in_place() {
        let store = MemoryDocumentStore::new();
        store.insert(&parent(), "a.png", b"one".to_vec());
        store.insert(&parent(), "b.png", vec![]);
        store.insert(&parent(), "a.png", b"two".to_vec());

        let listing = store.get_attachments(&parent()).await.unwrap();
        assert_eq!(listing.len(), 2);
        assert_eq!(listing[0].name, "a.png");

        let content = store.read_document(&parent(), "a.png").await.unwrap();
        assert_eq!(content.unwrap().bytes, b"two");
    }

    #[tokio::test]
    async fn test_remove() {
        let store = MemoryDocumentStore::new();
        store.insert(&parent(), "a.png", vec![]);

        assert!(store.remove(&parent(), "a.png"));
        assert!(!store.remove(&parent(), "a.png"));
        assert!(store
            .get_attachment(&parent(), "a.png")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_parents_are_isolated() {
        let store = MemoryDocumentStore::new();
        let other = AttachmentParent::new("c1", "e2");
        store.insert(&parent(), "a.png", vec![]);

        assert!(store.get_attachments(&other).await.unwrap().is_empty());
    }
}
