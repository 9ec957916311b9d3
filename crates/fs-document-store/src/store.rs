//! Filesystem [`DocumentStore`]

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use attachment_core::mime::content_type_for_name;
use attachment_core::{
    Attachment, AttachmentParent, DocumentContent, DocumentStore, Result, StoreError,
};
use chrono::{DateTime, Utc};
use tracing::debug;

/// Document store rooted at a directory, one subdirectory per parent entity
#[derive(Debug, Clone)]
pub struct FsDocumentStore {
    root: PathBuf,
}

impl FsDocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn parent_dir(&self, parent: &AttachmentParent) -> PathBuf {
        self.root.join(&parent.entity_id)
    }

    fn document_path(&self, parent: &AttachmentParent, name: &str) -> Result<PathBuf> {
        if !is_safe_name(name) {
            return Err(StoreError::Backend(format!(
                "invalid document name: {name:?}"
            )));
        }
        Ok(self.parent_dir(parent).join(name))
    }

    async fn stat(&self, path: &Path) -> Result<Option<std::fs::Metadata>> {
        match tokio::fs::metadata(path).await {
            Ok(meta) if meta.is_file() => Ok(Some(meta)),
            Ok(_) => Ok(None),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Document names never address outside their parent directory
fn is_safe_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains('\\')
}

fn attachment_from_meta(
    parent: &AttachmentParent,
    name: &str,
    meta: &std::fs::Metadata,
    path: PathBuf,
) -> Attachment {
    let created_at = meta
        .modified()
        .map(DateTime::<Utc>::from)
        .unwrap_or_else(|_| Utc::now());

    let mut attachment = Attachment::new(parent, name);
    attachment.created_at = created_at;
    attachment.file = Some(path);
    attachment
}

#[async_trait]
impl DocumentStore for FsDocumentStore {
    async fn get_attachment(
        &self,
        parent: &AttachmentParent,
        name: &str,
    ) -> Result<Option<Attachment>> {
        let path = self.document_path(parent, name)?;
        Ok(self
            .stat(&path)
            .await?
            .map(|meta| attachment_from_meta(parent, name, &meta, path)))
    }

    async fn get_attachments(&self, parent: &AttachmentParent) -> Result<Vec<Attachment>> {
        let dir = self.parent_dir(parent);
        let mut reader = match tokio::fs::read_dir(&dir).await {
            Ok(reader) => reader,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut attachments = Vec::new();
        while let Some(entry) = reader.next_entry().await? {
            let meta = entry.metadata().await?;
            if !meta.is_file() {
                continue;
            }
            let Ok(name) = entry.file_name().into_string() else {
                debug!(path = ?entry.path(), "Skipping non-UTF-8 document name");
                continue;
            };
            attachments.push(attachment_from_meta(parent, &name, &meta, entry.path()));
        }

        // read_dir order is platform-dependent; sort for a stable listing.
        attachments.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(attachments)
    }

    async fn read_document(
        &self,
        parent: &AttachmentParent,
        name: &str,
    ) -> Result<Option<DocumentContent>> {
        let path = self.document_path(parent, name)?;
        let Some(meta) = self.stat(&path).await? else {
            return Ok(None);
        };

        let bytes = tokio::fs::read(&path).await?;
        let last_modified = meta
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| Utc::now());

        Ok(Some(DocumentContent {
            bytes,
            content_type: content_type_for_name(name).to_string(),
            last_modified,
        }))
    }
}
