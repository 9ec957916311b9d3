//! Attachment metadata model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Extension reported for names with no `.` suffix
pub const DEFAULT_EXTENSION: &str = "doc";

/// Identity of the entity that owns a set of attachments
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttachmentParent {
    pub container_id: String,
    pub entity_id: String,
}

impl AttachmentParent {
    pub fn new(container_id: impl Into<String>, entity_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
            entity_id: entity_id.into(),
        }
    }
}

/// Metadata for one stored document (not its bytes)
///
/// Identity is the (parent entity id, name) pair. Persistence is the document
/// store's job; this type is only constructed when listing or fetching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub parent_entity_id: String,
    pub name: String,
    pub container_id: String,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_indexed: Option<DateTime<Utc>>,
    /// Transient handle to a local copy, when the store keeps one
    #[serde(skip)]
    pub file: Option<PathBuf>,
}

impl Attachment {
    pub fn new(parent: &AttachmentParent, name: impl Into<String>) -> Self {
        Self {
            parent_entity_id: parent.entity_id.clone(),
            name: name.into(),
            container_id: parent.container_id.clone(),
            created_by: None,
            created_at: Utc::now(),
            last_indexed: None,
            file: None,
        }
    }

    /// Lowercase extension of the document name, `"doc"` when there is none
    pub fn extension(&self) -> String {
        file_extension(&self.name)
            .map(str::to_ascii_lowercase)
            .unwrap_or_else(|| DEFAULT_EXTENSION.to_string())
    }
}

/// Substring after the last `.` of `name`, or `None` when there is no dot
///
/// The returned slice is not lowercased; callers normalize as needed.
pub fn file_extension(name: &str) -> Option<&str> {
    name.rsplit_once('.').map(|(_, ext)| ext)
}
