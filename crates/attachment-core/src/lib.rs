//! Core attachment types and document-store contracts
//!
//! Defines the attachment metadata model, the `CachedBlob` payload type used
//! by every cache in the workspace, and the async traits implemented by
//! concrete document stores and resource listers.

pub mod blob;
pub mod error;
pub mod memory;
pub mod mime;
pub mod store;
pub mod types;

pub use blob::{CachedBlob, ResponseWriter};
pub use error::{Result, StoreError};
pub use memory::MemoryDocumentStore;
pub use store::{DocumentContent, DocumentStore, ResourceLister};
pub use types::{file_extension, Attachment, AttachmentParent, DEFAULT_EXTENSION};
