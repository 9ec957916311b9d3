//! Filesystem-backed document store
//!
//! Files documents under `<root>/<parent-entity-id>/<name>` and lists
//! resources (icon directories) under plain subdirectories. Listing order is
//! name order, so prefix lookups are deterministic.

pub mod lister;
pub mod store;

pub use lister::FsResourceLister;
pub use store::FsDocumentStore;
