//! Icon Registry
//!
//! Resolves a document name or MIME type to a representative icon path.
//! The extension-to-path table is built once from a resource directory
//! listing; a second, statically fixed table maps icon extensions to CSS
//! font classes.

pub mod classes;
pub mod registry;

pub use classes::font_class_for_extension;
pub use registry::{IconRegistry, ICON_RESOURCE_PATH};
