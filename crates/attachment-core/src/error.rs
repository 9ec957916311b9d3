//! Error types for document-store operations

use std::fmt;

/// Errors surfaced by document stores and resource listers
///
/// "Not found" is never an error; stores report absence as `None`.
#[derive(Debug)]
pub enum StoreError {
    /// Underlying filesystem or stream I/O failed
    Io(Box<std::io::Error>),
    /// Backend-specific failure (bad layout, unavailable service)
    Backend(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "Document store I/O error: {}", e),
            Self::Backend(msg) => write!(f, "Document store error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e.as_ref()),
            Self::Backend(_) => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(Box::new(e))
    }
}

/// Result type for document-store operations
pub type Result<T> = std::result::Result<T, StoreError>;
