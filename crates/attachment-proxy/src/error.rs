//! Error types for the attachment proxy

use std::fmt;

use attachment_core::StoreError;

#[derive(Debug)]
pub enum ProxyError {
    Store(StoreError),
    Io(Box<std::io::Error>),
    Config(String),
}

impl fmt::Display for ProxyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProxyError::Store(e) => write!(f, "Document store error: {}", e),
            ProxyError::Io(e) => write!(f, "IO error: {}", e),
            ProxyError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for ProxyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProxyError::Store(e) => Some(e),
            ProxyError::Io(e) => Some(e.as_ref()),
            ProxyError::Config(_) => None,
        }
    }
}

impl From<StoreError> for ProxyError {
    fn from(e: StoreError) -> Self {
        ProxyError::Store(e)
    }
}

impl From<std::io::Error> for ProxyError {
    fn from(e: std::io::Error) -> Self {
        ProxyError::Io(Box::new(e))
    }
}

impl From<tracing_subscriber::filter::ParseError> for ProxyError {
    fn from(e: tracing_subscriber::filter::ParseError) -> Self {
        ProxyError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ProxyError>;
