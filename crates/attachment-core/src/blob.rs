//! Cached binary payloads and the response-writer seam

use chrono::{DateTime, Utc};
use std::io;
use std::sync::Arc;
use std::time::Duration;

/// A cached, ready-to-serve binary payload plus HTTP metadata, or an
/// explicit "no document" marker
///
/// A cache entry is always one of these two variants once a key has been
/// requested; a load failure is never stored. Bytes are `Arc`-shared so
/// cloning an entry out of a cache is cheap.
#[derive(Debug, Clone)]
pub enum CachedBlob {
    Present {
        bytes: Arc<Vec<u8>>,
        content_type: String,
        last_modified: DateTime<Utc>,
    },
    Absent,
}

impl CachedBlob {
    pub fn present(
        bytes: Vec<u8>,
        content_type: impl Into<String>,
        last_modified: DateTime<Utc>,
    ) -> Self {
        Self::Present {
            bytes: Arc::new(bytes),
            content_type: content_type.into(),
            last_modified,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Byte length of the payload, `None` for the absent marker
    pub fn content_length(&self) -> Option<u64> {
        match self {
            Self::Present { bytes, .. } => Some(bytes.len() as u64),
            Self::Absent => None,
        }
    }

    pub fn content_type(&self) -> Option<&str> {
        match self {
            Self::Present { content_type, .. } => Some(content_type),
            Self::Absent => None,
        }
    }

    /// Write content type, length, an expiration header, and the buffered
    /// bytes to `writer`. Writing the absent marker is a no-op; callers
    /// decide how to represent "nothing to render".
    pub fn write_to(&self, writer: &mut dyn ResponseWriter, expires: Duration) -> io::Result<()> {
        match self {
            Self::Present {
                bytes,
                content_type,
                ..
            } => {
                writer.set_content_type(content_type);
                writer.set_content_length(bytes.len() as u64);
                writer.set_expires(expires);
                writer.write_body(bytes)
            }
            Self::Absent => Ok(()),
        }
    }
}

/// Sink for serving a cached blob as an HTTP response
///
/// Implemented by whatever HTTP layer hosts the caches; tests use an
/// in-memory recorder.
pub trait ResponseWriter {
    fn set_content_type(&mut self, content_type: &str);
    fn set_content_length(&mut self, length: u64);
    fn set_expires(&mut self, expires: Duration);
    fn write_body(&mut self, bytes: &[u8]) -> io::Result<()>;
}
