//! Core types for the attachment proxy

use serde::Serialize;
use std::path::PathBuf;

/// Configuration for the proxy, loaded from the environment
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub port: u16,
    /// Root of the document store (one subdirectory per parent entity)
    pub document_root: PathBuf,
    /// Root of the static resource tree holding the `_icons` directory
    pub resource_root: PathBuf,
    /// Entity id of the site container that owns site-wide attachments
    pub site_container_id: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            port: 3002,
            document_root: PathBuf::from("./data/documents"),
            resource_root: PathBuf::from("./data/resources"),
            site_container_id: "site".to_string(),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: u64,
}

/// Icon resolution response
#[derive(Debug, Serialize)]
pub struct IconResponse {
    pub icon_path: String,
    pub font_class: Option<String>,
}
