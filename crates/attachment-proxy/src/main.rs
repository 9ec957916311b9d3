//! Attachment Proxy - cached serving of site logos, favicons, and portal
//! background images
//!
//! Wires the document store, the named attachment caches, the single-flight
//! portal image cache, and the icon registry into one HTTP service.

mod error;
mod server;
mod types;

use crate::error::{ProxyError, Result};
use crate::server::{start_server, ServerState, SharedState};
use crate::types::ProxyConfig;
use attachment_cache::AttachmentCacheService;
use attachment_core::DocumentStore;
use fs_document_store::{FsDocumentStore, FsResourceLister};
use icon_registry::IconRegistry;
use portal_image_cache::PortalImageCache;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let env_filter =
        EnvFilter::from_default_env().add_directive("attachment_proxy=info".parse()?);

    // Use JSON format for GCP Cloud Logging when LOG_FORMAT=json
    if std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false)
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_stackdriver::layer())
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    };

    info!("Starting Attachment Proxy...");

    // Load configuration from environment
    let config = load_config();
    info!("Port: {}", config.port);
    info!("Document root: {:?}", config.document_root);
    info!("Resource root: {:?}", config.resource_root);
    info!("Site container: {}", config.site_container_id);

    // Wire the store, caches, and registry
    let store: Arc<dyn DocumentStore> = Arc::new(FsDocumentStore::new(&config.document_root));
    let cache = AttachmentCacheService::new(store.clone());
    let portal = PortalImageCache::new(store);

    // The resource tree is the primary icon source; the document root acts
    // as the lower-level fallback lister.
    let icons = IconRegistry::with_fallback(
        Arc::new(FsResourceLister::new(&config.resource_root)),
        Arc::new(FsResourceLister::new(&config.document_root)),
    );

    let state: SharedState = Arc::new(ServerState::new(
        cache,
        portal,
        icons,
        config.site_container_id,
    ));

    // Start HTTP server (blocking)
    start_server(state, config.port)
        .await
        .map_err(|e| ProxyError::Config(format!("Server error: {}", e)))?;

    Ok(())
}

fn load_config() -> ProxyConfig {
    let defaults = ProxyConfig::default();

    let port = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(defaults.port);

    let document_root = std::env::var("DOCUMENT_ROOT")
        .map(PathBuf::from)
        .unwrap_or(defaults.document_root);

    let resource_root = std::env::var("RESOURCE_ROOT")
        .map(PathBuf::from)
        .unwrap_or(defaults.resource_root);

    let site_container_id =
        std::env::var("SITE_CONTAINER_ID").unwrap_or(defaults.site_container_id);

    ProxyConfig {
        port,
        document_root,
        resource_root,
        site_container_id,
    }
}
