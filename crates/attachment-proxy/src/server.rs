//! HTTP server for the attachment proxy endpoints
//!
//! Serves /logo, /favicon.ico, /auth/{provider}/logo, and
//! /portal/{entity}/{name} from the caches, plus /icon/{name} resolution,
//! /health, and /admin/clear.

use attachment_cache::AttachmentCacheService;
use attachment_core::{Attachment, AttachmentParent, CachedBlob, DocumentStore, StoreError};
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use icon_registry::IconRegistry;
use portal_image_cache::PortalImageCache;
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::types::{HealthResponse, IconResponse};

/// Client-side cache lifetime for served blobs
const BLOB_MAX_AGE_SECS: u64 = 86400;

/// Shared state for the HTTP server
pub struct ServerState {
    pub cache: AttachmentCacheService,
    pub portal: PortalImageCache,
    pub icons: IconRegistry,
    pub site_container_id: String,
    pub started_at: DateTime<Utc>,
}

impl ServerState {
    pub fn new(
        cache: AttachmentCacheService,
        portal: PortalImageCache,
        icons: IconRegistry,
        site_container_id: impl Into<String>,
    ) -> Self {
        Self {
            cache,
            portal,
            icons,
            site_container_id: site_container_id.into(),
            started_at: Utc::now(),
        }
    }

    /// Owner of the site-wide attachments (logos, favicon, stylesheet)
    fn site_parent(&self) -> AttachmentParent {
        AttachmentParent::new(&self.site_container_id, &self.site_container_id)
    }

    /// Owner of one authentication provider's attachments
    fn auth_parent(&self, provider: &str) -> AttachmentParent {
        AttachmentParent::new(&self.site_container_id, format!("auth-{}", provider))
    }
}

pub type SharedState = Arc<ServerState>;

/// Error response
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Create the HTTP router
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/logo", get(get_logo))
        .route("/logo/mobile", get(get_mobile_logo))
        .route("/favicon.ico", get(get_favicon))
        .route("/auth/{provider}/logo", get(get_auth_logo))
        .route(
            "/portal/{entity}/{name}",
            get(get_portal_image).delete(remove_portal_image),
        )
        .route("/icon/{name}", get(get_icon))
        .route("/admin/clear", post(clear_caches))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_server(state: SharedState, port: u16) -> std::io::Result<()> {
    let router = create_router(state);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await
}

/// Health check endpoint
async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    let uptime_secs = (Utc::now() - state.started_at).num_seconds() as u64;

    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_secs,
    })
}

/// Serve the site logo, populating the logo cache on miss
async fn get_logo(State(state): State<SharedState>) -> Response {
    let parent = state.site_parent();
    if let Some(blob) = state.cache.get_logo(&parent.container_id) {
        return blob_response(&blob, Some("HIT"));
    }

    let loaded = match state.cache.lookup_logo_attachment(&parent).await {
        Ok(attachment) => load_attachment_blob(state.cache.store(), &parent, attachment).await,
        Err(e) => Err(e),
    };

    match loaded {
        Ok(blob) => {
            state.cache.put_logo(&parent.container_id, blob.clone());
            blob_response(&blob, Some("MISS"))
        }
        Err(e) => store_failure("logo", e),
    }
}

/// Serve the mobile logo, populating the logo cache on miss
async fn get_mobile_logo(State(state): State<SharedState>) -> Response {
    let parent = state.site_parent();
    if let Some(blob) = state.cache.get_mobile_logo(&parent.container_id) {
        return blob_response(&blob, Some("HIT"));
    }

    let loaded = match state.cache.lookup_mobile_logo_attachment(&parent).await {
        Ok(attachment) => load_attachment_blob(state.cache.store(), &parent, attachment).await,
        Err(e) => Err(e),
    };

    match loaded {
        Ok(blob) => {
            state.cache.put_mobile_logo(&parent.container_id, blob.clone());
            blob_response(&blob, Some("MISS"))
        }
        Err(e) => store_failure("mobile logo", e),
    }
}

/// Serve the favicon, populating the favicon cache on miss
async fn get_favicon(State(state): State<SharedState>) -> Response {
    let parent = state.site_parent();
    if let Some(blob) = state.cache.get_favicon(&parent.container_id) {
        return blob_response(&blob, Some("HIT"));
    }

    let loaded = match state.cache.lookup_favicon_attachment(&parent).await {
        Ok(attachment) => load_attachment_blob(state.cache.store(), &parent, attachment).await,
        Err(e) => Err(e),
    };

    match loaded {
        Ok(blob) => {
            state.cache.put_favicon(&parent.container_id, blob.clone());
            blob_response(&blob, Some("MISS"))
        }
        Err(e) => store_failure("favicon", e),
    }
}

/// Serve an authentication provider's logo
async fn get_auth_logo(
    State(state): State<SharedState>,
    Path(provider): Path<String>,
) -> Response {
    if let Some(blob) = state.cache.get_auth_logo(&provider) {
        return blob_response(&blob, Some("HIT"));
    }

    let parent = state.auth_parent(&provider);
    let loaded = match state.cache.lookup_auth_logo_attachment(&parent).await {
        Ok(attachment) => load_attachment_blob(state.cache.store(), &parent, attachment).await,
        Err(e) => Err(e),
    };

    match loaded {
        Ok(blob) => {
            state.cache.put_auth_logo(&provider, blob.clone());
            blob_response(&blob, Some("MISS"))
        }
        Err(e) => store_failure("auth logo", e),
    }
}

/// Serve a portal background image through the single-flight cache
async fn get_portal_image(
    State(state): State<SharedState>,
    Path((entity, name)): Path<(String, String)>,
) -> Response {
    let parent = AttachmentParent::new(&state.site_container_id, entity);

    match state.portal.get(&parent, &name).await {
        // The single-flight cache loads transparently, so there is no
        // HIT/MISS distinction to report here.
        Ok(blob) => blob_response(&blob, None),
        Err(e) => {
            warn!(entity_id = %parent.entity_id, name = %name, error = %e, "Portal image load failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Image load failed".to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// Invalidate one portal image, used after an attachment is replaced
async fn remove_portal_image(
    State(state): State<SharedState>,
    Path((entity, name)): Path<(String, String)>,
) -> StatusCode {
    let parent = AttachmentParent::new(&state.site_container_id, entity);
    state.portal.remove(&parent, &name).await;
    StatusCode::NO_CONTENT
}

/// Resolve a document name to its icon path and font class
async fn get_icon(State(state): State<SharedState>, Path(name): Path<String>) -> Json<IconResponse> {
    let icon_path = state.icons.resolve(Some(&name)).await;
    let font_class = state.icons.font_class_for_path(&icon_path);

    Json(IconResponse {
        icon_path,
        font_class,
    })
}

/// Drop every cached blob in every namespace
async fn clear_caches(State(state): State<SharedState>) -> StatusCode {
    info!("Clearing all attachment caches");
    state.cache.clear_all();
    state.portal.clear();
    StatusCode::NO_CONTENT
}

/// Buffer the bytes behind an attachment lookup result
async fn load_attachment_blob(
    store: &Arc<dyn DocumentStore>,
    parent: &AttachmentParent,
    attachment: Option<Attachment>,
) -> Result<CachedBlob, StoreError> {
    let Some(attachment) = attachment else {
        return Ok(CachedBlob::Absent);
    };

    match store.read_document(parent, &attachment.name).await? {
        Some(content) => Ok(content.into_blob()),
        None => Ok(CachedBlob::Absent),
    }
}

/// Render a cached blob as an HTTP response; the absent marker is a 404
fn blob_response(blob: &CachedBlob, cache_header: Option<&str>) -> Response {
    match blob {
        CachedBlob::Present {
            bytes,
            content_type,
            last_modified,
        } => {
            let mut builder = Response::builder()
                .status(StatusCode::OK)
                .header(header::CONTENT_TYPE, content_type)
                .header(
                    header::CACHE_CONTROL,
                    format!("public, max-age={}", BLOB_MAX_AGE_SECS),
                )
                .header(
                    header::LAST_MODIFIED,
                    last_modified.format("%a, %d %b %Y %H:%M:%S GMT").to_string(),
                );
            if let Some(cache_header) = cache_header {
                builder = builder.header("X-Cache", cache_header);
            }
            builder.body(Body::from(bytes.as_ref().clone())).unwrap()
        }
        CachedBlob::Absent => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Document not found".to_string(),
            }),
        )
            .into_response(),
    }
}

fn store_failure(what: &str, e: StoreError) -> Response {
    warn!(error = %e, "Failed to load {}", what);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: format!("Failed to load {}", what),
        }),
    )
        .into_response()
}
