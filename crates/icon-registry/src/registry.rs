//! Lazily populated extension/MIME to icon-path registry

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use attachment_core::mime::{mime_for_extension, top_level};
use attachment_core::{file_extension, ResourceLister};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::classes::font_class_for_extension;

/// Logical path the icon directory is listed under
pub const ICON_RESOURCE_PATH: &str = "_icons";

/// Token used for null names and as the last lookup fallback
const GENERIC_TOKEN: &str = "_generic";

/// Icon files that can be displayed inline; anything else in the icon
/// directory is ignored during population
const INLINE_IMAGE_EXTENSIONS: &[&str] = &["gif", "png", "jpg", "jpeg", "svg"];

/// Maps a filename or MIME type to a representative icon path
///
/// The table is populated at most once per process from a resource listing,
/// guarded by a mutex so only the first thread does the listing I/O.
/// "Populated" means "table non-empty": if both listers come up empty the
/// table stays empty and every later lookup re-attempts population, which is
/// cheap once a backing store appears.
pub struct IconRegistry {
    primary: Arc<dyn ResourceLister>,
    fallback: Option<Arc<dyn ResourceLister>>,
    icons: RwLock<HashMap<String, String>>,
    populate: Mutex<()>,
}

impl IconRegistry {
    pub fn new(primary: Arc<dyn ResourceLister>) -> Self {
        Self {
            primary,
            fallback: None,
            icons: RwLock::new(HashMap::new()),
            populate: Mutex::new(()),
        }
    }

    /// Registry with a secondary, lower-level lister consulted when the
    /// primary yields no entries
    pub fn with_fallback(primary: Arc<dyn ResourceLister>, fallback: Arc<dyn ResourceLister>) -> Self {
        Self {
            fallback: Some(fallback),
            ..Self::new(primary)
        }
    }

    /// Icon path for a document name, `""` when nothing matches
    ///
    /// The lookup token is the lowercase substring after the last `.` (the
    /// whole name when there is no dot, the generic token for `None`). On a
    /// token miss the MIME type for the token and then its top-level
    /// category are tried, and a hit is written back under the original
    /// token. Never errors.
    pub async fn resolve(&self, name: Option<&str>) -> String {
        let token = normalize_token(name);
        self.ensure_populated().await;

        if let Some(path) = self.lookup(&token) {
            return path;
        }

        if let Some(path) = self.mime_fallback(&token) {
            self.icons
                .write()
                .expect("icon table lock poisoned")
                .insert(token, path.clone());
            return path;
        }

        self.lookup(GENERIC_TOKEN).unwrap_or_default()
    }

    /// Font class for a document name, derived from the *resolved icon
    /// path's* extension via the fixed table in [`crate::classes`]
    pub async fn resolve_font_class(&self, name: Option<&str>) -> Option<String> {
        let path = self.resolve(name).await;
        self.font_class_for_path(&path)
    }

    /// Font class for an already-resolved icon path, for callers that hold
    /// the result of [`resolve`](Self::resolve) and don't want a second
    /// lookup
    pub fn font_class_for_path(&self, icon_path: &str) -> Option<String> {
        if icon_path.is_empty() {
            return None;
        }
        let ext = file_extension(icon_path)?.to_ascii_lowercase();
        font_class_for_extension(&ext).map(str::to_string)
    }

    fn lookup(&self, token: &str) -> Option<String> {
        self.icons
            .read()
            .expect("icon table lock poisoned")
            .get(token)
            .cloned()
    }

    fn mime_fallback(&self, token: &str) -> Option<String> {
        let mime = mime_for_extension(token)?;
        self.lookup(mime).or_else(|| self.lookup(top_level(mime)))
    }

    async fn ensure_populated(&self) {
        if !self.icons.read().expect("icon table lock poisoned").is_empty() {
            return;
        }

        // Only the first thread lists the directory; the rest block here
        // briefly and find the table filled.
        let _guard = self.populate.lock().await;
        if !self.icons.read().expect("icon table lock poisoned").is_empty() {
            return;
        }

        let names = self.list_icon_names().await;
        let mut table = HashMap::new();

        for entry in &names {
            let file = entry.rsplit('/').next().unwrap_or(entry);
            let Some((stem, icon_ext)) = file.rsplit_once('.') else {
                continue;
            };
            if !INLINE_IMAGE_EXTENSIONS.contains(&icon_ext.to_ascii_lowercase().as_str()) {
                continue;
            }

            let token = stem.to_ascii_lowercase();
            let path = format!("{}/{}", ICON_RESOURCE_PATH, file);
            if let Some(mime) = mime_for_extension(&token) {
                table.insert(mime.to_string(), path.clone());
            }
            table.insert(token, path);
        }

        if table.is_empty() {
            // Leave the registry retryable; a later call attempts again.
            debug!("Icon listing yielded no entries, registry stays empty");
            return;
        }

        debug!(entries = table.len(), "Populated icon registry");
        *self.icons.write().expect("icon table lock poisoned") = table;
    }

    async fn list_icon_names(&self) -> Vec<String> {
        match self.primary.list_names(ICON_RESOURCE_PATH).await {
            Ok(names) if !names.is_empty() => return names,
            Ok(_) => debug!("Primary icon lister returned no entries"),
            Err(e) => warn!(error = %e, "Primary icon lister failed"),
        }

        if let Some(fallback) = &self.fallback {
            match fallback.list_names(ICON_RESOURCE_PATH).await {
                Ok(names) => return names,
                Err(e) => warn!(error = %e, "Fallback icon lister failed"),
            }
        }

        Vec::new()
    }
}

/// Lowercase lookup token for a document name
fn normalize_token(name: Option<&str>) -> String {
    match name {
        None => GENERIC_TOKEN.to_string(),
        Some(n) => file_extension(n).unwrap_or(n).to_ascii_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use attachment_core::error::{Result, StoreError};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StaticLister {
        names: Vec<&'static str>,
        calls: AtomicUsize,
    }

    impl StaticLister {
        fn new(names: Vec<&'static str>) -> Self {
            Self {
                names,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ResourceLister for StaticLister {
        async fn list_names(&self, _logical_path: &str) -> Result<Vec<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.names.iter().map(|s| s.to_string()).collect())
        }
    }

    struct FailingLister;

    #[async_trait]
    impl ResourceLister for FailingLister {
        async fn list_names(&self, _logical_path: &str) -> Result<Vec<String>> {
            Err(StoreError::Backend("lister unavailable".to_string()))
        }
    }

    fn registry(names: Vec<&'static str>) -> IconRegistry {
        IconRegistry::new(Arc::new(StaticLister::new(names)))
    }

    #[tokio::test]
    async fn test_extension_normalization() {
        let reg = registry(vec!["pdf.png", "xls.gif", "_generic.gif"]);

        let upper = reg.resolve(Some("Report.PDF")).await;
        let lower = reg.resolve(Some("report.pdf")).await;
        assert_eq!(upper, "_icons/pdf.png");
        assert_eq!(upper, lower);
    }

    #[tokio::test]
    async fn test_generic_fallbacks() {
        let reg = registry(vec!["pdf.png", "_generic.gif"]);

        assert_eq!(reg.resolve(None).await, "_icons/_generic.gif");
        assert_eq!(reg.resolve(Some("noextension")).await, "_icons/_generic.gif");
        assert_eq!(reg.resolve(Some("file.zzz")).await, "_icons/_generic.gif");
    }

    #[tokio::test]
    async fn test_missing_generic_resolves_empty() {
        let reg = registry(vec!["pdf.png"]);
        assert_eq!(reg.resolve(Some("file.zzz")).await, "");
    }

    #[tokio::test]
    async fn test_mime_alias_lookup() {
        // "jpg.png" registers both "jpg" and "image/jpeg"; a .jpeg document
        // misses on its token and hits via the MIME alias.
        let reg = registry(vec!["jpg.png"]);
        assert_eq!(reg.resolve(Some("photo.jpeg")).await, "_icons/jpg.png");
        // Written back under the original token.
        assert_eq!(reg.lookup("jpeg").as_deref(), Some("_icons/jpg.png"));
    }

    #[tokio::test]
    async fn test_mime_top_level_lookup() {
        // "image.png" registers the bare "image" token, which catches any
        // image/* type with no more specific entry.
        let reg = registry(vec!["image.png"]);
        assert_eq!(reg.resolve(Some("pic.webp")).await, "_icons/image.png");
    }

    #[tokio::test]
    async fn test_non_image_entries_ignored() {
        let reg = registry(vec!["readme.txt", "pdf.png"]);
        assert_eq!(reg.resolve(Some("notes.readme")).await, "");
        assert_eq!(reg.resolve(Some("a.pdf")).await, "_icons/pdf.png");
    }

    #[tokio::test]
    async fn test_empty_listing_repopulates_on_each_lookup() {
        let lister = Arc::new(StaticLister::new(vec![]));
        let reg = IconRegistry::new(lister.clone());

        assert_eq!(reg.resolve(Some("a.pdf")).await, "");
        assert_eq!(reg.resolve(Some("b.pdf")).await, "");
        assert_eq!(lister.calls(), 2);
    }

    #[tokio::test]
    async fn test_population_runs_once_when_nonempty() {
        let lister = Arc::new(StaticLister::new(vec!["pdf.png"]));
        let reg = IconRegistry::new(lister.clone());

        reg.resolve(Some("a.pdf")).await;
        reg.resolve(Some("b.pdf")).await;
        assert_eq!(lister.calls(), 1);
    }

    #[tokio::test]
    async fn test_fallback_lister_used_when_primary_empty() {
        let primary = Arc::new(StaticLister::new(vec![]));
        let fallback = Arc::new(StaticLister::new(vec!["pdf.png"]));
        let reg = IconRegistry::with_fallback(primary, fallback);

        assert_eq!(reg.resolve(Some("a.pdf")).await, "_icons/pdf.png");
    }

    #[tokio::test]
    async fn test_failing_primary_degrades_to_fallback() {
        let fallback = Arc::new(StaticLister::new(vec!["pdf.png"]));
        let reg = IconRegistry::with_fallback(Arc::new(FailingLister), fallback);

        assert_eq!(reg.resolve(Some("a.pdf")).await, "_icons/pdf.png");
    }

    #[tokio::test]
    async fn test_failing_lister_never_errors() {
        let reg = IconRegistry::new(Arc::new(FailingLister));
        assert_eq!(reg.resolve(Some("a.pdf")).await, "");
        assert_eq!(reg.resolve_font_class(Some("a.pdf")).await, None);
    }

    #[tokio::test]
    async fn test_font_class_for_path_matches_full_resolution() {
        // One resolve() plus font_class_for_path() must agree with the
        // combined resolve_font_class() lookup.
        let reg = registry(vec!["pdf.png", "_generic.gif"]);

        let path = reg.resolve(Some("report.pdf")).await;
        assert_eq!(
            reg.font_class_for_path(&path),
            reg.resolve_font_class(Some("report.pdf")).await
        );

        assert_eq!(reg.font_class_for_path(""), None);
        assert_eq!(reg.font_class_for_path("_icons/noext"), None);
    }

    #[tokio::test]
    async fn test_font_class_follows_icon_path_extension() {
        // An .xlsx document resolves to the generic .gif icon, so the font
        // class is the one for "gif", not the one for "xlsx".
        let reg = registry(vec!["xls.gif", "_generic.gif"]);

        let class = reg.resolve_font_class(Some("file.xlsx")).await;
        assert_eq!(class.as_deref(), Some("fa fa-file-image-o"));

        let class = reg.resolve_font_class(Some("report.xls")).await;
        assert_eq!(class.as_deref(), Some("fa fa-file-image-o"));
    }
}
