//! Filesystem [`ResourceLister`]

use std::path::PathBuf;

use async_trait::async_trait;
use attachment_core::{ResourceLister, Result};
use tracing::debug;

/// Lists file names under `<root>/<logical-path>`
///
/// A missing directory is an empty listing, not an error; the icon registry
/// treats "no entries" as "stay unpopulated and retry later".
#[derive(Debug, Clone)]
pub struct FsResourceLister {
    root: PathBuf,
}

impl FsResourceLister {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ResourceLister for FsResourceLister {
    async fn list_names(&self, logical_path: &str) -> Result<Vec<String>> {
        let dir = self.root.join(logical_path);
        let mut reader = match tokio::fs::read_dir(&dir).await {
            Ok(reader) => reader,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = ?dir, "Resource directory missing, listing empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        while let Some(entry) = reader.next_entry().await? {
            if !entry.metadata().await?.is_file() {
                continue;
            }
            if let Ok(name) = entry.file_name().into_string() {
                names.push(name);
            }
        }

        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_lists_file_names_sorted() {
        let dir = tempdir().unwrap();
        let icons = dir.path().join("_icons");
        tokio::fs::create_dir_all(&icons).await.unwrap();
        tokio::fs::write(icons.join("xls.gif"), b"").await.unwrap();
        tokio::fs::write(icons.join("pdf.png"), b"").await.unwrap();

        let lister = FsResourceLister::new(dir.path());
        let names = lister.list_names("_icons").await.unwrap();
        assert_eq!(names, vec!["pdf.png", "xls.gif"]);
    }

    #[tokio::test]
    async fn test_missing_directory_is_empty() {
        let dir = tempdir().unwrap();
        let lister = FsResourceLister::new(dir.path());
        assert!(lister.list_names("_icons").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_subdirectories_are_skipped() {
        let dir = tempdir().unwrap();
        let icons = dir.path().join("_icons");
        tokio::fs::create_dir_all(icons.join("nested")).await.unwrap();
        tokio::fs::write(icons.join("pdf.png"), b"").await.unwrap();

        let lister = FsResourceLister::new(dir.path());
        assert_eq!(lister.list_names("_icons").await.unwrap(), vec!["pdf.png"]);
    }
}
