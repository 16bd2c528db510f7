//! Shared content handed to the picker by the host invocation.
//!
//! `ShareData` is read-only for the selection/publish flow except that the
//! chosen site is written back to the config. Attachments are staged into a
//! private directory at startup so the flow owns their lifetime; cancelling
//! a failed publish removes the staging directory again.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Post status sent to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Publish,
    Private,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Publish => "publish",
            PostStatus::Private => "private",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata recorded for each staged attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaMetadata {
    /// Original file name, used as the upload file name.
    pub filename: String,
    /// Best-effort MIME type derived from the extension.
    pub mime_type: String,
}

/// The content being shared: title, body, status, and a mapping from staged
/// attachment locations to their metadata.
#[derive(Debug, Clone)]
pub struct ShareData {
    pub title: String,
    pub body: String,
    pub status: PostStatus,
    attachments: BTreeMap<PathBuf, MediaMetadata>,
    staging_dir: Option<PathBuf>,
}

impl ShareData {
    pub fn new(title: String, body: String, status: PostStatus) -> Self {
        Self {
            title,
            body,
            status,
            attachments: BTreeMap::new(),
            staging_dir: None,
        }
    }

    /// Copy the given files into a fresh staging directory under
    /// `staging_root` and record them as attachments.
    ///
    /// Staging keeps the publish flow independent of the original files:
    /// the host may delete them as soon as this call returns.
    pub fn stage_attachments(&mut self, sources: &[PathBuf], staging_root: &Path) -> Result<()> {
        if sources.is_empty() {
            return Ok(());
        }

        let dir = staging_root.join(format!(
            "share-{}-{}",
            chrono::Utc::now().format("%Y%m%d%H%M%S"),
            std::process::id()
        ));
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create staging directory {}", dir.display()))?;

        for source in sources {
            let filename = source
                .file_name()
                .and_then(|n| n.to_str())
                .map(String::from)
                .with_context(|| format!("Attachment has no file name: {}", source.display()))?;

            let staged = dir.join(&filename);
            std::fs::copy(source, &staged).with_context(|| {
                format!(
                    "Failed to stage attachment {} -> {}",
                    source.display(),
                    staged.display()
                )
            })?;
            debug!("Staged attachment {} at {}", filename, staged.display());

            let mime_type = mime_for_extension(&filename);
            self.attachments
                .insert(staged, MediaMetadata { filename, mime_type });
        }

        self.staging_dir = Some(dir);
        Ok(())
    }

    /// Mapping from staged attachment location to metadata.
    pub fn attachments(&self) -> &BTreeMap<PathBuf, MediaMetadata> {
        &self.attachments
    }

    pub fn has_media(&self) -> bool {
        !self.attachments.is_empty()
    }

    /// Staged attachment locations with their metadata, in stable order.
    pub fn media(&self) -> Vec<(PathBuf, MediaMetadata)> {
        self.attachments
            .iter()
            .map(|(path, meta)| (path.clone(), meta.clone()))
            .collect()
    }

    /// Remove the staging directory and everything in it. Best-effort:
    /// failures are logged and swallowed, the flow is already shutting down.
    pub fn cleanup_staging(&self) {
        if let Some(dir) = &self.staging_dir {
            if let Err(e) = std::fs::remove_dir_all(dir) {
                warn!("Failed to remove staging directory {}: {}", dir.display(), e);
            } else {
                debug!("Removed staging directory {}", dir.display());
            }
        }
    }

    #[doc(hidden)]
    pub fn staging_dir(&self) -> Option<&Path> {
        self.staging_dir.as_deref()
    }
}

/// MIME type for the common image extensions the share flow accepts.
fn mime_for_extension(filename: &str) -> String {
    let ext = filename
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        _ => "application/octet-stream",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn staging_copies_files_and_records_metadata() {
        let source_dir = TempDir::new().unwrap();
        let staging_root = TempDir::new().unwrap();
        let photo = write_file(source_dir.path(), "photo.jpg", "jpeg-bytes");

        let mut share = ShareData::new("t".into(), "b".into(), PostStatus::Draft);
        share
            .stage_attachments(&[photo.clone()], staging_root.path())
            .unwrap();

        assert!(share.has_media());
        assert_eq!(share.attachments().len(), 1);
        let (staged, meta) = share.attachments().iter().next().unwrap();
        assert!(staged.exists());
        assert_ne!(staged, &photo);
        assert_eq!(meta.filename, "photo.jpg");
        assert_eq!(meta.mime_type, "image/jpeg");

        // Original can disappear without affecting the staged copy.
        std::fs::remove_file(&photo).unwrap();
        assert!(staged.exists());
    }

    #[test]
    fn cleanup_removes_staging_dir() {
        let source_dir = TempDir::new().unwrap();
        let staging_root = TempDir::new().unwrap();
        let photo = write_file(source_dir.path(), "a.png", "png-bytes");

        let mut share = ShareData::new("t".into(), "b".into(), PostStatus::Publish);
        share
            .stage_attachments(&[photo], staging_root.path())
            .unwrap();
        let staged_dir = share.staging_dir().unwrap().to_path_buf();
        assert!(staged_dir.exists());

        share.cleanup_staging();
        assert!(!staged_dir.exists());
    }

    #[test]
    fn no_attachments_means_no_staging_dir() {
        let staging_root = TempDir::new().unwrap();
        let mut share = ShareData::new("t".into(), "b".into(), PostStatus::Draft);
        share.stage_attachments(&[], staging_root.path()).unwrap();
        assert!(!share.has_media());
        assert!(share.staging_dir().is_none());
        // Safe to call with nothing staged.
        share.cleanup_staging();
    }

    #[test]
    fn mime_types_follow_extension() {
        assert_eq!(mime_for_extension("a.PNG"), "image/png");
        assert_eq!(mime_for_extension("b.jpeg"), "image/jpeg");
        assert_eq!(mime_for_extension("c.bin"), "application/octet-stream");
    }
}
