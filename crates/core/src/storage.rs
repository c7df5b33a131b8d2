//! Content bucket for uploaded images.
//!
//! Admin updates may attach an image. The image is written to a named
//! bucket under `<purpose>-images/<entity>-<timestamp>.<ext>` (overwrite
//! allowed) and the derived public URL is merged into the entity patch.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use crate::types::Timestamp;

/// Image extensions accepted for upload.
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif", "avif"];

/// `Cache-Control: max-age` applied when serving bucket objects.
pub const CACHE_CONTROL_SECS: u64 = 3600;

/// Maximum accepted image size (10 MiB).
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Unsupported image type '.{0}'")]
    UnsupportedExtension(String),

    #[error("Uploaded file is empty")]
    Empty,

    #[error("Uploaded file exceeds the 10 MiB limit")]
    TooLarge,

    #[error("Object already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid object path: {0}")]
    InvalidPath(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Upload types
// ---------------------------------------------------------------------------

/// Where an uploaded image belongs, e.g. purpose `hero`, entity `eye-care`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageTarget {
    pub purpose: String,
    pub entity: String,
}

impl ImageTarget {
    pub fn new(purpose: impl Into<String>, entity: impl Into<String>) -> Self {
        Self {
            purpose: purpose.into(),
            entity: entity.into(),
        }
    }
}

/// A file received from an admin form.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Lower-cased extension of the original file name, validated against
    /// [`ALLOWED_IMAGE_EXTENSIONS`].
    pub fn extension(&self) -> Result<String, StorageError> {
        let ext = Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Ok(ext)
        } else {
            Err(StorageError::UnsupportedExtension(ext))
        }
    }

    /// Check size limits and extension; returns the extension.
    pub fn validate(&self) -> Result<String, StorageError> {
        if self.bytes.is_empty() {
            return Err(StorageError::Empty);
        }
        if self.bytes.len() > MAX_IMAGE_BYTES {
            return Err(StorageError::TooLarge);
        }
        self.extension()
    }
}

/// Per-object write options.
#[derive(Debug, Clone)]
pub struct UploadOptions {
    pub content_type: Option<String>,
    /// Overwrite an existing object at the same path.
    pub upsert: bool,
}

/// Build the bucket-relative object path for an image.
///
/// The timestamp (milliseconds) keeps names unique per entity.
pub fn object_path(target: &ImageTarget, ext: &str, now: Timestamp) -> String {
    format!(
        "{}-images/{}-{}.{}",
        slug(&target.purpose),
        slug(&target.entity),
        now.timestamp_millis(),
        ext
    )
}

/// Keep `[a-z0-9-]`, fold everything else to `-`.
fn slug(raw: &str) -> String {
    let folded: String = raw
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    let trimmed = folded.trim_matches('-');
    if trimmed.is_empty() {
        "item".to_string()
    } else {
        trimmed.to_string()
    }
}

// ---------------------------------------------------------------------------
// Bucket trait
// ---------------------------------------------------------------------------

#[async_trait]
pub trait ContentBucket: Send + Sync {
    /// Write `bytes` at the bucket-relative `path`.
    async fn put(&self, path: &str, bytes: &[u8], options: &UploadOptions)
        -> Result<(), StorageError>;

    /// Public URL for a bucket-relative path.
    fn public_url(&self, path: &str) -> String;
}

/// Validate and upload an image, returning its public URL.
pub async fn store_image(
    bucket: &dyn ContentBucket,
    target: &ImageTarget,
    upload: &ImageUpload,
    now: Timestamp,
) -> Result<String, StorageError> {
    let ext = upload.validate()?;
    let path = object_path(target, &ext, now);
    let options = UploadOptions {
        content_type: upload.content_type.clone(),
        upsert: true,
    };
    bucket.put(&path, &upload.bytes, &options).await?;
    tracing::info!(path = %path, size = upload.bytes.len(), "Image uploaded");
    Ok(bucket.public_url(&path))
}

// ---------------------------------------------------------------------------
// Local filesystem bucket
// ---------------------------------------------------------------------------

/// Bucket backed by a directory, served over HTTP by the API.
#[derive(Debug, Clone)]
pub struct LocalBucket {
    root: PathBuf,
    public_base_url: String,
}

impl LocalBucket {
    /// `root` is the bucket directory; `public_base_url` is the URL prefix
    /// under which its contents are served (no trailing slash needed).
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(path);
        let safe = !path.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !safe {
            return Err(StorageError::InvalidPath(path.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ContentBucket for LocalBucket {
    async fn put(
        &self,
        path: &str,
        bytes: &[u8],
        options: &UploadOptions,
    ) -> Result<(), StorageError> {
        let full = self.resolve(path)?;
        if !options.upsert && tokio::fs::try_exists(&full).await? {
            return Err(StorageError::AlreadyExists(path.to_string()));
        }
        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&full, bytes).await?;
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/{}", self.public_base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::TimeZone;

    fn upload(name: &str, bytes: &[u8]) -> ImageUpload {
        ImageUpload {
            file_name: name.to_string(),
            content_type: Some("image/png".to_string()),
            bytes: bytes.to_vec(),
        }
    }

    #[test]
    fn object_path_follows_purpose_entity_timestamp_pattern() {
        let now = chrono::Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let target = ImageTarget::new("hero", "Eye Care");
        assert_eq!(
            object_path(&target, "png", now),
            format!("hero-images/eye-care-{}.png", now.timestamp_millis())
        );
    }

    #[test]
    fn extension_is_case_insensitive() {
        assert_eq!(upload("Photo.JPG", b"x").extension().unwrap(), "jpg");
    }

    #[test]
    fn unsupported_extension_rejected() {
        assert_matches!(
            upload("notes.pdf", b"x").extension(),
            Err(StorageError::UnsupportedExtension(ext)) if ext == "pdf"
        );
    }

    #[test]
    fn empty_upload_rejected() {
        assert_matches!(upload("a.png", b"").validate(), Err(StorageError::Empty));
    }

    #[test]
    fn parent_components_are_rejected() {
        let bucket = LocalBucket::new("/tmp/bucket", "http://x/storage/content");
        assert_matches!(bucket.resolve("../etc/passwd"), Err(StorageError::InvalidPath(_)));
        assert_matches!(bucket.resolve("/abs"), Err(StorageError::InvalidPath(_)));
    }

    #[test]
    fn public_url_joins_without_double_slash() {
        let bucket = LocalBucket::new("/tmp/bucket", "http://x/storage/content/");
        assert_eq!(
            bucket.public_url("hero-images/a.png"),
            "http://x/storage/content/hero-images/a.png"
        );
    }

    #[tokio::test]
    async fn store_image_writes_file_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let bucket = LocalBucket::new(dir.path(), "http://x/storage/content");
        let target = ImageTarget::new("doctor", "dr-rao");
        let now = chrono::Utc::now();

        let url = store_image(&bucket, &target, &upload("a.webp", b"one"), now)
            .await
            .unwrap();
        // Same timestamp -> same path; upsert must allow the second write.
        let again = store_image(&bucket, &target, &upload("a.webp", b"two"), now)
            .await
            .unwrap();
        assert_eq!(url, again);

        let path = dir.path().join(object_path(&target, "webp", now));
        assert_eq!(std::fs::read(path).unwrap(), b"two");
    }

    #[tokio::test]
    async fn put_without_upsert_refuses_existing_object() {
        let dir = tempfile::tempdir().unwrap();
        let bucket = LocalBucket::new(dir.path(), "http://x");
        let options = UploadOptions {
            content_type: None,
            upsert: false,
        };
        bucket.put("a/b.png", b"1", &options).await.unwrap();
        assert_matches!(
            bucket.put("a/b.png", b"2", &options).await,
            Err(StorageError::AlreadyExists(_))
        );
    }
}
