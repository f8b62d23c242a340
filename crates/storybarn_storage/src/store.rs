//! Filesystem-backed image byte storage.
//!
//! Image bytes live under per-book subdirectories of one upload root:
//! `{base}/{book_id}/{uuid}.{ext}`. Records elsewhere reference the
//! relative path, which is also what the static `/uploads` route serves.

use std::path::{Component, Path, PathBuf};
use storybarn_error::{StorageError, StorageErrorKind, StorybarnResult};
use uuid::Uuid;

/// Filesystem storage for uploaded and generated images.
///
/// Every stored file gets a fresh random filename; writes go through a temp
/// file and rename so a crashed write never leaves a half-written image at
/// a served path.
#[derive(Debug, Clone)]
pub struct ImageStore {
    base_path: PathBuf,
}

impl ImageStore {
    /// Create a store rooted at `base_path`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or accessed.
    #[tracing::instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> StorybarnResult<Self> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        tracing::info!(path = %base_path.display(), "Opened image store");
        Ok(Self { base_path })
    }

    /// The upload root this store serves from.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Sanitize a book id into a single path segment.
    fn book_dir(&self, book_id: &str) -> StorybarnResult<PathBuf> {
        let trimmed = book_id.trim();
        if trimmed.is_empty()
            || trimmed
                .chars()
                .any(|c| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
        {
            return Err(StorageError::new(StorageErrorKind::InvalidPath(format!(
                "book id {:?} is not a valid directory name",
                book_id
            )))
            .into());
        }
        Ok(self.base_path.join(trimmed))
    }

    /// Resolve a relative path under the base, rejecting traversal.
    fn resolve(&self, relative: &str) -> StorybarnResult<PathBuf> {
        let rel = Path::new(relative);
        let escapes = rel.components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
        if escapes {
            return Err(StorageError::new(StorageErrorKind::InvalidPath(format!(
                "path {:?} escapes the upload root",
                relative
            )))
            .into());
        }
        Ok(self.base_path.join(rel))
    }

    /// Store image bytes under a fresh random filename in the book's
    /// directory; returns the relative path for the record.
    #[tracing::instrument(skip(self, data), fields(book_id = %book_id, size = data.len()))]
    pub async fn store(
        &self,
        book_id: &str,
        data: &[u8],
        extension: &str,
    ) -> StorybarnResult<String> {
        let dir = self.book_dir(book_id)?;

        tokio::fs::create_dir_all(&dir).await.map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                dir.display(),
                e
            )))
        })?;

        let filename = format!("{}.{}", Uuid::new_v4(), extension);
        let path = dir.join(&filename);

        // Temp file + rename keeps the final path all-or-nothing.
        let temp_path = path.with_extension("tmp");
        tokio::fs::write(&temp_path, data).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, &path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;

        let relative = format!("{}/{}", book_id.trim(), filename);
        tracing::info!(path = %relative, size = data.len(), "Stored image file");
        Ok(relative)
    }

    /// Read the bytes at a relative path.
    ///
    /// A missing file yields [`StorageErrorKind::FileMissing`], which the
    /// HTTP layer reports distinctly from a missing record.
    #[tracing::instrument(skip(self), fields(path = %relative))]
    pub async fn read(&self, relative: &str) -> StorybarnResult<Vec<u8>> {
        let path = self.resolve(relative)?;

        tokio::fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::new(StorageErrorKind::FileMissing(relative.to_string())).into()
            } else {
                StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
                .into()
            }
        })
    }

    /// Check whether a relative path exists under the upload root.
    pub async fn exists(&self, relative: &str) -> StorybarnResult<bool> {
        let path = self.resolve(relative)?;
        Ok(tokio::fs::try_exists(&path).await.unwrap_or(false))
    }
}
