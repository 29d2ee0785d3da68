//! Upload persistence for docshelf.
//!
//! Sanitizes the destination folder through the path resolver, creates the
//! directory chain, and writes the file under its original name. A name
//! collision overwrites the existing file; last writer wins.

use crate::Result;

use super::path::PathResolver;

/// Result of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Slash-normalized path of the stored file relative to the root.
    pub relative_path: String,
    /// Stored size in bytes.
    pub size: u64,
}

/// Persists uploaded files under the storage root.
#[derive(Debug, Clone)]
pub struct UploadReceiver {
    resolver: PathResolver,
}

impl UploadReceiver {
    /// Create a receiver that resolves destinations with `resolver`.
    pub fn new(resolver: PathResolver) -> Self {
        Self { resolver }
    }

    /// Store `content` as `file_name` inside `folder` (empty folder means
    /// the root itself), creating intermediate directories as needed.
    ///
    /// The folder identifier and file name go through the same strict
    /// sanitization as read paths; a traversal-shaped destination fails with
    /// `InvalidPath` before anything touches disk. The payload size limit is
    /// enforced by the web layer before this runs.
    pub async fn store(&self, folder: &str, file_name: &str, content: &[u8]) -> Result<StoredFile> {
        let dir = self.resolver.resolve_folder(folder)?;
        let dest = self.resolver.resolve_relative(folder, file_name)?;

        tokio::fs::create_dir_all(dir.as_path()).await?;
        tokio::fs::write(dest.as_path(), content).await?;

        Ok(StoredFile {
            relative_path: self.resolver.relative_path(&dest),
            size: content.len() as u64,
        })
    }
}
