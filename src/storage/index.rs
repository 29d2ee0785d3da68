//! Directory tree indexing for docshelf.
//!
//! Builds the flat, searchable listing of every file under the storage
//! root. Listings are recomputed on every request; nothing is cached, so
//! there is no staleness to manage.

use std::path::{Path, PathBuf};

use serde::Serialize;
use utoipa::ToSchema;
use walkdir::WalkDir;

use crate::{DocshelfError, Result};

use super::path::posix_relative;

/// One entry in a storage listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    /// File name without any directory portion.
    pub name: String,
    /// Slash-normalized path from the storage root. The external addressing
    /// key accepted back by the view endpoint.
    pub relative_path: String,
    /// Absolute URL of the view endpoint for this file.
    pub access_url: String,
}

/// Walks the storage root and produces [`FileRecord`] listings.
#[derive(Debug, Clone)]
pub struct TreeIndexer {
    /// Storage root the walk starts from.
    root: PathBuf,
    /// Base URL for access URLs, without a trailing slash.
    base_url: String,
}

impl TreeIndexer {
    /// Create an indexer over the given root, formatting access URLs
    /// against `base_url`.
    pub fn new(root: impl Into<PathBuf>, base_url: &str) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build the full recursive listing, optionally filtered by a
    /// case-insensitive substring match on the file name.
    ///
    /// Fails with `NotFound` if the root itself is missing and with `Io` if
    /// it exists but cannot be read. Unreadable entries below the root are
    /// skipped and logged, not escalated. Within one process run the order
    /// is deterministic: entries are visited name-sorted per directory,
    /// depth-first.
    pub fn index(&self, filter: Option<&str>) -> Result<Vec<FileRecord>> {
        if !self.root.exists() {
            return Err(DocshelfError::NotFound("root folder".to_string()));
        }

        let mut records = Vec::new();
        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    // Failing to read the root is fatal; anything deeper is
                    // skipped so one bad subtree cannot hide the rest.
                    if e.path() == Some(self.root.as_path()) {
                        return Err(DocshelfError::Io(e.into()));
                    }
                    tracing::warn!(error = %e, "skipping unreadable entry during indexing");
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let relative_path = match posix_relative(&self.root, entry.path()) {
                Some(p) => p,
                None => continue,
            };
            let name = entry.file_name().to_string_lossy().into_owned();
            let access_url = self.access_url(&relative_path);

            records.push(FileRecord {
                name,
                relative_path,
                access_url,
            });
        }

        if let Some(needle) = filter {
            if !needle.is_empty() {
                let needle = needle.to_lowercase();
                records.retain(|r| r.name.to_lowercase().contains(&needle));
            }
        }

        Ok(records)
    }

    /// The root this indexer walks.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Format the view-endpoint URL for a relative path, splitting it into
    /// its directory portion and file name, both percent-encoded.
    fn access_url(&self, relative_path: &str) -> String {
        let (folder, file) = match relative_path.rsplit_once('/') {
            Some((folder, file)) => (folder, file),
            None => ("", relative_path),
        };
        format!(
            "{}/api/files/view-pdf?folderPath={}&fileName={}",
            self.base_url,
            urlencoding::encode(folder),
            urlencoding::encode(file)
        )
    }
}
