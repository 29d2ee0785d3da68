//! Streaming file delivery for docshelf.
//!
//! Opens a resolved file and prepares everything a response needs before
//! the first byte: length, content type, and a safe inline disposition.
//! The bytes themselves are read incrementally by the web layer; whole-file
//! buffering is deliberately absent.

use std::io;

use tokio::fs::File;

use crate::{DocshelfError, Result};

use super::path::ResolvedPath;

/// An opened file ready to be streamed, with its response metadata.
#[derive(Debug)]
pub struct FileStream {
    /// Open handle the body will be read from.
    pub file: File,
    /// Total length in bytes.
    pub len: u64,
    /// Original file name, used in the disposition header.
    pub file_name: String,
    /// Content type guessed from the file extension.
    pub content_type: String,
}

impl FileStream {
    /// `Content-Disposition` value for inline rendering with the original
    /// file name quoted.
    pub fn content_disposition(&self) -> String {
        content_disposition_inline(&self.file_name)
    }
}

/// Opens resolved paths for streaming delivery.
#[derive(Debug, Clone, Default)]
pub struct FileStreamer;

impl FileStreamer {
    /// Create a new streamer.
    pub fn new() -> Self {
        Self
    }

    /// Open the file at `path` and capture its response metadata.
    ///
    /// Fails with `NotFound` if the path is absent or not a regular file.
    /// The existence check races with concurrent deletion; a file removed
    /// between check and open surfaces as the same `NotFound`.
    pub async fn open(&self, path: &ResolvedPath) -> Result<FileStream> {
        let metadata = match tokio::fs::metadata(path.as_path()).await {
            Ok(m) => m,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(DocshelfError::NotFound("file".to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        if !metadata.is_file() {
            return Err(DocshelfError::NotFound("file".to_string()));
        }

        let file = match File::open(path.as_path()).await {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(DocshelfError::NotFound("file".to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let file_name = path.file_name().unwrap_or("download").to_string();
        let content_type = mime_guess::from_path(path.as_path())
            .first_or_octet_stream()
            .to_string();

        Ok(FileStream {
            file,
            len: metadata.len(),
            file_name,
            content_type,
        })
    }
}

/// Generate a safe `Content-Disposition: inline` header value.
///
/// Control characters are removed so a crafted name cannot inject headers,
/// double quotes and backslashes are replaced in the quoted fallback, and
/// non-ASCII names get an RFC 5987 `filename*` parameter.
fn content_disposition_inline(filename: &str) -> String {
    let sanitized: String = filename
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| match c {
            '"' => '_',
            '\\' => '_',
            _ => c,
        })
        .collect();

    if filename.is_ascii()
        && !filename
            .chars()
            .any(|c| c.is_control() || c == '"' || c == '\\')
    {
        return format!("inline; filename=\"{}\"", filename);
    }

    let encoded = urlencoding::encode(filename);

    format!(
        "inline; filename=\"{}\"; filename*=UTF-8''{}",
        sanitized, encoded
    )
}
