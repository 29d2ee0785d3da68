//! File storage core for docshelf.
//!
//! This module contains the four services the HTTP surface is built on:
//! - Path resolution confined to the storage root ([`PathResolver`])
//! - Recursive tree indexing into flat listings ([`TreeIndexer`])
//! - Streaming file delivery ([`FileStreamer`])
//! - Upload persistence ([`UploadReceiver`])
//!
//! All physical I/O goes through [`ResolvedPath`], which only
//! [`PathResolver`] can mint.

mod index;
mod path;
mod stream;
mod upload;

pub use index::{FileRecord, TreeIndexer};
pub use path::{PathResolver, ResolvedPath};
pub use stream::{FileStream, FileStreamer};
pub use upload::{StoredFile, UploadReceiver};

/// Read buffer size for streamed downloads.
pub const STREAM_BUFFER_SIZE: usize = 64 * 1024;
