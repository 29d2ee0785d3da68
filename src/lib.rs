//! docshelf - a small file-storage service.
//!
//! Accepts uploaded files into a server-managed directory tree, builds a
//! searchable index of that tree on demand, and streams individual files
//! back to clients by logical path.

pub mod config;
pub mod error;
pub mod logging;
pub mod storage;
pub mod web;

pub use config::Config;
pub use error::{DocshelfError, Result};
pub use storage::{
    FileRecord, FileStream, FileStreamer, PathResolver, ResolvedPath, StoredFile, TreeIndexer,
    UploadReceiver,
};
pub use web::WebServer;
