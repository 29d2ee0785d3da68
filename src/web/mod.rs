//! Web API module for docshelf.
//!
//! The HTTP surface over the storage core: routing, extraction, and
//! response encoding. All path, traversal, and streaming decisions live in
//! [`crate::storage`].

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::create_router;
pub use server::WebServer;
