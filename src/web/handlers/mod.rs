//! API handlers for the Web API.

pub mod files;

pub use files::*;
