//! Response DTOs for the Web API.

use serde::Serialize;
use utoipa::ToSchema;

// ============================================================================
// Generic Response Wrappers
// ============================================================================

/// Generic API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new API response.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

// ============================================================================
// File DTOs
// ============================================================================

/// Upload result.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Stored file name.
    pub name: String,
    /// Slash-normalized path of the stored file relative to the root.
    pub relative_path: String,
    /// Stored size in bytes.
    pub size: u64,
}
