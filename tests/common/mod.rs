//! Test helpers for the docshelf API tests.
//!
//! Builds an in-process test server over a temporary storage root.

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::sync::Arc;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::{TestResponse, TestServer};
use tempfile::TempDir;

use docshelf::config::StorageConfig;
use docshelf::web::handlers::AppState;
use docshelf::web::router::create_router;

/// Base URL used for access URLs in test listings.
pub const TEST_BASE_URL: &str = "http://testhost:8080";

/// Create a storage configuration rooted at `root`.
pub fn create_test_storage_config(root: &Path, max_upload_size_mb: u64) -> StorageConfig {
    StorageConfig {
        root_path: root.display().to_string(),
        max_upload_size_mb,
        public_base_url: TEST_BASE_URL.to_string(),
    }
}

/// Create a test server over a fresh temporary storage root.
pub fn create_test_server() -> (TestServer, TempDir) {
    create_test_server_with_limit(10)
}

/// Create a test server with a specific upload limit in megabytes.
pub fn create_test_server_with_limit(max_upload_size_mb: u64) -> (TestServer, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp storage root");
    let config = create_test_storage_config(temp_dir.path(), max_upload_size_mb);

    let app_state = Arc::new(AppState::new(&config).expect("Failed to create app state"));
    let router = create_router(app_state, &[]);
    let server = TestServer::new(router).expect("Failed to create test server");

    (server, temp_dir)
}

/// Create a test server whose storage root does not exist on disk.
pub fn create_test_server_without_root() -> (TestServer, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let missing_root = temp_dir.path().join("never-created");
    let config = create_test_storage_config(&missing_root, 10);

    let app_state = Arc::new(AppState::new(&config).expect("Failed to create app state"));
    let router = create_router(app_state, &[]);
    let server = TestServer::new(router).expect("Failed to create test server");

    (server, temp_dir)
}

/// Write a fixture file directly into the storage root.
pub fn write_fixture(root: &Path, relative_path: &str, content: &[u8]) {
    let path = root.join(relative_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create fixture directories");
    }
    fs::write(path, content).expect("Failed to write fixture file");
}

/// Upload a file through the API.
pub async fn upload(
    server: &TestServer,
    folder_path: &str,
    file_name: &str,
    content: &[u8],
) -> TestResponse {
    let form = MultipartForm::new()
        .add_text("folderPath", folder_path)
        .add_part(
            "file",
            Part::bytes(content.to_vec()).file_name(file_name),
        );

    server.post("/api/files/upload-file").multipart(form).await
}
