//! File handlers for the Web API.

use axum::{
    body::Body,
    extract::{Multipart, Query, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use futures::TryStreamExt;
use std::sync::Arc;
use tokio_util::io::ReaderStream;

use crate::config::StorageConfig;
use crate::storage::{
    FileRecord, FileStreamer, PathResolver, ResolvedPath, TreeIndexer, UploadReceiver,
    STREAM_BUFFER_SIZE,
};
use crate::web::dto::{ApiResponse, ListFilesQuery, UploadResponse, ViewFileQuery, ViewerQuery};
use crate::web::error::ApiError;
use crate::DocshelfError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Path resolver for the storage root.
    pub resolver: PathResolver,
    /// Listing builder.
    pub indexer: TreeIndexer,
    /// Streaming opener.
    pub streamer: FileStreamer,
    /// Upload persistence.
    pub receiver: UploadReceiver,
    /// Maximum accepted upload size in bytes.
    pub max_upload_size: u64,
}

impl AppState {
    /// Build the shared state from storage configuration.
    pub fn new(config: &StorageConfig) -> crate::Result<Self> {
        let resolver = PathResolver::new(&config.root_path)?;
        let indexer = TreeIndexer::new(resolver.root(), &config.public_base_url);
        let receiver = UploadReceiver::new(resolver.clone());

        Ok(Self {
            resolver,
            indexer,
            streamer: FileStreamer::new(),
            receiver,
            max_upload_size: config.max_upload_size_bytes(),
        })
    }
}

/// Map a multipart read failure to an API error.
///
/// Body-limit overruns surface here once the configured cap is hit, before
/// any byte reaches disk.
fn multipart_error(err: axum::extract::multipart::MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::payload_too_large("Upload exceeds the configured size limit")
    } else {
        ApiError::bad_request(format!("Invalid multipart request: {}", err))
    }
}

/// POST /api/files/upload-file - Store an uploaded file.
#[utoipa::path(
    post,
    path = "/api/files/upload-file",
    tag = "files",
    request_body(content = Vec<u8>, content_type = "multipart/form-data", description = "A `file` part and an optional `folderPath` text field"),
    responses(
        (status = 200, description = "File stored", body = UploadResponse),
        (status = 400, description = "Missing file part or invalid destination"),
        (status = 413, description = "Payload exceeds the configured limit")
    )
)]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<UploadResponse>>, ApiError> {
    let mut folder_path = String::new();
    let mut file_name: Option<String> = None;
    let mut content: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        match field.name().unwrap_or("") {
            "file" => {
                file_name = field.file_name().map(|s| s.to_string());
                let bytes = field.bytes().await.map_err(multipart_error)?;
                content = Some(bytes.to_vec());
            }
            "folderPath" => {
                folder_path = field.text().await.map_err(multipart_error)?;
            }
            _ => {}
        }
    }

    let file_name = file_name.ok_or_else(|| ApiError::bad_request("No file provided"))?;
    let content = content.ok_or_else(|| ApiError::bad_request("No file provided"))?;

    if content.len() as u64 > state.max_upload_size {
        return Err(DocshelfError::PayloadTooLarge(state.max_upload_size).into());
    }

    let stored = state
        .receiver
        .store(&folder_path, &file_name, &content)
        .await?;

    tracing::info!(
        path = %stored.relative_path,
        size = stored.size,
        "stored uploaded file"
    );

    Ok(Json(ApiResponse::new(UploadResponse {
        name: file_name,
        relative_path: stored.relative_path,
        size: stored.size,
    })))
}

/// GET /api/files/list-all-files - Recursive listing of the storage tree.
#[utoipa::path(
    get,
    path = "/api/files/list-all-files",
    tag = "files",
    params(ListFilesQuery),
    responses(
        (status = 200, description = "Flat listing of every stored file", body = Vec<FileRecord>),
        (status = 404, description = "Storage root does not exist"),
        (status = 500, description = "Listing failed")
    )
)]
pub async fn list_all_files(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListFilesQuery>,
) -> Result<Json<ApiResponse<Vec<FileRecord>>>, ApiError> {
    let indexer = state.indexer.clone();
    let search = query.search;

    // The walk is blocking filesystem work; keep it off the async workers.
    let records = tokio::task::spawn_blocking(move || indexer.index(search.as_deref()))
        .await
        .map_err(|e| {
            tracing::error!("Listing task failed: {}", e);
            ApiError::internal("Error retrieving file list")
        })?
        .map_err(|e| match e {
            DocshelfError::NotFound(_) => ApiError::not_found("Root folder not found"),
            e => {
                tracing::error!("Failed to list files: {}", e);
                ApiError::internal("Error retrieving file list")
            }
        })?;

    Ok(Json(ApiResponse::new(records)))
}

/// GET /api/files/view-pdf - Stream a file addressed by relative path.
#[utoipa::path(
    get,
    path = "/api/files/view-pdf",
    tag = "files",
    params(ViewFileQuery),
    responses(
        (status = 200, description = "File content streamed inline"),
        (status = 400, description = "Missing or invalid parameters"),
        (status = 404, description = "File not found")
    )
)]
pub async fn view_pdf(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ViewFileQuery>,
) -> Result<Response, ApiError> {
    let (folder_path, file_name) = match (query.folder_path, query.file_name) {
        (Some(folder), Some(file)) if !file.is_empty() => (folder, file),
        _ => {
            return Err(ApiError::bad_request(
                "Folder and file parameters are required",
            ))
        }
    };

    let path = state.resolver.resolve_relative(&folder_path, &file_name)?;
    stream_response(&state, &path).await
}

/// GET /api/files/pdf-viewer - Stream a file addressed by discrete segments.
#[utoipa::path(
    get,
    path = "/api/files/pdf-viewer",
    tag = "files",
    params(ViewerQuery),
    responses(
        (status = 200, description = "File content streamed inline"),
        (status = 400, description = "Missing or invalid parameters"),
        (status = 404, description = "File not found")
    )
)]
pub async fn pdf_viewer(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ViewerQuery>,
) -> Result<Response, ApiError> {
    let (folder, file) = match (query.folder, query.file) {
        (Some(folder), Some(file)) if !folder.is_empty() && !file.is_empty() => (folder, file),
        _ => {
            return Err(ApiError::bad_request(
                "Folder and file parameters are required",
            ))
        }
    };

    let mut segments = vec![folder.as_str()];
    if let Some(subfolder) = query.subfolder.as_deref() {
        if !subfolder.is_empty() {
            segments.push(subfolder);
        }
    }
    segments.push(file.as_str());

    let path = state.resolver.resolve(&segments)?;
    stream_response(&state, &path).await
}

/// Build the streaming response for a resolved file.
///
/// All response metadata is set before the first body byte. A read failure
/// mid-stream is terminal for the response; whatever was already flushed
/// stands.
async fn stream_response(state: &AppState, path: &ResolvedPath) -> Result<Response, ApiError> {
    let stream = state.streamer.open(path).await.map_err(|e| match e {
        DocshelfError::NotFound(_) => ApiError::not_found("File not found"),
        e => {
            tracing::error!("Failed to open file for streaming: {}", e);
            ApiError::internal("Internal server error")
        }
    })?;

    let content_disposition = stream.content_disposition();
    let reader = ReaderStream::with_capacity(stream.file, STREAM_BUFFER_SIZE);
    let body = Body::from_stream(reader.inspect_err(|e| {
        tracing::error!("I/O error while streaming file: {}", e);
    }));

    Response::builder()
        .header(header::CONTENT_TYPE, stream.content_type)
        .header(header::CONTENT_LENGTH, stream.len)
        .header(header::CONTENT_DISPOSITION, content_disposition)
        .header(header::X_CONTENT_TYPE_OPTIONS, "nosniff")
        .body(body)
        .map_err(|e| {
            tracing::error!("Failed to build streaming response: {}", e);
            ApiError::internal("Internal server error")
        })
}
