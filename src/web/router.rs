//! Router configuration for the Web API.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::storage::FileRecord;
use crate::web::dto::UploadResponse;

use super::handlers::{list_all_files, pdf_viewer, upload_file, view_pdf, AppState};
use super::middleware::create_cors_layer;

/// Extra room on top of the upload limit for multipart framing.
const UPLOAD_BODY_SLACK: usize = 64 * 1024;

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let upload_limit = app_state.max_upload_size as usize + UPLOAD_BODY_SLACK;

    let file_routes = Router::new()
        .route(
            "/upload-file",
            post(upload_file).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/list-all-files", get(list_all_files))
        .route("/view-pdf", get(view_pdf))
        .route("/pdf-viewer", get(pdf_viewer));

    let api_routes = Router::new().nest("/files", file_routes);

    Router::new()
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins)),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

/// OpenAPI documentation for the file API.
#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::files::upload_file,
        super::handlers::files::list_all_files,
        super::handlers::files::view_pdf,
        super::handlers::files::pdf_viewer,
    ),
    components(schemas(FileRecord, UploadResponse)),
    tags(
        (name = "files", description = "File storage operations")
    )
)]
struct ApiDoc;

/// Create the Swagger UI router.
pub fn create_swagger_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
