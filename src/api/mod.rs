//! HTTP surface: route table, middleware and API documentation.

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

use crate::handlers::{self, AppState};
use crate::models::{
    Course, DiagnosticsResponse, ErrorBody, LeadRequest, LeadResponse, MessageResponse,
};

/// Largest accepted request body. Lead forms are a few hundred bytes.
///
/// Enforced by the JSON extractor, so an oversized body is rejected with the
/// usual `{"detail": ...}` envelope.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(OpenApi)]
#[openapi(
    info(title = "Video Editing Courses API"),
    paths(
        handlers::root,
        handlers::hello,
        handlers::test_database,
        handlers::list_courses,
        handlers::create_lead
    ),
    components(schemas(
        Course,
        LeadRequest,
        LeadResponse,
        MessageResponse,
        DiagnosticsResponse,
        ErrorBody
    ))
)]
pub struct ApiDoc;

/// Serves the generated OpenAPI document.
async fn serve_openapi_spec() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

const DOCS_PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>Video Editing Courses API</title>
<link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
</head>
<body>
<div id="docs"></div>
<script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
<script>
SwaggerUIBundle({ url: "/openapi.json", dom_id: "#docs" });
</script>
</body>
</html>
"##;

/// Interactive API docs; Swagger UI assets come from a CDN.
async fn serve_swagger_ui() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(axum::http::header::CONTENT_TYPE, "text/html; charset=utf-8")],
        DOCS_PAGE,
    )
}

/// Builds the full application router.
///
/// CORS mirrors the caller's origin and allows credentials, any method and
/// any header.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // API Documentation
        .route("/docs", get(serve_swagger_ui))
        .route("/openapi.json", get(serve_openapi_spec))
        // Status endpoints
        .route("/", get(handlers::root))
        .route("/api/hello", get(handlers::hello))
        .route("/test", get(handlers::test_database))
        // Landing page endpoints
        .route("/api/courses", get(handlers::list_courses))
        .route("/api/lead", post(handlers::create_lead))
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
}
