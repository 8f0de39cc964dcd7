use crate::catalog;
use crate::config::Config;
use crate::db_storage::{LeadStorage, LEAD_COLLECTION};
use crate::diagnostics::StoreProbe;
use crate::errors::{AppError, PersistenceError};
use crate::models::*;
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use std::sync::Arc;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Lead persistence; `None` when no store could be configured at startup.
    pub storage: Option<LeadStorage>,
}

/// GET /
///
/// Root status message.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service is running", body = MessageResponse))
)]
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse::new("Video Editing Courses Backend Running"))
}

/// GET /api/hello
#[utoipa::path(
    get,
    path = "/api/hello",
    responses((status = 200, description = "Greeting", body = MessageResponse))
)]
pub async fn hello() -> Json<MessageResponse> {
    Json(MessageResponse::new("Hello from the backend API!"))
}

/// GET /test
///
/// Reports whether the document store is configured and answering. Store
/// failures are folded into the body; this endpoint always returns 200.
///
/// # Arguments
///
/// * `state` - The application state.
///
/// # Returns
///
/// * `Json<DiagnosticsResponse>` - Backend status, store status and up to ten collection names.
#[utoipa::path(
    get,
    path = "/test",
    responses((status = 200, description = "Store diagnostics", body = DiagnosticsResponse))
)]
pub async fn test_database(State(state): State<Arc<AppState>>) -> Json<DiagnosticsResponse> {
    let probe = StoreProbe::run(state.storage.as_ref(), &state.config).await;
    tracing::info!("GET /test - connection: {}", probe.connection_status());
    Json(probe.into_response(&state.config))
}

/// GET /api/courses
///
/// Returns the course catalog in its fixed order.
#[utoipa::path(
    get,
    path = "/api/courses",
    responses((status = 200, description = "Course catalog", body = [Course]))
)]
pub async fn list_courses() -> Json<Vec<Course>> {
    Json(catalog::list_courses().to_vec())
}

/// POST /api/lead
///
/// Validates a lead submission and stores it in the `lead` collection.
/// Repeated identical submissions create separate documents.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `payload` - The lead form body, or the reason it could not be parsed.
///
/// # Returns
///
/// * `Result<Json<LeadResponse>, AppError>` - The stored document id, or a `{"detail": ...}` error.
#[utoipa::path(
    post,
    path = "/api/lead",
    request_body = LeadRequest,
    responses(
        (status = 200, description = "Lead stored", body = LeadResponse),
        (status = 422, description = "Missing or empty required field", body = ErrorBody),
        (status = 500, description = "Lead could not be stored", body = ErrorBody)
    )
)]
pub async fn create_lead(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LeadRequest>, JsonRejection>,
) -> Result<Json<LeadResponse>, AppError> {
    let Json(payload) = payload?;
    let lead = Lead::try_from(payload)?;

    match lead.course_id.as_deref() {
        Some(course_id) if catalog::find_course(course_id).is_none() => {
            tracing::info!("POST /api/lead - course_id '{}' is not in the catalog", course_id);
        }
        Some(course_id) => tracing::info!("POST /api/lead - course_id: {}", course_id),
        None => tracing::info!("POST /api/lead - no course selected"),
    }

    let storage = state
        .storage
        .as_ref()
        .ok_or(PersistenceError::Unconfigured)?;
    let id = storage.insert(LEAD_COLLECTION, lead).await?;

    tracing::info!("Lead stored with id {}", id);
    Ok(Json(LeadResponse::ok(id)))
}
