use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::AppError;

// ============ Catalog Models ============

/// A static catalog entry describing an offered course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Course {
    /// Short stable identifier, unique within the catalog.
    pub id: String,
    pub title: String,
    pub subtitle: String,
    /// Non-negative price.
    pub price: f64,
    /// Ordered list of selling points.
    pub features: Vec<String>,
    /// Skill tier shown to visitors.
    pub level: String,
    pub duration_weeks: u32,
    /// Optional image reference; serialized as `null` when absent.
    pub image: Option<String>,
}

// ============ Lead Models ============

/// Lead submission body as posted by the landing page form.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LeadRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub course_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A validated lead, ready to hand to the persistence layer.
///
/// Has no identity until the document store assigns one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub course_id: Option<String>,
    pub message: Option<String>,
}

impl TryFrom<LeadRequest> for Lead {
    type Error = AppError;

    /// Applies the field presence rules.
    ///
    /// `name` must contain something other than whitespace. `email` and
    /// `course_id` are accepted as given.
    fn try_from(req: LeadRequest) -> Result<Self, Self::Error> {
        if req.name.trim().is_empty() {
            return Err(AppError::Validation("Field 'name' must not be empty".to_string()));
        }

        Ok(Self {
            name: req.name,
            email: req.email,
            phone: req.phone,
            course_id: req.course_id,
            message: req.message,
        })
    }
}

/// Lead as written to the document store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadDocument {
    #[serde(flatten)]
    pub lead: Lead,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LeadDocument {
    pub fn stamped(lead: Lead, now: DateTime<Utc>) -> Self {
        Self {
            lead,
            created_at: now,
            updated_at: now,
        }
    }
}

// ============ Response Models ============

/// Response for a successfully stored lead.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LeadResponse {
    /// Always `"ok"`.
    pub status: String,
    /// Store-assigned document identifier.
    pub id: String,
}

impl LeadResponse {
    pub fn ok(id: String) -> Self {
        Self {
            status: "ok".to_string(),
            id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body of the `/test` diagnostic endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DiagnosticsResponse {
    pub backend: String,
    pub database: String,
    /// Whether `DATABASE_URL` is set. Never the value itself.
    pub database_url: String,
    /// Whether `DATABASE_NAME` is set. Never the value itself.
    pub database_name: String,
    pub connection_status: String,
    /// Up to ten collection names.
    pub collections: Vec<String>,
}

/// Error envelope returned by failing endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub detail: String,
}
