//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

// ============================================================================
// Common Response Types
// ============================================================================

/// Generic message response
#[derive(Debug, Serialize)]
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

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// Readiness check response with dependency health
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub database: bool,
}

impl ReadinessResponse {
    pub fn ready(database: bool) -> Self {
        Self {
            status: if database { "ready" } else { "degraded" },
            database,
        }
    }
}

// ============================================================================
// User Responses
// ============================================================================

/// Authenticated user profile returned to the frontend
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub github_username: String,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub is_admin: bool,
}

// ============================================================================
// Survey Responses
// ============================================================================

/// Full survey detail returned to its owner
#[derive(Debug, Clone, Serialize)]
pub struct SurveyDetail {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub config: Value,
    pub created_by: Uuid,
    pub opens_at: Option<DateTime<Utc>>,
    pub closes_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Survey list entry for the owner dashboard (no config blob)
#[derive(Debug, Clone, Serialize)]
pub struct SurveyListItem {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub opens_at: Option<DateTime<Utc>>,
    pub closes_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub response_count: i64,
}

/// Survey view for respondents (public, no ownership fields)
#[derive(Debug, Clone, Serialize)]
pub struct PublicSurveyResponse {
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub config: Value,
    pub opens_at: Option<DateTime<Utc>>,
    pub closes_at: Option<DateTime<Utc>>,
    /// Whether the survey is currently accepting responses
    pub is_open: bool,
}

// ============================================================================
// Response Responses
// ============================================================================

/// Full response row returned to the respondent after a save
#[derive(Debug, Clone, Serialize)]
pub struct ResponseRecord {
    pub id: Uuid,
    pub survey_id: Uuid,
    pub user_id: Uuid,
    pub answers: Map<String, Value>,
    pub is_draft: bool,
    pub submitted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Response list entry for the admin view, with respondent identity
#[derive(Debug, Clone, Serialize)]
pub struct ResponseListItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub github_username: String,
    pub answers: Map<String, Value>,
    pub is_draft: bool,
    pub submitted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The caller's own response to a survey
#[derive(Debug, Clone, Serialize)]
pub struct MyResponse {
    pub answers: Map<String, Value>,
    pub is_draft: bool,
    pub submitted_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}
