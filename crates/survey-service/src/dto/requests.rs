//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize`, and `Validate` where input
//! constraints apply. Patch requests use double-`Option` fields so an
//! omitted field (leave untouched) is distinguishable from an explicit
//! `null` (clear the value).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use validator::Validate;

/// Deserialize helper for patch fields: a present value (including `null`)
/// becomes `Some(...)`, while serde's `default` keeps omitted fields `None`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn default_config() -> Value {
    Value::Object(Map::new())
}

fn default_is_draft() -> bool {
    true
}

// ============================================================================
// Survey Requests
// ============================================================================

/// Create survey request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSurveyRequest {
    #[validate(length(min = 1, max = 500, message = "Title must be 1-500 characters"))]
    pub title: String,

    pub description: Option<String>,

    /// Full survey JSON configuration (question definitions)
    #[serde(default = "default_config")]
    pub config: Value,

    pub opens_at: Option<DateTime<Utc>>,
    pub closes_at: Option<DateTime<Utc>>,
}

/// Update survey metadata request (PATCH semantics)
///
/// Outer `None` means the field was omitted; inner `None` means it was
/// explicitly set to `null`. Title cannot be cleared, and the slug never
/// changes regardless of title edits.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateSurveyRequest {
    #[serde(default, deserialize_with = "double_option")]
    pub title: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub opens_at: Option<Option<DateTime<Utc>>>,

    #[serde(default, deserialize_with = "double_option")]
    pub closes_at: Option<Option<DateTime<Utc>>>,
}

// ============================================================================
// Response Requests
// ============================================================================

/// Submit or auto-save a survey response
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitResponseRequest {
    /// Answer data keyed by question id
    #[serde(default)]
    pub answers: Map<String, Value>,

    /// True for auto-save, false for final submission
    #[serde(default = "default_is_draft")]
    pub is_draft: bool,
}
