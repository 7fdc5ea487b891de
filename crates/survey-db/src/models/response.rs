//! Response database models

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for responses table
#[derive(Debug, Clone, FromRow)]
pub struct ResponseModel {
    pub id: Uuid,
    pub survey_id: Uuid,
    pub user_id: Uuid,
    pub answers: Value,
    pub is_draft: bool,
    pub submitted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Response row joined with the respondent's GitHub username
#[derive(Debug, Clone, FromRow)]
pub struct ResponseWithUserModel {
    #[sqlx(flatten)]
    pub response: ResponseModel,
    pub github_username: String,
}
