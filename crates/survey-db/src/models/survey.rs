//! Survey database models

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for surveys table
#[derive(Debug, Clone, FromRow)]
pub struct SurveyModel {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub config: Value,
    pub created_by: Uuid,
    pub opens_at: Option<DateTime<Utc>>,
    pub closes_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SurveyModel {
    /// Check if survey is soft deleted
    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Survey row joined with its response count, for the owner listing
#[derive(Debug, Clone, FromRow)]
pub struct SurveyWithCountModel {
    #[sqlx(flatten)]
    pub survey: SurveyModel,
    pub response_count: i64,
}
