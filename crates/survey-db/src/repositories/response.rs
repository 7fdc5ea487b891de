//! PostgreSQL implementation of ResponseRepository

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use survey_core::entities::SurveyResponse;
use survey_core::error::DomainError;
use survey_core::traits::{RepoResult, ResponseOrder, ResponseRepository, ResponseWithUser};

use crate::models::{ResponseModel, ResponseWithUserModel};

use super::error::{map_db_error, map_unique_violation, response_not_found};

/// PostgreSQL implementation of ResponseRepository
#[derive(Clone)]
pub struct PgResponseRepository {
    pool: PgPool,
}

impl PgResponseRepository {
    /// Create a new PgResponseRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResponseRepository for PgResponseRepository {
    #[instrument(skip(self))]
    async fn find_by_survey_and_user(
        &self,
        survey_id: Uuid,
        user_id: Uuid,
    ) -> RepoResult<Option<SurveyResponse>> {
        let result = sqlx::query_as::<_, ResponseModel>(
            r"
            SELECT id, survey_id, user_id, answers, is_draft, submitted_at,
                   created_at, updated_at
            FROM responses
            WHERE survey_id = $1 AND user_id = $2
            ",
        )
        .bind(survey_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(SurveyResponse::from))
    }

    #[instrument(skip(self, response))]
    async fn create(&self, response: &SurveyResponse) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO responses (id, survey_id, user_id, answers, is_draft,
                                   submitted_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(response.id)
        .bind(response.survey_id)
        .bind(response.user_id)
        .bind(Value::Object(response.answers.clone()))
        .bind(response.is_draft)
        .bind(response.submitted_at)
        .bind(response.created_at)
        .bind(response.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::DuplicateResponse))?;

        Ok(())
    }

    #[instrument(skip(self, response))]
    async fn update(&self, response: &SurveyResponse) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE responses
            SET answers = $2, is_draft = $3, submitted_at = $4, updated_at = $5
            WHERE id = $1
            ",
        )
        .bind(response.id)
        .bind(Value::Object(response.answers.clone()))
        .bind(response.is_draft)
        .bind(response.submitted_at)
        .bind(response.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(response_not_found());
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_by_survey(
        &self,
        survey_id: Uuid,
        order: ResponseOrder,
    ) -> RepoResult<Vec<ResponseWithUser>> {
        let direction = match order {
            ResponseOrder::NewestFirst => "DESC",
            ResponseOrder::OldestFirst => "ASC",
        };

        let rows = sqlx::query_as::<_, ResponseWithUserModel>(&format!(
            r"
            SELECT r.id, r.survey_id, r.user_id, r.answers, r.is_draft,
                   r.submitted_at, r.created_at, r.updated_at,
                   u.github_username
            FROM responses r
            JOIN users u ON u.id = r.user_id
            WHERE r.survey_id = $1
            ORDER BY r.created_at {direction}
            ",
        ))
        .bind(survey_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(ResponseWithUser::from).collect())
    }
}
