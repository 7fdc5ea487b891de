//! PostgreSQL implementation of SurveyRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use survey_core::entities::Survey;
use survey_core::error::DomainError;
use survey_core::traits::{RepoResult, SurveyRepository, SurveyWithCount};

use crate::models::{SurveyModel, SurveyWithCountModel};

use super::error::{map_db_error, map_unique_violation, survey_not_found};

const SURVEY_COLUMNS: &str = "id, slug, title, description, config, created_by, \
                              opens_at, closes_at, deleted_at, created_at, updated_at";

/// PostgreSQL implementation of SurveyRepository
#[derive(Clone)]
pub struct PgSurveyRepository {
    pool: PgPool,
}

impl PgSurveyRepository {
    /// Create a new PgSurveyRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SurveyRepository for PgSurveyRepository {
    #[instrument(skip(self))]
    async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Survey>> {
        let result = sqlx::query_as::<_, SurveyModel>(&format!(
            r"
            SELECT {SURVEY_COLUMNS}
            FROM surveys
            WHERE slug = $1 AND deleted_at IS NULL
            ",
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Survey::from))
    }

    #[instrument(skip(self))]
    async fn find_by_id_and_owner(&self, id: Uuid, owner_id: Uuid) -> RepoResult<Option<Survey>> {
        let result = sqlx::query_as::<_, SurveyModel>(&format!(
            r"
            SELECT {SURVEY_COLUMNS}
            FROM surveys
            WHERE id = $1 AND created_by = $2 AND deleted_at IS NULL
            ",
        ))
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Survey::from))
    }

    #[instrument(skip(self))]
    async fn slug_exists(&self, slug: &str) -> RepoResult<bool> {
        // Deliberately no deleted_at filter: slugs stay reserved after
        // soft deletion so old survey links never resolve to a new survey.
        let result = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM surveys WHERE slug = $1)
            ",
        )
        .bind(slug)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self, survey))]
    async fn create(&self, survey: &Survey) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO surveys (id, slug, title, description, config, created_by,
                                 opens_at, closes_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(survey.id)
        .bind(&survey.slug)
        .bind(&survey.title)
        .bind(&survey.description)
        .bind(&survey.config)
        .bind(survey.created_by)
        .bind(survey.opens_at)
        .bind(survey.closes_at)
        .bind(survey.created_at)
        .bind(survey.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::SlugTaken(survey.slug.clone())))?;

        Ok(())
    }

    #[instrument(skip(self, survey))]
    async fn update(&self, survey: &Survey) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE surveys
            SET title = $2, description = $3, config = $4, opens_at = $5,
                closes_at = $6, updated_at = $7
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(survey.id)
        .bind(&survey.title)
        .bind(&survey.description)
        .bind(&survey.config)
        .bind(survey.opens_at)
        .bind(survey.closes_at)
        .bind(survey.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(survey_not_found());
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn soft_delete(&self, id: Uuid) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE surveys
            SET deleted_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(survey_not_found());
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_by_owner(&self, owner_id: Uuid) -> RepoResult<Vec<SurveyWithCount>> {
        let rows = sqlx::query_as::<_, SurveyWithCountModel>(
            r"
            SELECT s.id, s.slug, s.title, s.description, s.config, s.created_by,
                   s.opens_at, s.closes_at, s.deleted_at, s.created_at, s.updated_at,
                   COUNT(r.id) AS response_count
            FROM surveys s
            LEFT JOIN responses r ON r.survey_id = s.id
            WHERE s.created_by = $1 AND s.deleted_at IS NULL
            GROUP BY s.id
            ORDER BY s.created_at DESC
            ",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(SurveyWithCount::from).collect())
    }
}
