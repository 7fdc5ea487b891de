//! Survey service
//!
//! Handles survey authoring: creation with slug derivation, owner-scoped
//! listing and lookup, metadata patching, soft deletion, and duplication.

use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;

use survey_core::entities::Survey;
use survey_core::error::DomainError;
use survey_core::slug::generate_slug;
use survey_core::traits::ResponseOrder;

use crate::dto::{
    CreateSurveyRequest, ResponseListItem, SurveyDetail, SurveyListItem, UpdateSurveyRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Survey service
pub struct SurveyService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SurveyService<'a> {
    /// Create a new SurveyService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a new survey owned by the given admin
    #[instrument(skip(self, request), fields(title = %request.title))]
    pub async fn create_survey(
        &self,
        owner_id: Uuid,
        request: CreateSurveyRequest,
    ) -> ServiceResult<SurveyDetail> {
        if !request.config.is_object() {
            return Err(ServiceError::validation("config must be a JSON object"));
        }

        let slug = self.unique_slug(&generate_slug(&request.title)).await?;

        let survey = Survey::new(
            slug,
            request.title,
            request.description,
            request.config,
            owner_id,
            request.opens_at,
            request.closes_at,
        );
        self.ctx.survey_repo().create(&survey).await?;

        info!(survey_id = %survey.id, slug = %survey.slug, "Survey created");

        Ok(SurveyDetail::from(&survey))
    }

    /// List the owner's surveys with response counts, newest first
    #[instrument(skip(self))]
    pub async fn list_surveys(&self, owner_id: Uuid) -> ServiceResult<Vec<SurveyListItem>> {
        let surveys = self.ctx.survey_repo().list_by_owner(owner_id).await?;
        Ok(surveys.iter().map(SurveyListItem::from).collect())
    }

    /// Get full survey detail by id, scoped to its owner
    #[instrument(skip(self))]
    pub async fn get_survey(&self, owner_id: Uuid, survey_id: Uuid) -> ServiceResult<SurveyDetail> {
        let survey = self.owned_survey(owner_id, survey_id).await?;
        Ok(SurveyDetail::from(&survey))
    }

    /// Patch survey metadata
    ///
    /// Omitted fields are untouched; explicit nulls clear description and
    /// the open/close window. The slug never changes, even when the title
    /// does.
    #[instrument(skip(self, request))]
    pub async fn update_survey(
        &self,
        owner_id: Uuid,
        survey_id: Uuid,
        request: UpdateSurveyRequest,
    ) -> ServiceResult<SurveyDetail> {
        let mut survey = self.owned_survey(owner_id, survey_id).await?;
        let mut changed = false;

        if let Some(title) = request.title {
            let Some(title) = title else {
                return Err(ServiceError::validation("title cannot be null"));
            };
            if title.is_empty() || title.len() > 500 {
                return Err(ServiceError::validation("Title must be 1-500 characters"));
            }
            survey.title = title;
            changed = true;
        }

        if let Some(description) = request.description {
            survey.description = description;
            changed = true;
        }

        if let Some(opens_at) = request.opens_at {
            survey.opens_at = opens_at;
            changed = true;
        }

        if let Some(closes_at) = request.closes_at {
            survey.closes_at = closes_at;
            changed = true;
        }

        if changed {
            survey.updated_at = Utc::now();
            self.ctx.survey_repo().update(&survey).await?;
        }

        Ok(SurveyDetail::from(&survey))
    }

    /// Soft delete a survey
    ///
    /// The row is retained (responses survive), the slug stays reserved,
    /// and the survey disappears from every lookup.
    #[instrument(skip(self))]
    pub async fn delete_survey(&self, owner_id: Uuid, survey_id: Uuid) -> ServiceResult<()> {
        let survey = self.owned_survey(owner_id, survey_id).await?;
        self.ctx.survey_repo().soft_delete(survey.id).await?;

        info!(survey_id = %survey.id, "Survey soft deleted");
        Ok(())
    }

    /// Duplicate a survey
    ///
    /// The copy gets a " (Copy)" title suffix, a fresh slug derived from
    /// "<title> copy", the same description and config, and a cleared
    /// open/close window.
    #[instrument(skip(self))]
    pub async fn duplicate_survey(
        &self,
        owner_id: Uuid,
        survey_id: Uuid,
    ) -> ServiceResult<SurveyDetail> {
        let original = self.owned_survey(owner_id, survey_id).await?;

        let base = generate_slug(&format!("{} copy", original.title));
        let slug = self.unique_slug(&base).await?;

        let duplicate = Survey::new(
            slug,
            format!("{} (Copy)", original.title),
            original.description.clone(),
            original.config.clone(),
            owner_id,
            None,
            None,
        );
        self.ctx.survey_repo().create(&duplicate).await?;

        info!(
            survey_id = %duplicate.id,
            source_id = %original.id,
            "Survey duplicated"
        );

        Ok(SurveyDetail::from(&duplicate))
    }

    /// List all responses for an owned survey, newest first
    #[instrument(skip(self))]
    pub async fn list_responses(
        &self,
        owner_id: Uuid,
        survey_id: Uuid,
    ) -> ServiceResult<Vec<ResponseListItem>> {
        let survey = self.owned_survey(owner_id, survey_id).await?;

        let responses = self
            .ctx
            .response_repo()
            .list_by_survey(survey.id, ResponseOrder::NewestFirst)
            .await?;

        Ok(responses.iter().map(ResponseListItem::from).collect())
    }

    /// Fetch a live survey scoped to its owner
    ///
    /// Absent, soft-deleted, and not-owned all collapse into the same
    /// not-found outcome so ownership is never leaked.
    pub(crate) async fn owned_survey(
        &self,
        owner_id: Uuid,
        survey_id: Uuid,
    ) -> ServiceResult<Survey> {
        self.ctx
            .survey_repo()
            .find_by_id_and_owner(survey_id, owner_id)
            .await?
            .ok_or_else(|| ServiceError::from(DomainError::SurveyNotFound))
    }

    /// Find the first free slug: the base itself, then `base-1`, `base-2`, ...
    ///
    /// A concurrent writer grabbing the same candidate is caught by the
    /// unique constraint on insert.
    async fn unique_slug(&self, base: &str) -> ServiceResult<String> {
        if !self.ctx.survey_repo().slug_exists(base).await? {
            return Ok(base.to_string());
        }

        let mut counter = 1u32;
        loop {
            let candidate = format!("{base}-{counter}");
            if !self.ctx.survey_repo().slug_exists(&candidate).await? {
                return Ok(candidate);
            }
            counter += 1;
        }
    }
}
