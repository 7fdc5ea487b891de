//! Response service
//!
//! Handles the respondent side: the public survey view, the draft/submit
//! upsert, and the caller's own response lookup.

use tracing::{info, instrument};
use uuid::Uuid;

use survey_core::entities::{Survey, SurveyResponse};
use survey_core::error::DomainError;

use crate::dto::{MyResponse, PublicSurveyResponse, ResponseRecord, SubmitResponseRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Response service
pub struct ResponseService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ResponseService<'a> {
    /// Create a new ResponseService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get the public survey view for rendering (no auth required)
    #[instrument(skip(self))]
    pub async fn public_survey(&self, slug: &str) -> ServiceResult<PublicSurveyResponse> {
        let survey = self.live_survey(slug).await?;
        Ok(PublicSurveyResponse::from(&survey))
    }

    /// Save the caller's response to a survey (upsert)
    ///
    /// - No existing row: insert, stamping `submitted_at` on a final save
    /// - Existing draft: overwrite answers and draft flag
    /// - Existing final submission: rejected, the row is immutable
    #[instrument(skip(self, request), fields(is_draft = request.is_draft))]
    pub async fn save_response(
        &self,
        slug: &str,
        user_id: Uuid,
        request: SubmitResponseRequest,
    ) -> ServiceResult<ResponseRecord> {
        let survey = self.live_survey(slug).await?;

        if !survey.is_open() {
            return Err(ServiceError::from(DomainError::SurveyClosed));
        }

        let existing = self
            .ctx
            .response_repo()
            .find_by_survey_and_user(survey.id, user_id)
            .await?;

        let response = match existing {
            None => {
                let response =
                    SurveyResponse::new(survey.id, user_id, request.answers, request.is_draft);
                self.ctx.response_repo().create(&response).await?;
                response
            }
            Some(mut response) => {
                if response.is_submitted() {
                    return Err(ServiceError::from(DomainError::ResponseAlreadySubmitted));
                }
                response.save(request.answers, request.is_draft);
                self.ctx.response_repo().update(&response).await?;
                response
            }
        };

        if response.is_submitted() {
            info!(survey_id = %survey.id, "Response submitted");
        }

        Ok(ResponseRecord::from(&response))
    }

    /// Get the caller's own response to a survey
    #[instrument(skip(self))]
    pub async fn my_response(&self, slug: &str, user_id: Uuid) -> ServiceResult<MyResponse> {
        let survey = self.live_survey(slug).await?;

        let response = self
            .ctx
            .response_repo()
            .find_by_survey_and_user(survey.id, user_id)
            .await?
            .ok_or_else(|| ServiceError::from(DomainError::ResponseNotFound))?;

        Ok(MyResponse::from(&response))
    }

    /// Fetch a live survey by slug; soft-deleted surveys are invisible
    async fn live_survey(&self, slug: &str) -> ServiceResult<Survey> {
        self.ctx
            .survey_repo()
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| ServiceError::from(DomainError::SurveyNotFound))
    }
}
