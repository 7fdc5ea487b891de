//! Survey administration handlers
//!
//! Endpoints for survey authoring and response review. All routes here
//! require an admin session; surveys are scoped to their owner.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use survey_service::{
    CreateSurveyRequest, ExportService, ResponseListItem, SurveyDetail, SurveyListItem,
    SurveyService, UpdateSurveyRequest,
};
use uuid::Uuid;

use crate::extractors::{AdminUser, ValidatedJson};
use crate::response::{ApiResult, Attachment, Created, NoContent};
use crate::state::AppState;

/// Export query parameters
#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "json".to_string()
}

/// Create a new survey
///
/// POST /surveys
pub async fn create_survey(
    State(state): State<AppState>,
    admin: AdminUser,
    ValidatedJson(request): ValidatedJson<CreateSurveyRequest>,
) -> ApiResult<Created<Json<SurveyDetail>>> {
    let service = SurveyService::new(state.service_context());
    let survey = service.create_survey(admin.user.id, request).await?;
    Ok(Created(Json(survey)))
}

/// List the caller's surveys with response counts
///
/// GET /surveys
pub async fn list_surveys(
    State(state): State<AppState>,
    admin: AdminUser,
) -> ApiResult<Json<Vec<SurveyListItem>>> {
    let service = SurveyService::new(state.service_context());
    let surveys = service.list_surveys(admin.user.id).await?;
    Ok(Json(surveys))
}

/// Get full survey detail
///
/// GET /surveys/:survey_id
pub async fn get_survey(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(survey_id): Path<Uuid>,
) -> ApiResult<Json<SurveyDetail>> {
    let service = SurveyService::new(state.service_context());
    let survey = service.get_survey(admin.user.id, survey_id).await?;
    Ok(Json(survey))
}

/// Patch survey metadata
///
/// PATCH /surveys/:survey_id
pub async fn update_survey(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(survey_id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdateSurveyRequest>,
) -> ApiResult<Json<SurveyDetail>> {
    let service = SurveyService::new(state.service_context());
    let survey = service.update_survey(admin.user.id, survey_id, request).await?;
    Ok(Json(survey))
}

/// Soft delete a survey
///
/// DELETE /surveys/:survey_id
pub async fn delete_survey(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(survey_id): Path<Uuid>,
) -> ApiResult<NoContent> {
    let service = SurveyService::new(state.service_context());
    service.delete_survey(admin.user.id, survey_id).await?;
    Ok(NoContent)
}

/// Duplicate a survey
///
/// POST /surveys/:survey_id/duplicate
pub async fn duplicate_survey(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(survey_id): Path<Uuid>,
) -> ApiResult<Created<Json<SurveyDetail>>> {
    let service = SurveyService::new(state.service_context());
    let survey = service.duplicate_survey(admin.user.id, survey_id).await?;
    Ok(Created(Json(survey)))
}

/// List all responses for a survey, newest first
///
/// GET /surveys/:survey_id/responses
pub async fn list_responses(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(survey_id): Path<Uuid>,
) -> ApiResult<Json<Vec<ResponseListItem>>> {
    let service = SurveyService::new(state.service_context());
    let responses = service.list_responses(admin.user.id, survey_id).await?;
    Ok(Json(responses))
}

/// Download all responses for a survey as JSON or CSV
///
/// GET /surveys/:survey_id/export?format=json|csv
pub async fn export_responses(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(survey_id): Path<Uuid>,
    Query(query): Query<ExportQuery>,
) -> ApiResult<Attachment> {
    let service = ExportService::new(state.service_context());
    let file = service
        .export_responses(admin.user.id, survey_id, &query.format)
        .await?;
    Ok(Attachment(file))
}
