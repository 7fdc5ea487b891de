//! Respondent handlers
//!
//! Endpoints for viewing a survey by slug and saving a response. The
//! public view needs no session; saving and reading back a response does.

use axum::{
    extract::{Path, State},
    Json,
};
use survey_service::{
    MyResponse, PublicSurveyResponse, ResponseRecord, ResponseService, SubmitResponseRequest,
};

use crate::extractors::CurrentUser;
use crate::response::ApiResult;
use crate::state::AppState;

/// Get the public survey view for rendering
///
/// GET /surveys/:slug/public
pub async fn get_public_survey(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<PublicSurveyResponse>> {
    let service = ResponseService::new(state.service_context());
    let survey = service.public_survey(&slug).await?;
    Ok(Json(survey))
}

/// Save the caller's response (draft auto-save or final submission)
///
/// POST /surveys/:slug/respond
pub async fn save_response(
    State(state): State<AppState>,
    auth: CurrentUser,
    Path(slug): Path<String>,
    Json(request): Json<SubmitResponseRequest>,
) -> ApiResult<Json<ResponseRecord>> {
    let service = ResponseService::new(state.service_context());
    let response = service.save_response(&slug, auth.user.id, request).await?;
    Ok(Json(response))
}

/// Get the caller's own response to a survey
///
/// GET /surveys/:slug/my-response
pub async fn get_my_response(
    State(state): State<AppState>,
    auth: CurrentUser,
    Path(slug): Path<String>,
) -> ApiResult<Json<MyResponse>> {
    let service = ResponseService::new(state.service_context());
    let response = service.my_response(&slug, auth.user.id).await?;
    Ok(Json(response))
}
