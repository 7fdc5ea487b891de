//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.
//!
//! Admin and respondent routes share the `/surveys` prefix: admin routes
//! address a survey by its UUID, respondent routes by its slug. The path
//! parameter is named `:survey` in both, since the router requires one
//! name per position; handlers extract it as `Uuid` or `String`.

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::handlers::{auth, health, responses, surveys};
use crate::state::AppState;

/// Create the main API router with all routes
pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(health_routes())
        .nest("/api/v1", api_v1_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(survey_routes())
        .merge(response_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/github", get(auth::github_login))
        .route("/auth/github/callback", get(auth::github_callback))
        .route("/auth/me", get(auth::me))
        .route("/auth/logout", post(auth::logout))
}

/// Survey administration routes (admin session required, `:survey` is a UUID)
fn survey_routes() -> Router<AppState> {
    Router::new()
        .route("/surveys", post(surveys::create_survey))
        .route("/surveys", get(surveys::list_surveys))
        .route("/surveys/:survey", get(surveys::get_survey))
        .route("/surveys/:survey", patch(surveys::update_survey))
        .route("/surveys/:survey", delete(surveys::delete_survey))
        .route("/surveys/:survey/duplicate", post(surveys::duplicate_survey))
        .route("/surveys/:survey/responses", get(surveys::list_responses))
        .route("/surveys/:survey/export", get(surveys::export_responses))
}

/// Respondent routes (`:survey` is a slug)
fn response_routes() -> Router<AppState> {
    Router::new()
        .route("/surveys/:survey/public", get(responses::get_public_survey))
        .route("/surveys/:survey/respond", post(responses::save_response))
        .route("/surveys/:survey/my-response", get(responses::get_my_response))
}
