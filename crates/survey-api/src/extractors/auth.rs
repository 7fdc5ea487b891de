//! Authentication extractors
//!
//! Extracts and validates the session token from the session cookie,
//! resolving it to a live user account.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::cookie::CookieJar;
use survey_common::AppError;
use survey_core::entities::User;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated user resolved from the session cookie
///
/// The token must decode and verify, and its subject must still exist in
/// the database. A token for a deleted account is treated as invalid.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        // Pull the session token from the cookie jar
        let jar = CookieJar::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::App(AppError::NotAuthenticated))?;
        let token = jar
            .get(app_state.cookie_name())
            .map(|cookie| cookie.value().to_string())
            .ok_or(ApiError::App(AppError::NotAuthenticated))?;

        // Validate the token
        let claims = app_state.jwt_service().decode_token(&token).map_err(|e| {
            tracing::warn!(error = %e, "Invalid session token");
            ApiError::App(e)
        })?;
        let user_id = claims.user_id().map_err(ApiError::App)?;

        // The subject must resolve to a live account
        let user = app_state
            .service_context()
            .user_repo()
            .find_by_id(user_id)
            .await
            .map_err(|e| ApiError::App(AppError::from(e)))?
            .ok_or_else(|| {
                tracing::warn!(user_id = %user_id, "Session token for unknown user");
                ApiError::App(AppError::InvalidToken)
            })?;

        Ok(CurrentUser { user })
    }
}

/// Authenticated admin user
///
/// Same as [`CurrentUser`] but additionally requires the admin flag.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub user: User,
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentUser { user } = CurrentUser::from_request_parts(parts, state).await?;

        if !user.is_admin {
            return Err(ApiError::App(AppError::AdminRequired));
        }

        Ok(AdminUser { user })
    }
}
