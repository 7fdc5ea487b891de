//! Authentication handlers
//!
//! Endpoints for the GitHub OAuth flow and session management. The session
//! credential is a JWT carried in an http-only cookie; the browser is
//! redirected back to the frontend at the end of the OAuth dance.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use survey_service::{AuthService, CallbackParams, LoginOutcome, MessageResponse, UserProfile};
use time::Duration;
use tracing::info;
use url::Url;

use crate::extractors::CurrentUser;
use crate::response::ApiResult;
use crate::state::AppState;

/// Query parameters GitHub appends to the callback redirect
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// Start the GitHub OAuth flow
///
/// GET /auth/github
pub async fn github_login(State(state): State<AppState>) -> Redirect {
    let service = AuthService::new(state.service_context());
    Redirect::to(&service.begin_login())
}

/// Complete the GitHub OAuth flow
///
/// GET /auth/github/callback
///
/// On success the session cookie is set and the browser is redirected to
/// the frontend. Expected failures redirect back with an error reason
/// instead of rendering an API error.
pub async fn github_callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<CallbackQuery>,
) -> ApiResult<Response> {
    let service = AuthService::new(state.service_context());
    let params = CallbackParams {
        code: query.code,
        state: query.state,
        error: query.error,
    };

    match service.complete_login(params).await? {
        LoginOutcome::Success { token, user } => {
            info!(user_id = %user.id, "Login completed, setting session cookie");
            let jar = jar.add(session_cookie(&state, token));
            Ok((jar, Redirect::to(&state.config().frontend.url)).into_response())
        }
        LoginOutcome::Failure(failure) => {
            let url = failure_redirect(&state.config().frontend.url, failure.reason());
            Ok(Redirect::to(&url).into_response())
        }
    }
}

/// Get the authenticated user's profile
///
/// GET /auth/me
pub async fn me(auth: CurrentUser) -> Json<UserProfile> {
    Json(UserProfile::from(&auth.user))
}

/// Logout by clearing the session cookie
///
/// POST /auth/logout
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<MessageResponse>) {
    // An empty value with max-age 0 makes the browser drop the cookie
    let removal = Cookie::build((state.cookie_name().to_string(), String::new()))
        .path("/")
        .http_only(true)
        .max_age(Duration::ZERO)
        .build();

    (
        jar.add(removal),
        Json(MessageResponse::new("Successfully logged out")),
    )
}

/// Build the session cookie carrying the JWT
fn session_cookie(state: &AppState, token: String) -> Cookie<'static> {
    Cookie::build((state.cookie_name().to_string(), token))
        .path("/")
        .http_only(true)
        .secure(state.config().app.env.is_production())
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(state.config().jwt.expiry_seconds()))
        .build()
}

/// Build the frontend redirect URL for a failed login
fn failure_redirect(frontend_url: &str, reason: &str) -> String {
    match Url::parse(frontend_url) {
        Ok(mut url) => {
            url.query_pairs_mut()
                .append_pair("error", "oauth_failed")
                .append_pair("reason", reason);
            url.into()
        }
        // Config holds a non-URL value; fall back to naive concatenation
        Err(_) => format!("{frontend_url}?error=oauth_failed&reason={reason}"),
    }
}
