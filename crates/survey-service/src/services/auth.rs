//! Authentication service
//!
//! Handles the GitHub OAuth login flow: issuing the authorization redirect,
//! completing the callback (state validation, code exchange, profile fetch,
//! user upsert), and minting the session token.

use tracing::{info, instrument, warn};

use survey_core::entities::User;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Query parameters GitHub sends to the OAuth callback
#[derive(Debug, Clone, Default)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// Why a login attempt failed
///
/// Failures are expected outcomes of the flow (the user lands back on the
/// frontend with an error reason), not server errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginFailure {
    /// GitHub reported an error (e.g. the user denied access)
    Provider(String),
    /// Unknown, reused, or expired state token
    InvalidState,
    /// Callback arrived without an authorization code
    MissingCode,
    /// Code-for-token exchange was rejected
    TokenExchangeFailed,
    /// Profile fetch with the access token failed
    UserFetchFailed,
}

impl LoginFailure {
    /// The reason string carried to the frontend redirect
    pub fn reason(&self) -> &str {
        match self {
            Self::Provider(reason) => reason,
            Self::InvalidState => "invalid_state",
            Self::MissingCode => "missing_code",
            Self::TokenExchangeFailed => "token_exchange_failed",
            Self::UserFetchFailed => "user_fetch_failed",
        }
    }
}

/// Outcome of a completed OAuth callback
#[derive(Debug)]
pub enum LoginOutcome {
    /// Login succeeded: a session token was minted for the user
    Success { token: String, user: User },
    /// Login failed for an expected reason
    Failure(LoginFailure),
}

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Start the OAuth flow: issue a state token and build the GitHub
    /// authorization URL to redirect the user to
    #[instrument(skip(self))]
    pub fn begin_login(&self) -> String {
        let state = self.ctx.state_store().issue();
        self.ctx.github_client().authorize_url(&state)
    }

    /// Complete the OAuth callback
    ///
    /// Expected failures (denied access, bad state, rejected code) come back
    /// as `LoginOutcome::Failure`; only infrastructure problems (database,
    /// token encoding) surface as errors.
    #[instrument(skip(self, params))]
    pub async fn complete_login(&self, params: CallbackParams) -> ServiceResult<LoginOutcome> {
        if let Some(error) = params.error {
            warn!(reason = %error, "GitHub reported an OAuth error");
            return Ok(LoginOutcome::Failure(LoginFailure::Provider(error)));
        }

        // State must have been issued by us and never used before
        let state_valid = params
            .state
            .as_deref()
            .is_some_and(|s| self.ctx.state_store().consume(s));
        if !state_valid {
            warn!("OAuth callback with missing or invalid state");
            return Ok(LoginOutcome::Failure(LoginFailure::InvalidState));
        }

        let Some(code) = params.code else {
            return Ok(LoginOutcome::Failure(LoginFailure::MissingCode));
        };

        let access_token = match self.ctx.github_client().exchange_code(&code).await {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "GitHub token exchange failed");
                return Ok(LoginOutcome::Failure(LoginFailure::TokenExchangeFailed));
            }
        };

        let profile = match self.ctx.github_client().fetch_user(&access_token).await {
            Ok(profile) => profile,
            Err(e) => {
                warn!(error = %e, "GitHub profile fetch failed");
                return Ok(LoginOutcome::Failure(LoginFailure::UserFetchFailed));
            }
        };

        // Find or create the account for this GitHub identity
        let user = match self.ctx.user_repo().find_by_github_id(profile.id).await? {
            Some(mut user) => {
                user.record_login(profile.login, profile.email, profile.avatar_url);
                self.ctx.user_repo().record_login(&user).await?;
                info!(user_id = %user.id, "Returning user logged in");
                user
            }
            None => {
                let user = User::new(
                    profile.id,
                    profile.login,
                    profile.email,
                    profile.avatar_url,
                );
                self.ctx.user_repo().create(&user).await?;
                info!(user_id = %user.id, "New user created from GitHub login");
                user
            }
        };

        let token = self
            .ctx
            .jwt_service()
            .issue_token(user.id)
            .map_err(ServiceError::from)?;

        Ok(LoginOutcome::Success { token, user })
    }
}
