//! GitHub OAuth client
//!
//! Exchanges an authorization code for an access token and fetches the
//! user profile. All calls carry a bounded timeout so a slow upstream
//! surfaces as a clean login failure instead of a hang.

use std::time::Duration;

use serde::Deserialize;
use tracing::{instrument, warn};
use url::Url;

/// GitHub authorization endpoint
const AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";
/// GitHub code-for-token exchange endpoint
const TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
/// GitHub user profile endpoint
const USER_URL: &str = "https://api.github.com/user";

/// OAuth scopes requested on login
pub const OAUTH_SCOPES: &str = "read:user user:email";

/// Timeout for all upstream calls
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// GitHub client errors
#[derive(Debug, thiserror::Error)]
pub enum GithubError {
    #[error("GitHub request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("GitHub returned status {0}")]
    Status(u16),

    #[error("Malformed GitHub payload: {0}")]
    Payload(String),
}

/// The subset of the GitHub user profile this application consumes
#[derive(Debug, Clone, Deserialize)]
pub struct GithubUser {
    pub id: i64,
    pub login: String,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

/// GitHub OAuth client
#[derive(Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
    callback_url: String,
}

impl GithubClient {
    /// Create a new client for the configured OAuth application
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built
    pub fn new(
        client_id: String,
        client_secret: String,
        callback_url: String,
    ) -> Result<Self, GithubError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent("surveyflow-backend")
            .build()?;

        Ok(Self {
            http,
            client_id,
            client_secret,
            callback_url,
        })
    }

    /// Build the authorization URL the user is redirected to
    pub fn authorize_url(&self, state: &str) -> String {
        let mut url = Url::parse(AUTHORIZE_URL).expect("authorize URL constant is valid");
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.callback_url)
            .append_pair("scope", OAUTH_SCOPES)
            .append_pair("state", state);
        url.into()
    }

    /// Exchange an authorization code for an access token
    ///
    /// # Errors
    /// Returns an error on transport failure, a non-2xx status, or a
    /// payload without an access token (e.g. an expired code)
    #[instrument(skip(self, code))]
    pub async fn exchange_code(&self, code: &str) -> Result<String, GithubError> {
        let response = self
            .http
            .post(TOKEN_URL)
            .header("Accept", "application/json")
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("code", code),
                ("redirect_uri", self.callback_url.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "GitHub token exchange rejected");
            return Err(GithubError::Status(status.as_u16()));
        }

        let body: TokenResponse = response.json().await?;
        body.access_token
            .ok_or_else(|| GithubError::Payload("missing access_token".to_string()))
    }

    /// Fetch the authenticated user's profile
    ///
    /// # Errors
    /// Returns an error on transport failure, a non-2xx status, or a
    /// profile body that does not deserialize
    #[instrument(skip(self, access_token))]
    pub async fn fetch_user(&self, access_token: &str) -> Result<GithubUser, GithubError> {
        let response = self
            .http
            .get(USER_URL)
            .header("Authorization", format!("Bearer {access_token}"))
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "GitHub profile fetch rejected");
            return Err(GithubError::Status(status.as_u16()));
        }

        response
            .json::<GithubUser>()
            .await
            .map_err(|e| GithubError::Payload(e.to_string()))
    }
}

impl std::fmt::Debug for GithubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubClient")
            .field("client_id", &self.client_id)
            .field("callback_url", &self.callback_url)
            .finish_non_exhaustive()
    }
}
