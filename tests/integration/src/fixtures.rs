//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests. Accounts are
//! provisioned directly in the database with a minted session token,
//! since the GitHub OAuth dance cannot run against a test environment.

use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use survey_core::entities::User;

use crate::helpers::TestServer;

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Counter for unique GitHub identities, offset away from real ids
static GITHUB_ID: AtomicI64 = AtomicI64::new(7_000_000);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

fn next_github_id() -> i64 {
    GITHUB_ID.fetch_add(1, Ordering::SeqCst)
}

/// A provisioned account with a minted session token
pub struct TestAccount {
    pub user: User,
    pub token: String,
}

/// Create a regular (non-admin) account directly in the database
pub async fn create_account(server: &TestServer) -> Result<TestAccount> {
    let suffix = unique_suffix();
    let user = User::new(
        next_github_id(),
        format!("testuser{suffix}"),
        Some(format!("test{suffix}@example.com")),
        None,
    );
    server.state.service_context().user_repo().create(&user).await?;

    let token = server.state.jwt_service().issue_token(user.id)?;

    Ok(TestAccount { user, token })
}

/// Create an account with the admin flag set
///
/// Admin is granted out of band (directly in the database), matching how
/// the flag is managed in deployment.
pub async fn create_admin(server: &TestServer) -> Result<TestAccount> {
    let account = create_account(server).await?;

    sqlx::query("UPDATE users SET is_admin = TRUE WHERE id = $1")
        .bind(account.user.id)
        .execute(server.state.service_context().pool())
        .await?;

    Ok(account)
}

/// Create survey request
#[derive(Debug, Serialize)]
pub struct CreateSurveyRequest {
    pub title: String,
    pub description: Option<String>,
    pub config: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opens_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closes_at: Option<String>,
}

impl CreateSurveyRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            title: format!("Team Poll {suffix}"),
            description: Some("A test survey".to_string()),
            config: json!({
                "questions": [
                    {"id": "q1", "type": "text", "label": "What went well?"},
                    {"id": "q2", "type": "rating", "label": "Overall score", "max": 5}
                ]
            }),
            opens_at: None,
            closes_at: None,
        }
    }

    /// A survey whose open window is already over
    pub fn closed() -> Self {
        let mut request = Self::unique();
        request.closes_at = Some("2000-01-01T00:00:00Z".to_string());
        request
    }
}

/// Submit response request
#[derive(Debug, Serialize)]
pub struct SubmitResponseRequest {
    pub answers: Value,
    pub is_draft: bool,
}

impl SubmitResponseRequest {
    pub fn draft() -> Self {
        Self {
            answers: json!({"q1": "so far so good"}),
            is_draft: true,
        }
    }

    pub fn finished() -> Self {
        Self {
            answers: json!({"q1": "shipping on time", "q2": 5}),
            is_draft: false,
        }
    }
}

/// Survey response body (admin view)
#[derive(Debug, Deserialize)]
pub struct SurveyBody {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub config: Value,
    pub created_by: String,
    pub opens_at: Option<String>,
    pub closes_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Survey list entry body
#[derive(Debug, Deserialize)]
pub struct SurveyListItemBody {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub response_count: i64,
}

/// Public survey body (respondent view)
#[derive(Debug, Deserialize)]
pub struct PublicSurveyBody {
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub config: Value,
    pub is_open: bool,
}

/// Saved response body
#[derive(Debug, Deserialize)]
pub struct ResponseRecordBody {
    pub id: String,
    pub survey_id: String,
    pub user_id: String,
    pub answers: Value,
    pub is_draft: bool,
    pub submitted_at: Option<String>,
}

/// The caller's own response body
#[derive(Debug, Deserialize)]
pub struct MyResponseBody {
    pub answers: Value,
    pub is_draft: bool,
    pub submitted_at: Option<String>,
}

/// Response list entry body (admin view)
#[derive(Debug, Deserialize)]
pub struct ResponseListItemBody {
    pub id: String,
    pub user_id: String,
    pub github_username: String,
    pub answers: Value,
    pub is_draft: bool,
}

/// User profile body
#[derive(Debug, Deserialize)]
pub struct UserProfileBody {
    pub id: String,
    pub github_username: String,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub is_admin: bool,
}

/// Message body
#[derive(Debug, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

/// Error response
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}
