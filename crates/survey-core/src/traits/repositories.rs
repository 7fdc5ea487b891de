//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use uuid::Uuid;

use crate::entities::{Survey, SurveyResponse, User};
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<User>>;

    /// Find user by GitHub account id
    async fn find_by_github_id(&self, github_id: i64) -> RepoResult<Option<User>>;

    /// Create a new user (first OAuth login)
    async fn create(&self, user: &User) -> RepoResult<()>;

    /// Persist refreshed profile fields and last-login timestamp
    async fn record_login(&self, user: &User) -> RepoResult<()>;
}

// ============================================================================
// Survey Repository
// ============================================================================

/// A survey joined with its response count, for the admin listing
#[derive(Debug, Clone)]
pub struct SurveyWithCount {
    pub survey: Survey,
    pub response_count: i64,
}

#[async_trait]
pub trait SurveyRepository: Send + Sync {
    /// Find a live survey by slug (soft-deleted rows are invisible)
    async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Survey>>;

    /// Find a live survey by id, scoped to its owner
    ///
    /// Absent, soft-deleted, and not-owned all come back as `None`.
    async fn find_by_id_and_owner(&self, id: Uuid, owner_id: Uuid) -> RepoResult<Option<Survey>>;

    /// Check whether a slug is taken
    ///
    /// Includes soft-deleted surveys: slugs stay reserved after deletion.
    async fn slug_exists(&self, slug: &str) -> RepoResult<bool>;

    /// Create a new survey
    ///
    /// A slug collision lost to a concurrent writer surfaces as
    /// [`DomainError::SlugTaken`] via the unique constraint.
    async fn create(&self, survey: &Survey) -> RepoResult<()>;

    /// Update mutable survey fields
    async fn update(&self, survey: &Survey) -> RepoResult<()>;

    /// Soft delete a survey (sets `deleted_at`, row retained)
    async fn soft_delete(&self, id: Uuid) -> RepoResult<()>;

    /// List an owner's live surveys with response counts, newest first
    async fn list_by_owner(&self, owner_id: Uuid) -> RepoResult<Vec<SurveyWithCount>>;
}

// ============================================================================
// Response Repository
// ============================================================================

/// Ordering for response listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseOrder {
    /// Admin listing view
    NewestFirst,
    /// Export view
    OldestFirst,
}

/// A response joined with the respondent's display name
#[derive(Debug, Clone)]
pub struct ResponseWithUser {
    pub response: SurveyResponse,
    pub github_username: String,
}

#[async_trait]
pub trait ResponseRepository: Send + Sync {
    /// Find the response for a (survey, user) pair - the upsert key
    async fn find_by_survey_and_user(
        &self,
        survey_id: Uuid,
        user_id: Uuid,
    ) -> RepoResult<Option<SurveyResponse>>;

    /// Insert a new response
    async fn create(&self, response: &SurveyResponse) -> RepoResult<()>;

    /// Overwrite an existing response row
    async fn update(&self, response: &SurveyResponse) -> RepoResult<()>;

    /// List all responses for a survey with respondent names
    async fn list_by_survey(
        &self,
        survey_id: Uuid,
        order: ResponseOrder,
    ) -> RepoResult<Vec<ResponseWithUser>>;
}
