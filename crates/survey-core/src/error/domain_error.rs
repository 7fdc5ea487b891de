//! Domain errors - error types for the domain layer

use thiserror::Error;
use uuid::Uuid;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    /// Covers absent, soft-deleted, and not-owned surveys alike so that
    /// owner-scoped lookups never leak existence.
    #[error("Survey not found")]
    SurveyNotFound,

    #[error("No response found for this survey")]
    ResponseNotFound,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unsupported export format: {0}")]
    InvalidExportFormat(String),

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Survey is not currently accepting responses")]
    SurveyClosed,

    #[error("Cannot modify an already submitted response")]
    ResponseAlreadySubmitted,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Slug already in use: {0}")]
    SlugTaken(String),

    /// A concurrent first save for the same (survey, user) pair won the
    /// insert race; the unique constraint is the de-duplication backstop.
    #[error("Response already exists for this survey and user")]
    DuplicateResponse,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    /// Check if this is a not-found error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_) | Self::SurveyNotFound | Self::ResponseNotFound
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_) | Self::InvalidExportFormat(_))
    }

    /// Check if this is a forbidden-operation error
    ///
    /// Survey-closed and already-submitted both reject with 403 at the
    /// HTTP surface.
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::SurveyClosed | Self::ResponseAlreadySubmitted)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::SlugTaken(_) | Self::DuplicateResponse)
    }

    /// Stable error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::SurveyNotFound => "SURVEY_NOT_FOUND",
            Self::ResponseNotFound => "RESPONSE_NOT_FOUND",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidExportFormat(_) => "INVALID_EXPORT_FORMAT",
            Self::SurveyClosed => "SURVEY_CLOSED",
            Self::ResponseAlreadySubmitted => "RESPONSE_ALREADY_SUBMITTED",
            Self::SlugTaken(_) => "SLUG_TAKEN",
            Self::DuplicateResponse => "DUPLICATE_RESPONSE",
            Self::DatabaseError(_) => "DATABASE_ERROR",
        }
    }
}
