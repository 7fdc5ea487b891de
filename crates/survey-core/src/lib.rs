//! # survey-core
//!
//! Domain layer containing entities, slug rules, repository traits, and domain errors.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod slug;
pub mod traits;

// Re-export commonly used types at crate root
pub use entities::{Survey, SurveyResponse, User};
pub use error::DomainError;
pub use slug::{generate_slug, FALLBACK_SLUG, MAX_SLUG_LEN};
pub use traits::{
    RepoResult, ResponseOrder, ResponseRepository, ResponseWithUser, SurveyRepository,
    SurveyWithCount, UserRepository,
};
