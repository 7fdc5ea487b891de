//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod auth;
pub mod context;
pub mod error;
pub mod export;
pub mod response;
pub mod survey;

// Re-export all services for convenience
pub use auth::{AuthService, CallbackParams, LoginFailure, LoginOutcome};
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use export::{ExportFile, ExportService};
pub use response::ResponseService;
pub use survey::SurveyService;
