//! # survey-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

// Re-export commonly used types at crate root
pub use dto::{
    CreateSurveyRequest, HealthResponse, MessageResponse, MyResponse, PublicSurveyResponse,
    ReadinessResponse, ResponseListItem, ResponseRecord, SubmitResponseRequest, SurveyDetail,
    SurveyListItem, UpdateSurveyRequest, UserProfile,
};
pub use services::{
    AuthService, CallbackParams, ExportFile, ExportService, LoginFailure, LoginOutcome,
    ResponseService, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
    SurveyService,
};
