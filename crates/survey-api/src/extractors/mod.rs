//! Axum extractors for request handling
//!
//! Custom extractors for session authentication and validation.

mod auth;
mod validated;

pub use auth::{AdminUser, CurrentUser};
pub use validated::ValidatedJson;
