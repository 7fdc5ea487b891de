//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in
//! survey-core. Each repository handles database operations for a
//! specific domain entity.

mod error;
mod response;
mod survey;
mod user;

pub use response::PgResponseRepository;
pub use survey::PgSurveyRepository;
pub use user::PgUserRepository;
