//! Database models - SQLx-compatible structs for PostgreSQL tables

mod response;
mod survey;
mod user;

pub use response::{ResponseModel, ResponseWithUserModel};
pub use survey::{SurveyModel, SurveyWithCountModel};
pub use user::UserModel;
