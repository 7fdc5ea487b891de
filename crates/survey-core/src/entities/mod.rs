//! Domain entities - core business objects

mod response;
mod survey;
mod user;

pub use response::SurveyResponse;
pub use survey::Survey;
pub use user::User;
