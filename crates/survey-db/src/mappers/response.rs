//! Response entity <-> model mappers

use survey_core::entities::SurveyResponse;
use survey_core::traits::ResponseWithUser;

use crate::models::{ResponseModel, ResponseWithUserModel};

/// Convert ResponseModel to SurveyResponse entity
///
/// The answers column is constrained to a JSON object; anything else in
/// the row (possible only via out-of-band writes) maps to an empty set.
impl From<ResponseModel> for SurveyResponse {
    fn from(model: ResponseModel) -> Self {
        let answers = match model.answers {
            serde_json::Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };

        SurveyResponse {
            id: model.id,
            survey_id: model.survey_id,
            user_id: model.user_id,
            answers,
            is_draft: model.is_draft,
            submitted_at: model.submitted_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Convert the joined listing row to the domain aggregate
impl From<ResponseWithUserModel> for ResponseWithUser {
    fn from(model: ResponseWithUserModel) -> Self {
        ResponseWithUser {
            response: SurveyResponse::from(model.response),
            github_username: model.github_username,
        }
    }
}
