//! Survey entity <-> model mappers

use survey_core::entities::Survey;
use survey_core::traits::SurveyWithCount;

use crate::models::{SurveyModel, SurveyWithCountModel};

/// Convert SurveyModel to Survey entity
impl From<SurveyModel> for Survey {
    fn from(model: SurveyModel) -> Self {
        Survey {
            id: model.id,
            slug: model.slug,
            title: model.title,
            description: model.description,
            config: model.config,
            created_by: model.created_by,
            opens_at: model.opens_at,
            closes_at: model.closes_at,
            deleted_at: model.deleted_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Convert the joined listing row to the domain aggregate
impl From<SurveyWithCountModel> for SurveyWithCount {
    fn from(model: SurveyWithCountModel) -> Self {
        SurveyWithCount {
            survey: Survey::from(model.survey),
            response_count: model.response_count,
        }
    }
}
