//! Entity to DTO mappers

use survey_core::entities::{Survey, SurveyResponse, User};
use survey_core::traits::{ResponseWithUser, SurveyWithCount};

use super::responses::{
    MyResponse, PublicSurveyResponse, ResponseListItem, ResponseRecord, SurveyDetail,
    SurveyListItem, UserProfile,
};

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            github_username: user.github_username.clone(),
            email: user.email.clone(),
            avatar_url: user.avatar_url.clone(),
            is_admin: user.is_admin,
        }
    }
}

impl From<&Survey> for SurveyDetail {
    fn from(survey: &Survey) -> Self {
        Self {
            id: survey.id,
            slug: survey.slug.clone(),
            title: survey.title.clone(),
            description: survey.description.clone(),
            config: survey.config.clone(),
            created_by: survey.created_by,
            opens_at: survey.opens_at,
            closes_at: survey.closes_at,
            created_at: survey.created_at,
            updated_at: survey.updated_at,
        }
    }
}

impl From<&SurveyWithCount> for SurveyListItem {
    fn from(entry: &SurveyWithCount) -> Self {
        let survey = &entry.survey;
        Self {
            id: survey.id,
            slug: survey.slug.clone(),
            title: survey.title.clone(),
            description: survey.description.clone(),
            opens_at: survey.opens_at,
            closes_at: survey.closes_at,
            created_at: survey.created_at,
            updated_at: survey.updated_at,
            response_count: entry.response_count,
        }
    }
}

impl From<&Survey> for PublicSurveyResponse {
    fn from(survey: &Survey) -> Self {
        Self {
            slug: survey.slug.clone(),
            title: survey.title.clone(),
            description: survey.description.clone(),
            config: survey.config.clone(),
            opens_at: survey.opens_at,
            closes_at: survey.closes_at,
            is_open: survey.is_open(),
        }
    }
}

impl From<&SurveyResponse> for ResponseRecord {
    fn from(response: &SurveyResponse) -> Self {
        Self {
            id: response.id,
            survey_id: response.survey_id,
            user_id: response.user_id,
            answers: response.answers.clone(),
            is_draft: response.is_draft,
            submitted_at: response.submitted_at,
            created_at: response.created_at,
            updated_at: response.updated_at,
        }
    }
}

impl From<&ResponseWithUser> for ResponseListItem {
    fn from(entry: &ResponseWithUser) -> Self {
        let response = &entry.response;
        Self {
            id: response.id,
            user_id: response.user_id,
            github_username: entry.github_username.clone(),
            answers: response.answers.clone(),
            is_draft: response.is_draft,
            submitted_at: response.submitted_at,
            created_at: response.created_at,
            updated_at: response.updated_at,
        }
    }
}

impl From<&SurveyResponse> for MyResponse {
    fn from(response: &SurveyResponse) -> Self {
        Self {
            answers: response.answers.clone(),
            is_draft: response.is_draft,
            submitted_at: response.submitted_at,
            updated_at: response.updated_at,
        }
    }
}
