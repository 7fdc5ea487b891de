//! Response entity - one respondent's answer set for one survey

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use uuid::Uuid;

/// One user's answers to one survey
///
/// At most one row exists per (survey, user) pair; saves upsert into it.
/// A draft is mutable; once submitted it is permanently immutable to the
/// respondent.
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyResponse {
    pub id: Uuid,
    pub survey_id: Uuid,
    pub user_id: Uuid,
    /// Answer values keyed by question id, free-form JSON per question
    pub answers: Map<String, Value>,
    pub is_draft: bool,
    pub submitted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SurveyResponse {
    /// Create a new response (first save for this survey/user pair)
    pub fn new(
        survey_id: Uuid,
        user_id: Uuid,
        answers: Map<String, Value>,
        is_draft: bool,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            survey_id,
            user_id,
            answers,
            is_draft,
            submitted_at: if is_draft { None } else { Some(now) },
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the response was finally submitted
    #[inline]
    pub fn is_submitted(&self) -> bool {
        !self.is_draft
    }

    /// Overwrite a draft in place (re-upsert)
    ///
    /// Stamps `submitted_at` when this save is a final submission.
    pub fn save(&mut self, answers: Map<String, Value>, is_draft: bool) {
        let now = Utc::now();
        self.answers = answers;
        self.is_draft = is_draft;
        if !is_draft {
            self.submitted_at = Some(now);
        }
        self.updated_at = now;
    }
}
