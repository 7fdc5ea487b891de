//! Export service
//!
//! Renders a survey's collected responses as a downloadable JSON or CSV
//! document. Exports are buffered in memory; response sets are bounded by
//! survey audience size, not by unbounded event streams.

use std::collections::BTreeSet;

use serde_json::{json, Value};
use tracing::{info, instrument};
use uuid::Uuid;

use survey_core::error::DomainError;
use survey_core::traits::{ResponseOrder, ResponseWithUser};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::survey::SurveyService;

/// Fixed CSV columns preceding the per-question columns
const CSV_FIXED_HEADER: [&str; 6] = [
    "id",
    "user_id",
    "github_username",
    "is_draft",
    "submitted_at",
    "created_at",
];

/// A rendered export ready to be served as a download
#[derive(Debug)]
pub struct ExportFile {
    pub filename: String,
    pub content_type: &'static str,
    pub body: String,
}

/// Export service
pub struct ExportService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ExportService<'a> {
    /// Create a new ExportService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Export all responses of an owned survey in the requested format
    ///
    /// Rows are ordered oldest first. Supported formats are `json` and
    /// `csv`; anything else is a validation failure.
    #[instrument(skip(self))]
    pub async fn export_responses(
        &self,
        owner_id: Uuid,
        survey_id: Uuid,
        format: &str,
    ) -> ServiceResult<ExportFile> {
        let survey = SurveyService::new(self.ctx)
            .owned_survey(owner_id, survey_id)
            .await?;

        let rows = self
            .ctx
            .response_repo()
            .list_by_survey(survey.id, ResponseOrder::OldestFirst)
            .await?;

        let file = match format {
            "json" => ExportFile {
                filename: format!("{}-responses.json", survey.slug),
                content_type: "application/json",
                body: render_json(&rows)?,
            },
            "csv" => ExportFile {
                filename: format!("{}-responses.csv", survey.slug),
                content_type: "text/csv",
                body: render_csv(&rows),
            },
            other => {
                return Err(ServiceError::from(DomainError::InvalidExportFormat(
                    other.to_string(),
                )))
            }
        };

        info!(survey_id = %survey.id, format, rows = rows.len(), "Responses exported");
        Ok(file)
    }
}

/// Render rows as a pretty-printed JSON array of flat objects
fn render_json(rows: &[ResponseWithUser]) -> ServiceResult<String> {
    let data: Vec<Value> = rows
        .iter()
        .map(|entry| {
            let r = &entry.response;
            json!({
                "id": r.id,
                "user_id": r.user_id,
                "github_username": entry.github_username,
                "answers": r.answers,
                "is_draft": r.is_draft,
                "submitted_at": r.submitted_at.map(|t| t.to_rfc3339()),
                "created_at": r.created_at.to_rfc3339(),
                "updated_at": r.updated_at.to_rfc3339(),
            })
        })
        .collect();

    serde_json::to_string_pretty(&data).map_err(|e| ServiceError::internal(e.to_string()))
}

/// Render rows as RFC-4180 CSV
///
/// The fixed columns are followed by one column per distinct question id
/// observed across all rows, sorted lexicographically. Missing answers
/// render as empty cells; array and object answers as compact JSON.
fn render_csv(rows: &[ResponseWithUser]) -> String {
    let question_ids: BTreeSet<&str> = rows
        .iter()
        .flat_map(|entry| entry.response.answers.keys())
        .map(String::as_str)
        .collect();

    let mut output = String::new();

    let header: Vec<&str> = CSV_FIXED_HEADER
        .iter()
        .copied()
        .chain(question_ids.iter().copied())
        .collect();
    push_csv_row(&mut output, &header);

    for entry in rows {
        let r = &entry.response;
        let mut cells: Vec<String> = vec![
            r.id.to_string(),
            r.user_id.to_string(),
            entry.github_username.clone(),
            r.is_draft.to_string(),
            r.submitted_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
            r.created_at.to_rfc3339(),
        ];
        for qid in &question_ids {
            let cell = r.answers.get(*qid).map(answer_cell).unwrap_or_default();
            cells.push(cell);
        }

        let refs: Vec<&str> = cells.iter().map(String::as_str).collect();
        push_csv_row(&mut output, &refs);
    }

    output
}

/// Render one answer value as a CSV cell
fn answer_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        // Arrays and objects keep their structure as compact JSON text
        other => other.to_string(),
    }
}

/// Append one CSV record, quoting cells per RFC 4180
fn push_csv_row(output: &mut String, cells: &[&str]) {
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            output.push(',');
        }
        if cell.contains([',', '"', '\n', '\r']) {
            output.push('"');
            output.push_str(&cell.replace('"', "\"\""));
            output.push('"');
        } else {
            output.push_str(cell);
        }
    }
    output.push_str("\r\n");
}
