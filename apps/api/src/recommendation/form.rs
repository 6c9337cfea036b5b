//! Collect step: turns raw form/JSON input into a `SubmissionInput`.
//!
//! Missing optional fields become empty strings and missing lists become empty.
//! Only two things are rejected: a blank identifier and a label that contains
//! the storage delimiter.

use serde::Deserialize;

use crate::errors::AppError;
use crate::models::submission::{LabelList, SubmissionInput, LIST_DELIMITER};

/// Raw submission as posted by the HTML form or the JSON API.
///
/// Accepts the legacy form names (`nickname`, `mbti`, `job_success_definition`)
/// as aliases.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SubmissionForm {
    #[serde(alias = "nickname")]
    pub identifier: Option<String>,
    pub work_preference: Option<String>,
    pub creative_thinking: Option<String>,
    pub detail_oriented: Option<String>,
    pub enjoy_social_interaction: Option<String>,
    pub prefer_routine: Option<String>,
    pub hobby: Option<String>,
    #[serde(alias = "mbti")]
    pub personality_code: Option<String>,
    pub selected_industries: Vec<String>,
    pub other_industry: Option<String>,
    pub selected_jobs: Vec<String>,
    pub other_job: Option<String>,
    pub social_issue: Option<String>,
    pub dream: Option<String>,
    #[serde(alias = "job_success_definition")]
    pub success_definition: Option<String>,
    pub career_plan: Option<String>,
    pub self_evaluation: Option<String>,
    pub job_experience: Option<String>,
}

fn text(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

fn labels(field: &str, raw: Vec<String>) -> Result<LabelList, AppError> {
    let list = LabelList::from_labels(raw);
    if let Some(bad) = list.find_delimiter_collision() {
        return Err(AppError::Validation(format!(
            "{field}: label {bad:?} must not contain '{LIST_DELIMITER}'"
        )));
    }
    Ok(list)
}

/// Validates and normalises a raw submission.
pub fn collect(form: SubmissionForm) -> Result<SubmissionInput, AppError> {
    let identifier = text(form.identifier);
    if identifier.is_empty() {
        return Err(AppError::Validation(
            "identifier (nickname) cannot be empty".to_string(),
        ));
    }

    Ok(SubmissionInput {
        identifier,
        work_preference: text(form.work_preference),
        creative_thinking: text(form.creative_thinking),
        detail_oriented: text(form.detail_oriented),
        enjoy_social_interaction: text(form.enjoy_social_interaction),
        prefer_routine: text(form.prefer_routine),
        hobby: text(form.hobby),
        personality_code: text(form.personality_code),
        selected_industries: labels("selected_industries", form.selected_industries)?,
        other_industry: text(form.other_industry),
        selected_jobs: labels("selected_jobs", form.selected_jobs)?,
        other_job: text(form.other_job),
        social_issue: text(form.social_issue),
        dream: text(form.dream),
        success_definition: text(form.success_definition),
        career_plan: text(form.career_plan),
        self_evaluation: text(form.self_evaluation),
        job_experience: text(form.job_experience),
    })
}
