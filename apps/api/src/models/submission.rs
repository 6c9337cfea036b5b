use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::recommendation::profile::ReportProfile;

/// Auto-incrementing row id of `user_responses`.
pub type RecordId = i64;

/// Separator used when a label list is flattened into a single column.
/// No label may contain it; `collect` rejects such input.
pub const LIST_DELIMITER: char = ',';

// ────────────────────────────────────────────────────────────────────────────
// Label lists
// ────────────────────────────────────────────────────────────────────────────

/// Ordered, duplicate-free list of selected category labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelList(Vec<String>);

impl LabelList {
    /// Trims each label, drops blanks and keeps the first occurrence of duplicates.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for label in labels {
            let label = label.as_ref().trim();
            if label.is_empty() || out.iter().any(|l| l == label) {
                continue;
            }
            out.push(label.to_string());
        }
        LabelList(out)
    }

    /// Decodes a stored column value. The empty string is the empty list.
    pub fn parse(raw: &str) -> Self {
        Self::from_labels(raw.split(LIST_DELIMITER))
    }

    /// Encodes for storage.
    pub fn join(&self) -> String {
        self.0.join(&LIST_DELIMITER.to_string())
    }

    /// First label that cannot be stored without colliding with the delimiter.
    pub fn find_delimiter_collision(&self) -> Option<&str> {
        self.0
            .iter()
            .map(String::as_str)
            .find(|l| l.contains(LIST_DELIMITER))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Submission
// ────────────────────────────────────────────────────────────────────────────

/// One user's collected form input. Every field except `identifier` may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionInput {
    /// Display name or nickname. Lookup key, not unique.
    pub identifier: String,
    pub work_preference: String,
    pub creative_thinking: String,
    pub detail_oriented: String,
    pub enjoy_social_interaction: String,
    pub prefer_routine: String,
    pub hobby: String,
    /// MBTI code.
    pub personality_code: String,
    pub selected_industries: LabelList,
    pub other_industry: String,
    pub selected_jobs: LabelList,
    pub other_job: String,
    pub social_issue: String,
    pub dream: String,
    pub success_definition: String,
    pub career_plan: String,
    pub self_evaluation: String,
    pub job_experience: String,
}

/// A submission ready to be inserted: input plus whatever text generation produced.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubmission {
    pub input: SubmissionInput,
    pub generated_report: String,
    pub profile: ReportProfile,
}

/// A submission as read back from the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredSubmission {
    pub id: RecordId,
    #[serde(flatten)]
    pub input: SubmissionInput,
    pub generated_report: String,
    pub profile: ReportProfile,
    pub created_at: DateTime<Utc>,
}

/// Raw `user_responses` row.
#[derive(Debug, Clone, FromRow)]
pub struct SubmissionRow {
    pub id: i64,
    pub identifier: String,
    pub work_preference: String,
    pub creative_thinking: String,
    pub detail_oriented: String,
    pub enjoy_social_interaction: String,
    pub prefer_routine: String,
    pub hobby: String,
    pub personality_code: String,
    pub selected_industries: String,
    pub other_industry: String,
    pub selected_jobs: String,
    pub other_job: String,
    pub social_issue: String,
    pub dream: String,
    pub success_definition: String,
    pub career_plan: String,
    pub self_evaluation: String,
    pub job_experience: String,
    pub generated_report: String,
    pub profile: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<SubmissionRow> for StoredSubmission {
    type Error = crate::store::StoreError;

    fn try_from(row: SubmissionRow) -> Result<Self, Self::Error> {
        let profile = row.profile.parse::<ReportProfile>().map_err(|e| {
            crate::store::StoreError::Corrupt(format!("row {}: {e}", row.id))
        })?;

        Ok(StoredSubmission {
            id: row.id,
            input: SubmissionInput {
                identifier: row.identifier,
                work_preference: row.work_preference,
                creative_thinking: row.creative_thinking,
                detail_oriented: row.detail_oriented,
                enjoy_social_interaction: row.enjoy_social_interaction,
                prefer_routine: row.prefer_routine,
                hobby: row.hobby,
                personality_code: row.personality_code,
                selected_industries: LabelList::parse(&row.selected_industries),
                other_industry: row.other_industry,
                selected_jobs: LabelList::parse(&row.selected_jobs),
                other_job: row.other_job,
                social_issue: row.social_issue,
                dream: row.dream,
                success_definition: row.success_definition,
                career_plan: row.career_plan,
                self_evaluation: row.self_evaluation,
                job_experience: row.job_experience,
            },
            generated_report: row.generated_report,
            profile,
            created_at: row.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_list_preserves_order_and_drops_duplicates() {
        let list = LabelList::from_labels(["IT/소프트웨어", "금융", " IT/소프트웨어 ", "", "금융"]);
        assert_eq!(list.as_slice(), ["IT/소프트웨어", "금융"]);
    }

    #[test]
    fn test_label_list_column_round_trip() {
        let list = LabelList::from_labels(["IT/소프트웨어", "금융"]);
        let column = list.join();
        assert_eq!(column, "IT/소프트웨어,금융");
        assert_eq!(LabelList::parse(&column), list);
    }

    #[test]
    fn test_empty_column_is_empty_list() {
        assert!(LabelList::parse("").is_empty());
        assert_eq!(LabelList::default().join(), "");
    }

    #[test]
    fn test_delimiter_collision_detected() {
        let list = LabelList::from_labels(["디자이너", "작가,편집자"]);
        assert_eq!(list.find_delimiter_collision(), Some("작가,편집자"));
        assert!(LabelList::from_labels(["디자이너"])
            .find_delimiter_collision()
            .is_none());
    }

    #[test]
    fn test_row_with_unknown_profile_is_corrupt() {
        let row = SubmissionRow {
            id: 7,
            identifier: "민지".to_string(),
            work_preference: String::new(),
            creative_thinking: String::new(),
            detail_oriented: String::new(),
            enjoy_social_interaction: String::new(),
            prefer_routine: String::new(),
            hobby: String::new(),
            personality_code: String::new(),
            selected_industries: "금융".to_string(),
            other_industry: String::new(),
            selected_jobs: String::new(),
            other_job: String::new(),
            social_issue: String::new(),
            dream: String::new(),
            success_definition: String::new(),
            career_plan: String::new(),
            self_evaluation: String::new(),
            job_experience: String::new(),
            generated_report: String::new(),
            profile: "legacy".to_string(),
            created_at: Utc::now(),
        };
        assert!(StoredSubmission::try_from(row.clone()).is_err());

        let row = SubmissionRow {
            profile: "compact".to_string(),
            ..row
        };
        let stored = StoredSubmission::try_from(row).unwrap();
        assert_eq!(stored.profile, ReportProfile::Compact);
        assert_eq!(stored.input.selected_industries.as_slice(), ["금융"]);
    }
}
