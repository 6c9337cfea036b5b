use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use crate::models::submission::{
    NewSubmission, RecordId, StoredSubmission, SubmissionRow,
};
use crate::store::{StoreError, SubmissionStore};

const SELECT_COLUMNS: &str = r#"
    SELECT id, identifier, work_preference, creative_thinking, detail_oriented,
           enjoy_social_interaction, prefer_routine, hobby, personality_code,
           selected_industries, other_industry, selected_jobs, other_job,
           social_issue, dream, success_definition, career_plan,
           self_evaluation, job_experience, generated_report, profile, created_at
    FROM user_responses
"#;

/// `user_responses` table on PostgreSQL.
#[derive(Clone)]
pub struct PgSubmissionStore {
    pool: PgPool,
}

impl PgSubmissionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubmissionStore for PgSubmissionStore {
    async fn insert(&self, submission: &NewSubmission) -> Result<RecordId, StoreError> {
        let input = &submission.input;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO user_responses
                (identifier, work_preference, creative_thinking, detail_oriented,
                 enjoy_social_interaction, prefer_routine, hobby, personality_code,
                 selected_industries, other_industry, selected_jobs, other_job,
                 social_issue, dream, success_definition, career_plan,
                 self_evaluation, job_experience, generated_report, profile)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                    $11, $12, $13, $14, $15, $16, $17, $18, $19, $20)
            RETURNING id
            "#,
        )
        .bind(&input.identifier)
        .bind(&input.work_preference)
        .bind(&input.creative_thinking)
        .bind(&input.detail_oriented)
        .bind(&input.enjoy_social_interaction)
        .bind(&input.prefer_routine)
        .bind(&input.hobby)
        .bind(&input.personality_code)
        .bind(input.selected_industries.join())
        .bind(&input.other_industry)
        .bind(input.selected_jobs.join())
        .bind(&input.other_job)
        .bind(&input.social_issue)
        .bind(&input.dream)
        .bind(&input.success_definition)
        .bind(&input.career_plan)
        .bind(&input.self_evaluation)
        .bind(&input.job_experience)
        .bind(&submission.generated_report)
        .bind(submission.profile.as_str())
        .fetch_one(&self.pool)
        .await?;

        info!("Inserted submission {id}");
        Ok(id)
    }

    async fn most_recent_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<StoredSubmission>, StoreError> {
        let query = format!("{SELECT_COLUMNS} WHERE identifier = $1 ORDER BY id DESC LIMIT 1");
        sqlx::query_as::<_, SubmissionRow>(&query)
            .bind(identifier)
            .fetch_optional(&self.pool)
            .await?
            .map(StoredSubmission::try_from)
            .transpose()
    }

    async fn find_by_id(&self, id: RecordId) -> Result<Option<StoredSubmission>, StoreError> {
        let query = format!("{SELECT_COLUMNS} WHERE id = $1");
        sqlx::query_as::<_, SubmissionRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(StoredSubmission::try_from)
            .transpose()
    }
}
