//! Record Store: one row per submission, append-only.
//!
//! Rows are never updated or deleted. Identifiers are not unique; lookups
//! resolve duplicates by recency (highest row id wins).

use async_trait::async_trait;
use thiserror::Error;

use crate::models::submission::{NewSubmission, RecordId, StoredSubmission};

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgSubmissionStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Stored record is unreadable: {0}")]
    Corrupt(String),
}

/// Persistence seam for submissions. Carried in `AppState` as `Arc<dyn SubmissionStore>`.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Persists every field in one statement. Either the whole row lands or nothing does.
    async fn insert(&self, submission: &NewSubmission) -> Result<RecordId, StoreError>;

    /// Most recently inserted row for `identifier`. `Ok(None)` when there is none.
    async fn most_recent_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<StoredSubmission>, StoreError>;

    async fn find_by_id(&self, id: RecordId) -> Result<Option<StoredSubmission>, StoreError>;
}
