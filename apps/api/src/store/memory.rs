//! In-process store used by the pipeline and handler tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::models::submission::{NewSubmission, RecordId, StoredSubmission};
use crate::store::{StoreError, SubmissionStore};

#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<StoredSubmission>>,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every subsequent insert fails with a database error.
    pub fn failing_writes() -> Self {
        let store = Self::default();
        store.fail_writes.store(true, Ordering::SeqCst);
        store
    }

    /// Every subsequent lookup fails with a database error.
    pub fn failing_reads() -> Self {
        let store = Self::default();
        store.fail_reads.store(true, Ordering::SeqCst);
        store
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn check_read(&self) -> Result<(), StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl SubmissionStore for MemoryStore {
    async fn insert(&self, submission: &NewSubmission) -> Result<RecordId, StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        let mut rows = self.rows.lock().unwrap();
        let id = rows.len() as RecordId + 1;
        rows.push(StoredSubmission {
            id,
            input: submission.input.clone(),
            generated_report: submission.generated_report.clone(),
            profile: submission.profile,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn most_recent_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<StoredSubmission>, StoreError> {
        self.check_read()?;
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|r| r.input.identifier == identifier)
            .max_by_key(|r| r.id)
            .cloned())
    }

    async fn find_by_id(&self, id: RecordId) -> Result<Option<StoredSubmission>, StoreError> {
        self.check_read()?;
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|r| r.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::submission::{LabelList, SubmissionInput};
    use crate::recommendation::profile::ReportProfile;

    fn submission(identifier: &str, report: &str) -> NewSubmission {
        NewSubmission {
            input: SubmissionInput {
                identifier: identifier.to_string(),
                work_preference: "팀워크 중시".to_string(),
                personality_code: "ENFP".to_string(),
                selected_industries: LabelList::from_labels(["IT/소프트웨어", "금융"]),
                selected_jobs: LabelList::from_labels(["디자이너"]),
                dream: "모두가 배우는 세상".to_string(),
                ..Default::default()
            },
            generated_report: report.to_string(),
            profile: ReportProfile::Extended,
        }
    }

    #[tokio::test]
    async fn test_insert_then_lookup_round_trips_every_field() {
        let store = MemoryStore::new();
        let new = submission("민지", "1. 추천");
        let id = store.insert(&new).await.unwrap();

        let stored = store.most_recent_by_identifier("민지").await.unwrap().unwrap();
        assert_eq!(stored.id, id);
        assert_eq!(stored.input, new.input);
        assert_eq!(stored.generated_report, new.generated_report);
        assert_eq!(stored.profile, new.profile);
    }

    #[tokio::test]
    async fn test_lookup_prefers_most_recent_duplicate() {
        let store = MemoryStore::new();
        store.insert(&submission("민지", "first")).await.unwrap();
        store.insert(&submission("서연", "other")).await.unwrap();
        let second = store.insert(&submission("민지", "second")).await.unwrap();

        let stored = store.most_recent_by_identifier("민지").await.unwrap().unwrap();
        assert_eq!(stored.id, second);
        assert_eq!(stored.generated_report, "second");
    }

    #[tokio::test]
    async fn test_lookup_miss_is_none_not_error() {
        let store = MemoryStore::new();
        store.insert(&submission("민지", "x")).await.unwrap();
        assert!(store.most_recent_by_identifier("없음").await.unwrap().is_none());
        assert!(store.find_by_id(99).await.unwrap().is_none());
    }
}
