//! In-memory store implementation
//!
//! Backs the store traits with `RwLock`-guarded maps. Used by the test
//! suites and by embedding callers that need a store without external
//! infrastructure.

use super::traits::{QuizStore, RecordStore, ResultStore};
use crate::domain::ids::{QuizId, RecordId, ResultId, UserId};
use crate::domain::{ClinicalRecord, MedRecallError, Quiz, QuizResult, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory implementation of all three store traits
#[derive(Default)]
pub struct InMemoryStore {
    records: RwLock<HashMap<RecordId, ClinicalRecord>>,
    quizzes: RwLock<HashMap<QuizId, Quiz>>,
    results: RwLock<HashMap<ResultId, QuizResult>>,
}

impl InMemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn insert_record(&self, record: ClinicalRecord) -> Result<()> {
        self.records.write().await.insert(record.id, record);
        Ok(())
    }

    async fn find_record(&self, owner: &UserId, id: &RecordId) -> Result<Option<ClinicalRecord>> {
        let records = self.records.read().await;
        Ok(records
            .get(id)
            .filter(|record| record.owner == *owner)
            .cloned())
    }

    async fn find_records(&self, owner: &UserId, ids: &[RecordId]) -> Result<Vec<ClinicalRecord>> {
        let records = self.records.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| records.get(id))
            .filter(|record| record.owner == *owner)
            .cloned()
            .collect())
    }

    async fn list_records(&self, owner: &UserId) -> Result<Vec<ClinicalRecord>> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .filter(|record| record.owner == *owner)
            .cloned()
            .collect())
    }

    async fn update_record(&self, record: ClinicalRecord) -> Result<()> {
        let mut records = self.records.write().await;
        if !records.contains_key(&record.id) {
            return Err(MedRecallError::Storage(format!(
                "cannot update unknown record {}",
                record.id
            )));
        }
        records.insert(record.id, record);
        Ok(())
    }

    async fn delete_record(&self, owner: &UserId, id: &RecordId) -> Result<bool> {
        let mut records = self.records.write().await;
        let owned = records
            .get(id)
            .map(|record| record.owner == *owner)
            .unwrap_or(false);

        if owned {
            records.remove(id);
        }
        Ok(owned)
    }
}

#[async_trait]
impl QuizStore for InMemoryStore {
    async fn insert_quiz(&self, quiz: Quiz) -> Result<()> {
        self.quizzes.write().await.insert(quiz.id, quiz);
        Ok(())
    }

    async fn find_quiz(&self, owner: &UserId, id: &QuizId) -> Result<Option<Quiz>> {
        let quizzes = self.quizzes.read().await;
        Ok(quizzes.get(id).filter(|quiz| quiz.owner == *owner).cloned())
    }
}

#[async_trait]
impl ResultStore for InMemoryStore {
    async fn insert_result(&self, result: QuizResult) -> Result<()> {
        self.results.write().await.insert(result.id, result);
        Ok(())
    }

    async fn list_results(&self, owner: &UserId) -> Result<Vec<QuizResult>> {
        let results = self.results.read().await;
        let mut owned: Vec<QuizResult> = results
            .values()
            .filter(|result| result.owner == *owner)
            .cloned()
            .collect();

        // Stable order for callers: newest first
        owned.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        Ok(owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PatientId;
    use chrono::Utc;

    fn sample_record(owner: &UserId) -> ClinicalRecord {
        ClinicalRecord {
            id: RecordId::generate(),
            owner: owner.clone(),
            patient_id: PatientId::generate(),
            date: Utc::now(),
            chief_complaint: "Headache".to_string(),
            diagnosis: "Tension headache".to_string(),
            treatment: "Analgesics".to_string(),
            notes: String::new(),
            medications: vec![],
            follow_up_required: false,
            follow_up_date: None,
            sealed_notes: None,
            tags: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find_record() {
        let store = InMemoryStore::new();
        let owner = UserId::new("user-1").unwrap();
        let record = sample_record(&owner);
        let id = record.id;

        store.insert_record(record).await.unwrap();

        let found = store.find_record(&owner, &id).await.unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn test_find_record_scoped_to_owner() {
        let store = InMemoryStore::new();
        let owner = UserId::new("user-1").unwrap();
        let other = UserId::new("user-2").unwrap();
        let record = sample_record(&owner);
        let id = record.id;

        store.insert_record(record).await.unwrap();

        assert!(store.find_record(&other, &id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_records_omits_foreign_ids() {
        let store = InMemoryStore::new();
        let owner = UserId::new("user-1").unwrap();
        let other = UserId::new("user-2").unwrap();

        let mine = sample_record(&owner);
        let theirs = sample_record(&other);
        let ids = vec![mine.id, theirs.id, RecordId::generate()];

        store.insert_record(mine).await.unwrap();
        store.insert_record(theirs).await.unwrap();

        let found = store.find_records(&owner, &ids).await.unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_update_unknown_record_fails() {
        let store = InMemoryStore::new();
        let owner = UserId::new("user-1").unwrap();
        let record = sample_record(&owner);

        let result = store.update_record(record).await;
        assert!(matches!(result, Err(MedRecallError::Storage(_))));
    }

    #[tokio::test]
    async fn test_delete_record_scoped_to_owner() {
        let store = InMemoryStore::new();
        let owner = UserId::new("user-1").unwrap();
        let other = UserId::new("user-2").unwrap();
        let record = sample_record(&owner);
        let id = record.id;

        store.insert_record(record).await.unwrap();

        assert!(!store.delete_record(&other, &id).await.unwrap());
        assert!(store.delete_record(&owner, &id).await.unwrap());
        assert!(store.find_record(&owner, &id).await.unwrap().is_none());
    }
}
