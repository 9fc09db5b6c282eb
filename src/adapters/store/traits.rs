//! Persistence abstraction traits
//!
//! These traits define the interface the core expects from its persistence
//! collaborator. The store is treated as strongly consistent: a write is
//! immediately visible to subsequent reads. Every lookup is scoped to an
//! owner identity; a miss and a hit on another owner's entity are
//! indistinguishable to callers.

use crate::domain::ids::{QuizId, RecordId, UserId};
use crate::domain::{ClinicalRecord, Quiz, QuizResult, Result};
use async_trait::async_trait;

/// Storage for clinical records
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persists a new record
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write fails.
    async fn insert_record(&self, record: ClinicalRecord) -> Result<()>;

    /// Finds a record by owner and id
    ///
    /// Returns `Ok(None)` when the record does not exist or belongs to a
    /// different owner.
    async fn find_record(&self, owner: &UserId, id: &RecordId) -> Result<Option<ClinicalRecord>>;

    /// Finds the subset of `ids` that exist and belong to `owner`
    ///
    /// Missing or foreign ids are silently omitted from the result.
    async fn find_records(&self, owner: &UserId, ids: &[RecordId]) -> Result<Vec<ClinicalRecord>>;

    /// Lists all records belonging to `owner`
    async fn list_records(&self, owner: &UserId) -> Result<Vec<ClinicalRecord>>;

    /// Replaces a previously persisted record
    ///
    /// # Errors
    ///
    /// Returns a storage error if the record was never inserted.
    async fn update_record(&self, record: ClinicalRecord) -> Result<()>;

    /// Deletes a record by owner and id
    ///
    /// Returns `true` if a record was deleted. Deletion is immediate and
    /// non-recoverable.
    async fn delete_record(&self, owner: &UserId, id: &RecordId) -> Result<bool>;
}

/// Storage for quizzes
///
/// Quizzes are immutable once created; there is deliberately no update
/// method.
#[async_trait]
pub trait QuizStore: Send + Sync {
    /// Persists a new quiz
    async fn insert_quiz(&self, quiz: Quiz) -> Result<()>;

    /// Finds a quiz by owner and id
    ///
    /// Returns `Ok(None)` when the quiz does not exist or belongs to a
    /// different owner.
    async fn find_quiz(&self, owner: &UserId, id: &QuizId) -> Result<Option<Quiz>>;
}

/// Storage for quiz results
///
/// Results are written exactly once per submission and never updated.
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Persists a new result
    async fn insert_result(&self, result: QuizResult) -> Result<()>;

    /// Lists all results belonging to `owner`
    async fn list_results(&self, owner: &UserId) -> Result<Vec<QuizResult>>;
}
