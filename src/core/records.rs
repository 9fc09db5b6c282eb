//! Clinical record service
//!
//! Orchestrates record creation, update, deletion, original-note recovery,
//! and record-side statistics. Redaction and sealing run synchronously
//! before anything is persisted: the store never sees an unredacted note
//! outside the vault's ciphertext.

use crate::adapters::store::RecordStore;
use crate::domain::ids::{PatientId, RecordId, UserId};
use crate::domain::{ClinicalRecord, MedRecallError, NewClinicalRecord, RecordUpdate, Result};
use crate::redaction::RedactionEngine;
use crate::vault::{EncryptionVault, NotesEnvelope};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// How many diagnoses/tags the statistics report at most.
const TOP_ENTRIES: usize = 10;

/// One counted value in record statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountEntry {
    /// The counted diagnosis or tag
    pub value: String,

    /// Number of records carrying it
    pub count: usize,
}

/// Aggregate statistics over a user's records
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordStatistics {
    /// Total record count
    pub total_records: usize,

    /// Up to ten most frequent diagnoses, descending
    pub top_diagnoses: Vec<CountEntry>,

    /// Up to ten most frequent tags, descending
    pub top_tags: Vec<CountEntry>,
}

/// Service for clinical record operations
///
/// # Example
///
/// ```no_run
/// use medrecall::adapters::store::InMemoryStore;
/// use medrecall::config::secret_string;
/// use medrecall::core::RecordService;
/// use medrecall::domain::{NewClinicalRecord, UserId};
/// use medrecall::vault::EncryptionVault;
/// use std::sync::Arc;
///
/// # async fn example() -> medrecall::domain::Result<()> {
/// let vault = EncryptionVault::new(&secret_string("server-secret".to_string()))?;
/// let service = RecordService::new(Arc::new(InMemoryStore::new()), vault);
///
/// let owner = UserId::new("user-1").unwrap();
/// let record = service
///     .create_record(
///         owner,
///         NewClinicalRecord {
///             chief_complaint: "Chest pain".to_string(),
///             diagnosis: "Angina".to_string(),
///             treatment: "Nitroglycerin".to_string(),
///             notes: Some("Contact 090-1234-5678".to_string()),
///             ..Default::default()
///         },
///     )
///     .await?;
///
/// assert_eq!(record.notes, "Contact ***-****-5678");
/// # Ok(())
/// # }
/// ```
pub struct RecordService {
    store: Arc<dyn RecordStore>,
    redactor: RedactionEngine,
    vault: EncryptionVault,
}

impl RecordService {
    /// Creates a record service over the given store and vault
    pub fn new(store: Arc<dyn RecordStore>, vault: EncryptionVault) -> Self {
        Self {
            store,
            redactor: RedactionEngine::new(),
            vault,
        }
    }

    /// Creates a clinical record
    ///
    /// Notes are redacted and the original is sealed before persistence.
    /// The patient identifier is generated here and never changes
    /// afterwards.
    ///
    /// # Errors
    ///
    /// - [`MedRecallError::Validation`] for missing required fields
    /// - [`MedRecallError::Storage`] if the write fails
    pub async fn create_record(
        &self,
        owner: UserId,
        input: NewClinicalRecord,
    ) -> Result<ClinicalRecord> {
        input.validate().map_err(MedRecallError::Validation)?;

        let now = Utc::now();

        let (notes, sealed_notes) = match input.notes.as_deref() {
            Some(original) if !original.is_empty() => (
                self.redactor.redact(original),
                Some(self.vault.seal_notes(original)?),
            ),
            _ => (String::new(), None),
        };

        let record = ClinicalRecord {
            id: RecordId::generate(),
            owner,
            patient_id: PatientId::generate(),
            date: input.date.unwrap_or(now),
            chief_complaint: input.chief_complaint,
            diagnosis: input.diagnosis,
            treatment: input.treatment,
            notes,
            medications: input.medications,
            follow_up_required: input.follow_up_required,
            follow_up_date: input.follow_up_date,
            sealed_notes,
            tags: normalize_tags(input.tags),
            created_at: now,
            updated_at: now,
        };

        self.store.insert_record(record.clone()).await?;

        tracing::info!(
            record_id = %record.id,
            patient_id = %record.patient_id,
            "Created clinical record"
        );

        Ok(record)
    }

    /// Fetches a record by owner and id
    ///
    /// # Errors
    ///
    /// Returns [`MedRecallError::NotFound`] when the record does not exist
    /// or belongs to a different owner.
    pub async fn get_record(&self, owner: &UserId, id: &RecordId) -> Result<ClinicalRecord> {
        self.store
            .find_record(owner, id)
            .await?
            .ok_or_else(|| MedRecallError::NotFound("record not found".to_string()))
    }

    /// Applies a partial update to a record
    ///
    /// A notes update is re-redacted; the sealed ciphertext from creation is
    /// left as is. The patient identifier cannot be updated.
    pub async fn update_record(
        &self,
        owner: &UserId,
        id: &RecordId,
        update: RecordUpdate,
    ) -> Result<ClinicalRecord> {
        let mut record = self.get_record(owner, id).await?;

        if let Some(date) = update.date {
            record.date = date;
        }
        if let Some(chief_complaint) = update.chief_complaint {
            record.chief_complaint = chief_complaint;
        }
        if let Some(diagnosis) = update.diagnosis {
            record.diagnosis = diagnosis;
        }
        if let Some(treatment) = update.treatment {
            record.treatment = treatment;
        }
        if let Some(notes) = update.notes {
            record.notes = self.redactor.redact(&notes);
        }
        if let Some(medications) = update.medications {
            record.medications = medications;
        }
        if let Some(follow_up_required) = update.follow_up_required {
            record.follow_up_required = follow_up_required;
        }
        if let Some(follow_up_date) = update.follow_up_date {
            record.follow_up_date = Some(follow_up_date);
        }
        if let Some(tags) = update.tags {
            record.tags = normalize_tags(tags);
        }
        record.updated_at = Utc::now();

        self.store.update_record(record.clone()).await?;

        tracing::info!(record_id = %record.id, "Updated clinical record");

        Ok(record)
    }

    /// Deletes a record
    ///
    /// Deletion is immediate and non-recoverable.
    ///
    /// # Errors
    ///
    /// Returns [`MedRecallError::NotFound`] when the record does not exist
    /// or belongs to a different owner.
    pub async fn delete_record(&self, owner: &UserId, id: &RecordId) -> Result<()> {
        let deleted = self.store.delete_record(owner, id).await?;
        if !deleted {
            return Err(MedRecallError::NotFound("record not found".to_string()));
        }

        tracing::info!(record_id = %id, "Deleted clinical record");
        Ok(())
    }

    /// Recovers the original, unredacted note from the sealed envelope
    ///
    /// This is not part of the default read path; the redacted note remains
    /// the system of record.
    ///
    /// # Errors
    ///
    /// - [`MedRecallError::NotFound`] when the record is missing
    /// - [`MedRecallError::Validation`] when the record has no sealed notes
    /// - [`MedRecallError::Decrypt`] when the ciphertext cannot be opened
    ///   under the current key (never silently swallowed)
    pub async fn recover_original_notes(
        &self,
        owner: &UserId,
        id: &RecordId,
    ) -> Result<NotesEnvelope> {
        let record = self.get_record(owner, id).await?;

        let sealed = record.sealed_notes.ok_or_else(|| {
            MedRecallError::Validation("record has no sealed original notes".to_string())
        })?;

        self.vault.open_notes(&sealed)
    }

    /// Computes statistics over all of the owner's records
    pub async fn statistics(&self, owner: &UserId) -> Result<RecordStatistics> {
        let records = self.store.list_records(owner).await?;

        let diagnoses = records.iter().map(|r| r.diagnosis.clone());
        let tags = records.iter().flat_map(|r| r.tags.iter().cloned());

        Ok(RecordStatistics {
            total_records: records.len(),
            top_diagnoses: top_counts(diagnoses),
            top_tags: top_counts(tags),
        })
    }
}

fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Counts values and returns the most frequent ones, descending.
/// Ties break alphabetically so the output is deterministic.
fn top_counts(values: impl Iterator<Item = String>) -> Vec<CountEntry> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }

    let mut entries: Vec<CountEntry> = counts
        .into_iter()
        .map(|(value, count)| CountEntry { value, count })
        .collect();

    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
    entries.truncate(TOP_ENTRIES);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_tags() {
        let tags = normalize_tags(vec![
            "  cardiology ".to_string(),
            String::new(),
            "urgent".to_string(),
        ]);
        assert_eq!(tags, vec!["cardiology".to_string(), "urgent".to_string()]);
    }

    #[test]
    fn test_top_counts_orders_and_truncates() {
        let values = vec![
            "flu", "flu", "flu", "cold", "cold", "asthma",
        ]
        .into_iter()
        .map(String::from);

        let entries = top_counts(values);

        assert_eq!(entries[0].value, "flu");
        assert_eq!(entries[0].count, 3);
        assert_eq!(entries[1].value, "cold");
        assert_eq!(entries[2].value, "asthma");
    }

    #[test]
    fn test_top_counts_ties_break_alphabetically() {
        let values = vec!["b", "a"].into_iter().map(String::from);
        let entries = top_counts(values);

        assert_eq!(entries[0].value, "a");
        assert_eq!(entries[1].value, "b");
    }

    #[test]
    fn test_top_counts_caps_at_ten() {
        let values = (0..15).map(|i| format!("diagnosis-{i:02}"));
        assert_eq!(top_counts(values).len(), 10);
    }
}
