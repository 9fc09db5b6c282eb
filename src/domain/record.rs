//! Clinical record domain model
//!
//! A clinical record is the physician-authored account of one patient
//! encounter. Free-text notes are stored in redacted form only; the original
//! note survives solely inside the sealed ciphertext produced by the vault.

use crate::domain::ids::{PatientId, RecordId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted clinical record
///
/// Invariants upheld by the record service:
/// - `notes` never contains unredacted name/phone/email/address patterns
/// - `patient_id` is assigned once at creation and never mutated
/// - `sealed_notes`, if present, decrypts only with the server's current key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicalRecord {
    /// Entity identifier
    pub id: RecordId,

    /// Owner identity; every operation is scoped to it
    pub owner: UserId,

    /// External patient-record identifier (immutable after creation)
    pub patient_id: PatientId,

    /// Encounter date
    pub date: DateTime<Utc>,

    /// Chief complaint
    pub chief_complaint: String,

    /// Diagnosis
    pub diagnosis: String,

    /// Treatment
    pub treatment: String,

    /// Redacted free-text notes (may be empty)
    #[serde(default)]
    pub notes: String,

    /// Ordered medication list
    #[serde(default)]
    pub medications: Vec<String>,

    /// Whether a follow-up encounter is required
    #[serde(default)]
    pub follow_up_required: bool,

    /// Scheduled follow-up date, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_up_date: Option<DateTime<Utc>>,

    /// Sealed ciphertext of the original, unredacted notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sealed_notes: Option<String>,

    /// Free-form tags
    #[serde(default)]
    pub tags: Vec<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last-update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a clinical record
///
/// Notes arrive unredacted here; the record service redacts and seals them
/// before anything is persisted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewClinicalRecord {
    /// Encounter date; defaults to the time of creation
    pub date: Option<DateTime<Utc>>,

    /// Chief complaint (required, non-blank)
    pub chief_complaint: String,

    /// Diagnosis (required, non-blank)
    pub diagnosis: String,

    /// Treatment (required, non-blank)
    pub treatment: String,

    /// Unredacted free-text notes
    pub notes: Option<String>,

    /// Ordered medication list
    #[serde(default)]
    pub medications: Vec<String>,

    /// Whether a follow-up encounter is required
    #[serde(default)]
    pub follow_up_required: bool,

    /// Scheduled follow-up date, if any
    pub follow_up_date: Option<DateTime<Utc>>,

    /// Free-form tags
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NewClinicalRecord {
    /// Validates required fields
    ///
    /// # Errors
    ///
    /// Returns a description of the first missing field.
    pub fn validate(&self) -> Result<(), String> {
        if self.chief_complaint.trim().is_empty() {
            return Err("chief_complaint is required".to_string());
        }
        if self.diagnosis.trim().is_empty() {
            return Err("diagnosis is required".to_string());
        }
        if self.treatment.trim().is_empty() {
            return Err("treatment is required".to_string());
        }
        Ok(())
    }
}

/// Partial update for a clinical record
///
/// Absent fields are left untouched. The patient identifier is deliberately
/// not representable here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordUpdate {
    /// New encounter date
    pub date: Option<DateTime<Utc>>,

    /// New chief complaint
    pub chief_complaint: Option<String>,

    /// New diagnosis
    pub diagnosis: Option<String>,

    /// New treatment
    pub treatment: Option<String>,

    /// New unredacted notes; re-redacted before persistence
    pub notes: Option<String>,

    /// New medication list
    pub medications: Option<Vec<String>>,

    /// New follow-up flag
    pub follow_up_required: Option<bool>,

    /// New follow-up date
    pub follow_up_date: Option<DateTime<Utc>>,

    /// New tag set
    pub tags: Option<Vec<String>>,
}

impl RecordUpdate {
    /// True if no field is set
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.chief_complaint.is_none()
            && self.diagnosis.is_none()
            && self.treatment.is_none()
            && self.notes.is_none()
            && self.medications.is_none()
            && self.follow_up_required.is_none()
            && self.follow_up_date.is_none()
            && self.tags.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> NewClinicalRecord {
        NewClinicalRecord {
            chief_complaint: "Persistent cough for two weeks".to_string(),
            diagnosis: "Acute bronchitis".to_string(),
            treatment: "Rest, fluids, bronchodilator".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(valid_input().validate().is_ok());
    }

    #[test]
    fn test_blank_chief_complaint_rejected() {
        let mut input = valid_input();
        input.chief_complaint = "   ".to_string();
        let err = input.validate().unwrap_err();
        assert!(err.contains("chief_complaint"));
    }

    #[test]
    fn test_blank_diagnosis_rejected() {
        let mut input = valid_input();
        input.diagnosis = String::new();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_blank_treatment_rejected() {
        let mut input = valid_input();
        input.treatment = String::new();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_empty_update_detected() {
        assert!(RecordUpdate::default().is_empty());

        let update = RecordUpdate {
            diagnosis: Some("Pneumonia".to_string()),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
