//! Domain models and types for medrecall.
//!
//! This module contains the core domain models, types, and business rules.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`UserId`], [`RecordId`], [`QuizId`],
//!   [`ResultId`], [`PatientId`])
//! - **Domain models** ([`ClinicalRecord`], [`Quiz`], [`QuizResult`])
//! - **Error types** ([`MedRecallError`], [`GenerationError`],
//!   [`ProviderError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! Identifiers use the newtype pattern so different ID kinds cannot be mixed:
//!
//! ```rust
//! use medrecall::domain::{RecordId, QuizId};
//!
//! let record_id = RecordId::generate();
//! let quiz_id = QuizId::generate();
//!
//! // This won't compile - type safety prevents mixing IDs
//! // let wrong: RecordId = quiz_id;  // Compile error!
//! ```
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T>`]:
//!
//! ```rust
//! use medrecall::domain::{MedRecallError, Result};
//!
//! fn example(input: &str) -> Result<()> {
//!     if input.is_empty() {
//!         return Err(MedRecallError::Validation("input is empty".into()));
//!     }
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod ids;
pub mod quiz;
pub mod quiz_result;
pub mod record;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{GenerationError, MedRecallError, ProviderError};
pub use ids::{PatientId, QuizId, RecordId, ResultId, UserId};
pub use quiz::{Difficulty, Quiz, QuizQuestion, HIDDEN_ANSWER, OPTIONS_PER_QUESTION};
pub use quiz_result::{AnswerSubmission, GradedAnswer, QuizResult};
pub use record::{ClinicalRecord, NewClinicalRecord, RecordUpdate};
pub use result::Result;
