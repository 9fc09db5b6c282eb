//! Business logic services
//!
//! The services here orchestrate the leaf components (redaction, vault,
//! generator, grading, statistics) against the persistence collaborator:
//!
//! - [`records`] - clinical record lifecycle and original-note recovery
//! - [`quizzes`] - quiz generation, reads, submissions, statistics

pub mod quizzes;
pub mod records;

pub use quizzes::{AnswerKeyEntry, QuizService, SubmissionOutcome};
pub use records::{CountEntry, RecordService, RecordStatistics};
