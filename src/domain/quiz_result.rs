//! Quiz result domain model
//!
//! A result is written exactly once per submission and is immutable
//! thereafter.

use crate::domain::ids::{QuizId, ResultId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One answer as submitted by the learner
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerSubmission {
    /// Index of the selected option
    pub selected_answer: i32,

    /// Seconds spent on the question; treated as 0 when absent
    pub time_spent_seconds: Option<u64>,
}

/// One graded answer as recorded on the result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradedAnswer {
    /// Index of the question this answer belongs to
    pub question_index: usize,

    /// Index of the selected option, or -1 when the question was left
    /// unanswered by a short submission
    pub selected_answer: i32,

    /// Whether the selected option matched the answer key
    pub is_correct: bool,

    /// Seconds spent on the question
    pub time_spent_seconds: u64,
}

/// A persisted quiz result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizResult {
    /// Entity identifier
    pub id: ResultId,

    /// Owner identity (the submitting user)
    pub owner: UserId,

    /// Quiz this result grades
    pub quiz_id: QuizId,

    /// One graded answer per quiz question, in question order
    pub answers: Vec<GradedAnswer>,

    /// Rounded percentage of correct answers over the quiz's question count
    pub score: u8,

    /// Question count of the quiz at submission time
    pub total_questions: usize,

    /// Completion timestamp
    pub completed_at: DateTime<Utc>,

    /// Total seconds spent on the quiz
    pub time_spent_seconds: u64,
}

impl QuizResult {
    /// Number of correctly answered questions
    pub fn correct_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_correct).count()
    }
}
