//! Quiz domain model
//!
//! Quizzes are created only by the quiz content generator and are immutable
//! once persisted. The single read-side variation is the answers-hidden
//! projection used while a learner is taking the quiz.

use crate::domain::ids::{QuizId, RecordId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sentinel written into `correct_answer` by the answers-hidden projection.
pub const HIDDEN_ANSWER: i32 = -1;

/// Number of answer options every question carries.
pub const OPTIONS_PER_QUESTION: usize = 4;

/// Quiz difficulty level
///
/// An input to quiz generation affecting prompt phrasing only; the generated
/// content is not separately validated for complexity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Foundational questions
    Easy,
    /// Intermediate questions
    #[default]
    Medium,
    /// Advanced questions
    Hard,
}

impl Difficulty {
    /// Returns the lowercase label used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!(
                "Invalid difficulty '{other}'. Must be one of: easy, medium, hard"
            )),
        }
    }
}

/// A single multiple-choice question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
    /// Question text
    pub question: String,

    /// Exactly four answer options, ordered
    pub options: Vec<String>,

    /// Index of the correct option (0-3), or [`HIDDEN_ANSWER`] in the
    /// answers-hidden projection
    pub correct_answer: i32,

    /// Explanation of the correct answer
    pub explanation: String,
}

/// A persisted quiz
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    /// Entity identifier
    pub id: QuizId,

    /// Owner identity
    pub owner: UserId,

    /// Quiz title
    pub title: String,

    /// Quiz description
    #[serde(default)]
    pub description: String,

    /// Ordered, non-empty question list
    pub questions: Vec<QuizQuestion>,

    /// Clinical records the quiz was derived from
    pub source_record_ids: Vec<RecordId>,

    /// Difficulty the quiz was generated at
    pub difficulty: Difficulty,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Quiz {
    /// Number of questions in the quiz
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Returns a copy of the quiz with answer keys removed
    ///
    /// Each question's `correct_answer` becomes [`HIDDEN_ANSWER`] and its
    /// explanation is cleared. This is a view-level transform; the stored
    /// quiz is untouched.
    pub fn with_answers_hidden(&self) -> Quiz {
        let mut hidden = self.clone();
        for question in &mut hidden.questions {
            question.correct_answer = HIDDEN_ANSWER;
            question.explanation = String::new();
        }
        hidden
    }
}
