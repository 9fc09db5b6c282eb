//! Quiz service
//!
//! Orchestrates quiz generation, owner-scoped reads, submission grading,
//! and statistics against the persistence collaborator. A quiz is persisted
//! only after the generated content passes validation; a result is written
//! exactly once per submission.

use crate::adapters::store::{QuizStore, RecordStore, ResultStore};
use crate::domain::ids::{QuizId, RecordId, UserId};
use crate::domain::{
    AnswerSubmission, Difficulty, MedRecallError, Quiz, QuizQuestion, QuizResult, Result,
};
use crate::quiz::{aggregate, grade, QuizGenerator, QuizStatistics};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

/// One entry of the answer key revealed after submission
#[derive(Debug, Clone, Serialize)]
pub struct AnswerKeyEntry {
    /// Question index
    pub question_index: usize,

    /// Correct option index
    pub correct_answer: i32,

    /// Explanation of the correct answer
    pub explanation: String,
}

/// Outcome of a quiz submission
///
/// Carries the persisted result together with the revealed answer key; the
/// stored quiz itself stays untouched.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionOutcome {
    /// The graded, persisted result
    pub result: QuizResult,

    /// Correct answers and explanations, in question order
    pub answer_key: Vec<AnswerKeyEntry>,
}

/// Service for quiz operations
pub struct QuizService {
    records: Arc<dyn RecordStore>,
    quizzes: Arc<dyn QuizStore>,
    results: Arc<dyn ResultStore>,
    generator: QuizGenerator,
}

impl QuizService {
    /// Creates a quiz service over the given stores and generator
    pub fn new(
        records: Arc<dyn RecordStore>,
        quizzes: Arc<dyn QuizStore>,
        results: Arc<dyn ResultStore>,
        generator: QuizGenerator,
    ) -> Self {
        Self {
            records,
            quizzes,
            results,
            generator,
        }
    }

    /// Generates and persists a quiz from the owner's records
    ///
    /// # Errors
    ///
    /// - [`MedRecallError::Validation`] when `record_ids` is empty
    /// - [`MedRecallError::NotFound`] when none of the ids resolve to a
    ///   record owned by the caller
    /// - [`MedRecallError::Generation`] when the provider fails or returns
    ///   a malformed quiz; nothing is persisted in that case
    pub async fn generate_quiz(
        &self,
        owner: &UserId,
        record_ids: &[RecordId],
        difficulty: Difficulty,
    ) -> Result<Quiz> {
        if record_ids.is_empty() {
            return Err(MedRecallError::Validation(
                "record ids are required".to_string(),
            ));
        }

        let records = self.records.find_records(owner, record_ids).await?;
        if records.is_empty() {
            return Err(MedRecallError::NotFound("no records found".to_string()));
        }

        let generated = self.generator.generate(&records, difficulty).await?;

        let quiz = Quiz {
            id: QuizId::generate(),
            owner: owner.clone(),
            title: generated.title.clone(),
            description: generated.description.clone(),
            questions: generated
                .questions
                .iter()
                .map(|q| QuizQuestion {
                    question: q.question.clone(),
                    options: q.options.clone(),
                    correct_answer: q.correct_answer,
                    explanation: q.explanation.clone(),
                })
                .collect(),
            source_record_ids: records.iter().map(|r| r.id).collect(),
            difficulty: generated.difficulty_or(difficulty),
            created_at: Utc::now(),
        };

        self.quizzes.insert_quiz(quiz.clone()).await?;

        tracing::info!(
            quiz_id = %quiz.id,
            question_count = quiz.question_count(),
            source_records = quiz.source_record_ids.len(),
            "Persisted generated quiz"
        );

        Ok(quiz)
    }

    /// Fetches a quiz, optionally with the answer key hidden
    ///
    /// # Errors
    ///
    /// Returns [`MedRecallError::NotFound`] when the quiz does not exist or
    /// belongs to a different owner.
    pub async fn get_quiz(&self, owner: &UserId, id: &QuizId, hide_answers: bool) -> Result<Quiz> {
        let quiz = self
            .quizzes
            .find_quiz(owner, id)
            .await?
            .ok_or_else(|| MedRecallError::NotFound("quiz not found".to_string()))?;

        Ok(if hide_answers {
            quiz.with_answers_hidden()
        } else {
            quiz
        })
    }

    /// Grades a submission, persists the result, and reveals the answer key
    ///
    /// # Errors
    ///
    /// - [`MedRecallError::NotFound`] when the quiz is missing
    /// - [`MedRecallError::SubmissionMismatch`] when more answers are
    ///   submitted than the quiz has questions
    pub async fn submit_quiz(
        &self,
        owner: &UserId,
        id: &QuizId,
        submitted: &[AnswerSubmission],
        time_spent_seconds: u64,
    ) -> Result<SubmissionOutcome> {
        let quiz = self
            .quizzes
            .find_quiz(owner, id)
            .await?
            .ok_or_else(|| MedRecallError::NotFound("quiz not found".to_string()))?;

        let result = grade(&quiz, submitted, time_spent_seconds)?;

        self.results.insert_result(result.clone()).await?;

        tracing::info!(
            quiz_id = %quiz.id,
            result_id = %result.id,
            score = result.score,
            "Recorded quiz submission"
        );

        let answer_key = quiz
            .questions
            .iter()
            .enumerate()
            .map(|(question_index, question)| AnswerKeyEntry {
                question_index,
                correct_answer: question.correct_answer,
                explanation: question.explanation.clone(),
            })
            .collect();

        Ok(SubmissionOutcome { result, answer_key })
    }

    /// Aggregates statistics over the owner's result history
    pub async fn statistics(&self, owner: &UserId) -> Result<QuizStatistics> {
        let results = self.results.list_results(owner).await?;
        Ok(aggregate(&results))
    }
}
