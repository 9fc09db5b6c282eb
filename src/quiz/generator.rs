//! Quiz content generator
//!
//! Turns a set of clinical records into a structured quiz by prompting the
//! generative-text provider and validating the JSON it returns. The
//! operation fails fast: there is no retry, and a malformed response never
//! produces a quiz.

use super::prompt::build_messages;
use crate::adapters::provider::TextCompletionProvider;
use crate::domain::{
    ClinicalRecord, Difficulty, GenerationError, MedRecallError, Result, OPTIONS_PER_QUESTION,
};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// One question as generated by the provider
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedQuestion {
    /// Question text
    pub question: String,

    /// Answer options; must be exactly four
    pub options: Vec<String>,

    /// Index of the correct option; must be 0-3
    pub correct_answer: i32,

    /// Explanation of the correct answer
    #[serde(default)]
    pub explanation: String,
}

/// A structurally valid generated quiz
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedQuiz {
    /// Quiz title
    pub title: String,

    /// Quiz description
    #[serde(default)]
    pub description: String,

    /// Generated questions
    #[serde(default)]
    pub questions: Vec<GeneratedQuestion>,

    /// Difficulty echoed by the provider; absent on some responses
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
}

impl GeneratedQuiz {
    /// The echoed difficulty, or `fallback` when the provider omitted it
    pub fn difficulty_or(&self, fallback: Difficulty) -> Difficulty {
        self.difficulty.unwrap_or(fallback)
    }
}

/// Generator for quizzes derived from clinical records
///
/// # Example
///
/// ```no_run
/// use medrecall::adapters::provider::{OpenAiProvider, TextCompletionProvider};
/// use medrecall::config::ProviderConfig;
/// use medrecall::domain::Difficulty;
/// use medrecall::quiz::QuizGenerator;
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// # async fn example(records: Vec<medrecall::domain::ClinicalRecord>)
/// #     -> medrecall::domain::Result<()> {
/// let provider = Arc::new(OpenAiProvider::new(&ProviderConfig::default()));
/// let generator = QuizGenerator::new(provider, Duration::from_secs(30));
///
/// let quiz = generator.generate(&records, Difficulty::Medium).await?;
/// println!("Generated {} questions", quiz.questions.len());
/// # Ok(())
/// # }
/// ```
pub struct QuizGenerator {
    provider: Arc<dyn TextCompletionProvider>,
    timeout: Duration,
}

impl QuizGenerator {
    /// Creates a generator over the given provider
    ///
    /// # Arguments
    ///
    /// * `provider` - Generative-text provider to call
    /// * `timeout` - Per-call timeout forwarded to the provider
    pub fn new(provider: Arc<dyn TextCompletionProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    /// Generates a quiz from the given records
    ///
    /// # Errors
    ///
    /// - [`MedRecallError::Validation`] when `records` is empty
    /// - [`MedRecallError::Generation`] when the provider call fails or the
    ///   response violates the quiz shape; nothing is persisted in that case
    pub async fn generate(
        &self,
        records: &[ClinicalRecord],
        difficulty: Difficulty,
    ) -> Result<GeneratedQuiz> {
        if records.is_empty() {
            return Err(MedRecallError::Validation(
                "at least one clinical record is required for quiz generation".to_string(),
            ));
        }

        let messages = build_messages(records, difficulty);

        tracing::debug!(
            record_count = records.len(),
            difficulty = %difficulty,
            "Requesting quiz generation"
        );

        let content = self
            .provider
            .complete_json(&messages, self.timeout)
            .await
            .map_err(GenerationError::Provider)?;

        let quiz: GeneratedQuiz = serde_json::from_str(&content)
            .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

        validate_generated(&quiz)?;

        tracing::info!(
            question_count = quiz.questions.len(),
            difficulty = %quiz.difficulty_or(difficulty),
            "Generated quiz"
        );

        Ok(quiz)
    }
}

/// Checks the structural invariants of a generated quiz
fn validate_generated(quiz: &GeneratedQuiz) -> std::result::Result<(), GenerationError> {
    if quiz.questions.is_empty() {
        return Err(GenerationError::EmptyQuiz);
    }

    for (index, question) in quiz.questions.iter().enumerate() {
        if question.question.trim().is_empty() {
            return Err(GenerationError::InvalidQuestion {
                index,
                reason: "question text is empty".to_string(),
            });
        }
        if question.options.len() != OPTIONS_PER_QUESTION {
            return Err(GenerationError::InvalidQuestion {
                index,
                reason: format!(
                    "expected {OPTIONS_PER_QUESTION} options, got {}",
                    question.options.len()
                ),
            });
        }
        let max_index = OPTIONS_PER_QUESTION as i32 - 1;
        if !(0..=max_index).contains(&question.correct_answer) {
            return Err(GenerationError::InvalidQuestion {
                index,
                reason: format!(
                    "correct_answer {} is out of range 0-{max_index}",
                    question.correct_answer
                ),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::provider::ChatMessage;
    use crate::domain::{PatientId, ProviderError, RecordId, UserId};
    use async_trait::async_trait;
    use chrono::Utc;

    /// Provider stub returning a canned payload
    struct FixedProvider {
        content: std::result::Result<String, ProviderError>,
    }

    #[async_trait]
    impl TextCompletionProvider for FixedProvider {
        async fn complete_json(
            &self,
            _messages: &[ChatMessage],
            _timeout: Duration,
        ) -> std::result::Result<String, ProviderError> {
            match &self.content {
                Ok(content) => Ok(content.clone()),
                Err(ProviderError::EmptyResponse) => Err(ProviderError::EmptyResponse),
                Err(e) => Err(ProviderError::InvalidResponse(e.to_string())),
            }
        }
    }

    fn generator_with(content: std::result::Result<String, ProviderError>) -> QuizGenerator {
        QuizGenerator::new(
            Arc::new(FixedProvider { content }),
            Duration::from_secs(5),
        )
    }

    fn sample_records() -> Vec<ClinicalRecord> {
        vec![ClinicalRecord {
            id: RecordId::generate(),
            owner: UserId::new("user-1").unwrap(),
            patient_id: PatientId::generate(),
            date: Utc::now(),
            chief_complaint: "Fever and chills".to_string(),
            diagnosis: "Influenza".to_string(),
            treatment: "Oseltamivir".to_string(),
            notes: String::new(),
            medications: vec![],
            follow_up_required: false,
            follow_up_date: None,
            sealed_notes: None,
            tags: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }]
    }

    fn valid_quiz_json() -> String {
        r#"{
            "title": "Influenza management",
            "description": "Questions on recent influenza encounters",
            "questions": [
                {
                    "question": "First-line antiviral for influenza?",
                    "options": ["Oseltamivir", "Acyclovir", "Ribavirin", "Remdesivir"],
                    "correct_answer": 0,
                    "explanation": "Oseltamivir is the standard choice."
                }
            ],
            "difficulty": "medium"
        }"#
        .to_string()
    }

    #[tokio::test]
    async fn test_generate_success() {
        let generator = generator_with(Ok(valid_quiz_json()));
        let quiz = generator
            .generate(&sample_records(), Difficulty::Medium)
            .await
            .unwrap();

        assert_eq!(quiz.title, "Influenza management");
        assert_eq!(quiz.questions.len(), 1);
        assert_eq!(quiz.difficulty_or(Difficulty::Easy), Difficulty::Medium);
    }

    #[tokio::test]
    async fn test_generate_rejects_empty_records() {
        let generator = generator_with(Ok(valid_quiz_json()));
        let result = generator.generate(&[], Difficulty::Medium).await;

        assert!(matches!(result, Err(MedRecallError::Validation(_))));
    }

    #[tokio::test]
    async fn test_generate_rejects_missing_questions_field() {
        let generator = generator_with(Ok(r#"{"title": "No questions here"}"#.to_string()));
        let result = generator.generate(&sample_records(), Difficulty::Medium).await;

        assert!(matches!(
            result,
            Err(MedRecallError::Generation(GenerationError::EmptyQuiz))
        ));
    }

    #[tokio::test]
    async fn test_generate_rejects_empty_questions_array() {
        let generator =
            generator_with(Ok(r#"{"title": "Empty", "questions": []}"#.to_string()));
        let result = generator.generate(&sample_records(), Difficulty::Medium).await;

        assert!(matches!(
            result,
            Err(MedRecallError::Generation(GenerationError::EmptyQuiz))
        ));
    }

    #[tokio::test]
    async fn test_generate_rejects_non_json_response() {
        let generator = generator_with(Ok("I'm sorry, I can't do that".to_string()));
        let result = generator.generate(&sample_records(), Difficulty::Medium).await;

        assert!(matches!(
            result,
            Err(MedRecallError::Generation(
                GenerationError::MalformedResponse(_)
            ))
        ));
    }

    #[tokio::test]
    async fn test_generate_rejects_wrong_option_count() {
        let json = r#"{
            "title": "Bad options",
            "questions": [
                {
                    "question": "Pick one",
                    "options": ["A", "B"],
                    "correct_answer": 0,
                    "explanation": ""
                }
            ]
        }"#;
        let generator = generator_with(Ok(json.to_string()));
        let result = generator.generate(&sample_records(), Difficulty::Medium).await;

        assert!(matches!(
            result,
            Err(MedRecallError::Generation(
                GenerationError::InvalidQuestion { index: 0, .. }
            ))
        ));
    }

    #[tokio::test]
    async fn test_generate_rejects_out_of_range_answer() {
        let json = r#"{
            "title": "Bad index",
            "questions": [
                {
                    "question": "Pick one",
                    "options": ["A", "B", "C", "D"],
                    "correct_answer": 4,
                    "explanation": ""
                }
            ]
        }"#;
        let generator = generator_with(Ok(json.to_string()));
        let result = generator.generate(&sample_records(), Difficulty::Medium).await;

        assert!(matches!(
            result,
            Err(MedRecallError::Generation(
                GenerationError::InvalidQuestion { index: 0, .. }
            ))
        ));
    }

    #[tokio::test]
    async fn test_generate_surfaces_provider_failure() {
        let generator = generator_with(Err(ProviderError::EmptyResponse));
        let result = generator.generate(&sample_records(), Difficulty::Medium).await;

        assert!(matches!(
            result,
            Err(MedRecallError::Generation(GenerationError::Provider(_)))
        ));
    }

    #[tokio::test]
    async fn test_difficulty_fallback_when_omitted() {
        let json = r#"{
            "title": "No difficulty",
            "questions": [
                {
                    "question": "Pick one",
                    "options": ["A", "B", "C", "D"],
                    "correct_answer": 2,
                    "explanation": "C is right"
                }
            ]
        }"#;
        let generator = generator_with(Ok(json.to_string()));
        let quiz = generator
            .generate(&sample_records(), Difficulty::Hard)
            .await
            .unwrap();

        assert_eq!(quiz.difficulty_or(Difficulty::Hard), Difficulty::Hard);
    }
}
