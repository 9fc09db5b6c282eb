//! End-to-end tests for the quiz pipeline: generation against a mock
//! provider, answers-hidden reads, submission grading, and statistics.

use medrecall::adapters::provider::OpenAiProvider;
use medrecall::adapters::store::InMemoryStore;
use medrecall::config::{secret_string, ProviderConfig};
use medrecall::core::{QuizService, RecordService};
use medrecall::domain::{
    AnswerSubmission, Difficulty, GenerationError, MedRecallError, NewClinicalRecord, RecordId,
    UserId, HIDDEN_ANSWER,
};
use medrecall::quiz::QuizGenerator;
use medrecall::vault::EncryptionVault;
use std::sync::Arc;
use std::time::Duration;

struct Harness {
    records: RecordService,
    quizzes: QuizService,
}

fn harness(provider_base_url: String) -> Harness {
    let store = Arc::new(InMemoryStore::new());

    let vault = EncryptionVault::new(&secret_string("pipeline-test-key".to_string())).unwrap();
    let records = RecordService::new(store.clone(), vault);

    let provider_config = ProviderConfig {
        base_url: provider_base_url,
        ..Default::default()
    };
    let generator = QuizGenerator::new(
        Arc::new(OpenAiProvider::new(&provider_config)),
        Duration::from_secs(5),
    );
    let quizzes = QuizService::new(store.clone(), store.clone(), store, generator);

    Harness { records, quizzes }
}

fn owner() -> UserId {
    UserId::new("doctor-1").unwrap()
}

async fn seeded_record_ids(harness: &Harness, count: usize) -> Vec<RecordId> {
    let mut ids = Vec::new();
    for i in 0..count {
        let record = harness
            .records
            .create_record(
                owner(),
                NewClinicalRecord {
                    chief_complaint: format!("Complaint {i}"),
                    diagnosis: format!("Diagnosis {i}"),
                    treatment: format!("Treatment {i}"),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        ids.push(record.id);
    }
    ids
}

fn quiz_response_body() -> String {
    let quiz = serde_json::json!({
        "title": "Case review quiz",
        "description": "Generated from recent encounters",
        "questions": (0..5).map(|i| serde_json::json!({
            "question": format!("Question {i}?"),
            "options": ["A", "B", "C", "D"],
            "correct_answer": (i % 4) as i64,
            "explanation": format!("Explanation {i}")
        })).collect::<Vec<_>>(),
        "difficulty": "medium"
    });

    serde_json::json!({
        "choices": [{"message": {"content": quiz.to_string()}}]
    })
    .to_string()
}

#[tokio::test]
async fn test_generate_submit_and_aggregate() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(quiz_response_body())
        .create_async()
        .await;

    let harness = harness(server.url());
    let record_ids = seeded_record_ids(&harness, 3).await;

    // Generate and persist
    let quiz = harness
        .quizzes
        .generate_quiz(&owner(), &record_ids, Difficulty::Medium)
        .await
        .unwrap();

    assert_eq!(quiz.question_count(), 5);
    assert_eq!(quiz.source_record_ids.len(), 3);
    assert_eq!(quiz.difficulty, Difficulty::Medium);

    // Answers-hidden projection for quiz taking
    let hidden = harness
        .quizzes
        .get_quiz(&owner(), &quiz.id, true)
        .await
        .unwrap();
    assert!(hidden
        .questions
        .iter()
        .all(|q| q.correct_answer == HIDDEN_ANSWER && q.explanation.is_empty()));

    // The stored quiz still has its key
    let full = harness
        .quizzes
        .get_quiz(&owner(), &quiz.id, false)
        .await
        .unwrap();
    assert!(full.questions.iter().all(|q| q.correct_answer >= 0));

    // Submit a fully correct answer set
    let submission: Vec<AnswerSubmission> = full
        .questions
        .iter()
        .map(|q| AnswerSubmission {
            selected_answer: q.correct_answer,
            time_spent_seconds: Some(12),
        })
        .collect();

    let outcome = harness
        .quizzes
        .submit_quiz(&owner(), &quiz.id, &submission, 60)
        .await
        .unwrap();

    assert_eq!(outcome.result.score, 100);
    assert_eq!(outcome.result.total_questions, 5);
    assert_eq!(outcome.answer_key.len(), 5);
    assert_eq!(outcome.answer_key[0].explanation, "Explanation 0");

    // Submit an empty answer set: scores 0, does not fault
    let outcome = harness
        .quizzes
        .submit_quiz(&owner(), &quiz.id, &[], 0)
        .await
        .unwrap();
    assert_eq!(outcome.result.score, 0);

    // Statistics over both submissions
    let stats = harness.quizzes.statistics(&owner()).await.unwrap();
    assert_eq!(stats.total_quizzes, 2);
    assert_eq!(stats.average_score, 50);
    assert_eq!(stats.score_distribution.excellent, 1);
    assert_eq!(stats.score_distribution.poor, 1);
}

#[tokio::test]
async fn test_over_length_submission_rejected() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(quiz_response_body())
        .create_async()
        .await;

    let harness = harness(server.url());
    let record_ids = seeded_record_ids(&harness, 1).await;

    let quiz = harness
        .quizzes
        .generate_quiz(&owner(), &record_ids, Difficulty::Easy)
        .await
        .unwrap();

    let submission: Vec<AnswerSubmission> = (0..6)
        .map(|_| AnswerSubmission {
            selected_answer: 0,
            time_spent_seconds: None,
        })
        .collect();

    let result = harness
        .quizzes
        .submit_quiz(&owner(), &quiz.id, &submission, 30)
        .await;

    assert!(matches!(
        result,
        Err(MedRecallError::SubmissionMismatch {
            submitted: 6,
            expected: 5,
        })
    ));
}

#[tokio::test]
async fn test_malformed_provider_response_persists_nothing() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(r#"{"choices":[{"message":{"content":"{\"title\":\"no questions\"}"}}]}"#)
        .create_async()
        .await;

    let harness = harness(server.url());
    let record_ids = seeded_record_ids(&harness, 1).await;

    let result = harness
        .quizzes
        .generate_quiz(&owner(), &record_ids, Difficulty::Medium)
        .await;

    assert!(matches!(
        result,
        Err(MedRecallError::Generation(GenerationError::EmptyQuiz))
    ));

    // No quiz was persisted, so the owner's statistics stay empty
    let stats = harness.quizzes.statistics(&owner()).await.unwrap();
    assert_eq!(stats.total_quizzes, 0);
}

#[tokio::test]
async fn test_generate_requires_record_ids() {
    let server = mockito::Server::new_async().await;
    let harness = harness(server.url());

    let result = harness
        .quizzes
        .generate_quiz(&owner(), &[], Difficulty::Medium)
        .await;

    assert!(matches!(result, Err(MedRecallError::Validation(_))));
}

#[tokio::test]
async fn test_generate_with_foreign_records_not_found() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(quiz_response_body())
        .create_async()
        .await;

    let harness = harness(server.url());
    let record_ids = seeded_record_ids(&harness, 2).await;

    let stranger = UserId::new("doctor-2").unwrap();
    let result = harness
        .quizzes
        .generate_quiz(&stranger, &record_ids, Difficulty::Medium)
        .await;

    assert!(matches!(result, Err(MedRecallError::NotFound(_))));
}

#[tokio::test]
async fn test_quiz_read_scoped_to_owner() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(quiz_response_body())
        .create_async()
        .await;

    let harness = harness(server.url());
    let record_ids = seeded_record_ids(&harness, 1).await;

    let quiz = harness
        .quizzes
        .generate_quiz(&owner(), &record_ids, Difficulty::Medium)
        .await
        .unwrap();

    let stranger = UserId::new("doctor-2").unwrap();
    let result = harness.quizzes.get_quiz(&stranger, &quiz.id, false).await;

    assert!(matches!(result, Err(MedRecallError::NotFound(_))));
}
