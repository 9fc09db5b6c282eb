//! Quiz grading engine
//!
//! Scores a learner's submitted answers against a quiz's answer key.
//! Comparison is exact index equality; there is no partial credit.

use crate::domain::{
    AnswerSubmission, GradedAnswer, MedRecallError, Quiz, QuizResult, Result, ResultId,
};
use chrono::Utc;

/// Sentinel recorded as `selected_answer` for questions a short submission
/// left unanswered.
const UNANSWERED: i32 = -1;

/// Grades a submission against a quiz
///
/// The score denominator is always the quiz's question count, not the
/// submitted-answers count: a submission shorter than the quiz is graded
/// against the full quiz with the missing entries counted as incorrect.
/// A submission longer than the quiz cannot be graded and is rejected.
///
/// # Arguments
///
/// * `quiz` - The quiz with its answer key
/// * `submitted` - Answers in question order; may be shorter than the quiz
/// * `time_spent_seconds` - Total time reported for the attempt
///
/// # Errors
///
/// Returns [`MedRecallError::SubmissionMismatch`] when more answers are
/// submitted than the quiz has questions.
///
/// # Examples
///
/// ```
/// # use medrecall::domain::*;
/// # use medrecall::quiz::grade;
/// # use chrono::Utc;
/// # fn quiz_with_one_question() -> Quiz {
/// #     Quiz {
/// #         id: QuizId::generate(),
/// #         owner: UserId::new("user-1").unwrap(),
/// #         title: "t".into(),
/// #         description: String::new(),
/// #         questions: vec![QuizQuestion {
/// #             question: "q".into(),
/// #             options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
/// #             correct_answer: 2,
/// #             explanation: String::new(),
/// #         }],
/// #         source_record_ids: vec![],
/// #         difficulty: Difficulty::Medium,
/// #         created_at: Utc::now(),
/// #     }
/// # }
/// let quiz = quiz_with_one_question();
/// let submission = vec![AnswerSubmission { selected_answer: 2, time_spent_seconds: Some(10) }];
///
/// let result = grade(&quiz, &submission, 10).unwrap();
/// assert_eq!(result.score, 100);
/// ```
pub fn grade(
    quiz: &Quiz,
    submitted: &[AnswerSubmission],
    time_spent_seconds: u64,
) -> Result<QuizResult> {
    let total_questions = quiz.questions.len();

    if submitted.len() > total_questions {
        return Err(MedRecallError::SubmissionMismatch {
            submitted: submitted.len(),
            expected: total_questions,
        });
    }

    let answers: Vec<GradedAnswer> = quiz
        .questions
        .iter()
        .enumerate()
        .map(|(index, question)| match submitted.get(index) {
            Some(answer) => GradedAnswer {
                question_index: index,
                selected_answer: answer.selected_answer,
                is_correct: answer.selected_answer == question.correct_answer,
                time_spent_seconds: answer.time_spent_seconds.unwrap_or(0),
            },
            None => GradedAnswer {
                question_index: index,
                selected_answer: UNANSWERED,
                is_correct: false,
                time_spent_seconds: 0,
            },
        })
        .collect();

    let correct_count = answers.iter().filter(|a| a.is_correct).count();
    let score = if total_questions == 0 {
        0
    } else {
        ((correct_count as f64 / total_questions as f64) * 100.0).round() as u8
    };

    tracing::debug!(
        quiz_id = %quiz.id,
        correct = correct_count,
        total = total_questions,
        score = score,
        "Graded submission"
    );

    Ok(QuizResult {
        id: ResultId::generate(),
        owner: quiz.owner.clone(),
        quiz_id: quiz.id,
        answers,
        score,
        total_questions,
        completed_at: Utc::now(),
        time_spent_seconds,
    })
}
