//! Prompt construction for quiz generation
//!
//! Builds the role-tagged message sequence sent to the generative-text
//! provider. Record summaries carry diagnosis, treatment, and chief
//! complaint only; notes and other PII-bearing fields are excluded by
//! construction.

use crate::adapters::provider::ChatMessage;
use crate::domain::{ClinicalRecord, Difficulty};
use serde::Serialize;

/// Number of questions requested per quiz.
pub const QUESTIONS_PER_QUIZ: usize = 5;

/// The slice of a clinical record that is allowed into the prompt
#[derive(Debug, Serialize)]
pub struct RecordSummary {
    /// 1-based position in the record selection
    pub index: usize,

    /// Diagnosis
    pub diagnosis: String,

    /// Treatment
    pub treatment: String,

    /// Chief complaint
    pub chief_complaint: String,
}

/// Projects records onto their prompt-safe summaries
pub fn summarize_records(records: &[ClinicalRecord]) -> Vec<RecordSummary> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| RecordSummary {
            index: i + 1,
            diagnosis: record.diagnosis.clone(),
            treatment: record.treatment.clone(),
            chief_complaint: record.chief_complaint.clone(),
        })
        .collect()
}

fn difficulty_phrase(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => "foundational",
        Difficulty::Medium => "intermediate-level",
        Difficulty::Hard => "advanced",
    }
}

/// Builds the message sequence for a quiz-generation request
pub fn build_messages(records: &[ClinicalRecord], difficulty: Difficulty) -> Vec<ChatMessage> {
    let summaries = summarize_records(records);
    let records_json = serde_json::to_string_pretty(&summaries)
        .unwrap_or_else(|_| "[]".to_string());

    let system = "You are a medical education expert who writes educational quizzes \
                  for physicians.";

    let user = format!(
        "Based on the patient records below, create a {phrase} quiz of exactly \
         {count} questions to check a physician's understanding.\n\n\
         Patient records:\n{records_json}\n\n\
         Respond with a JSON object in the following format:\n\
         {{\n\
         \x20 \"title\": \"Quiz title\",\n\
         \x20 \"description\": \"Quiz description\",\n\
         \x20 \"questions\": [\n\
         \x20   {{\n\
         \x20     \"question\": \"Question text\",\n\
         \x20     \"options\": [\"Option 1\", \"Option 2\", \"Option 3\", \"Option 4\"],\n\
         \x20     \"correct_answer\": 0,\n\
         \x20     \"explanation\": \"Why the answer is correct\"\n\
         \x20   }}\n\
         \x20 ],\n\
         \x20 \"difficulty\": \"{difficulty}\"\n\
         }}\n\n\
         Guidelines:\n\
         - Focus each question on a clinically important point\n\
         - Provide exactly 4 options per question\n\
         - Give correct_answer as an index from 0 to 3\n\
         - Make explanations detailed and educational\n\
         - Do not include any personally identifying information",
        phrase = difficulty_phrase(difficulty),
        count = QUESTIONS_PER_QUIZ,
        records_json = records_json,
        difficulty = difficulty,
    );

    vec![ChatMessage::system(system), ChatMessage::user(user)]
}
