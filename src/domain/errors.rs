//! Domain error types
//!
//! This module defines the error hierarchy for medrecall. All errors are
//! domain-specific and don't expose third-party types (HTTP client errors,
//! cipher errors) to callers.

use thiserror::Error;

/// Main medrecall error type
///
/// This is the primary error type used throughout the crate. It wraps
/// specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum MedRecallError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Malformed or missing required input fields
    #[error("Validation error: {0}")]
    Validation(String),

    /// Referenced entity does not exist or is not owned by the caller.
    ///
    /// Intentionally does not distinguish "doesn't exist" from "not yours"
    /// to avoid leaking the existence of other users' entities.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Quiz generation failed (provider failure or schema violation)
    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    /// Sealed ciphertext could not be opened under the current key
    #[error("Decrypt error: {0}")]
    Decrypt(String),

    /// Submitted answers exceed the quiz's question count
    #[error("Submission mismatch: submitted {submitted} answers for a quiz with {expected} questions")]
    SubmissionMismatch { submitted: usize, expected: usize },

    /// Persistence collaborator errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Generation-specific errors
///
/// Errors raised while turning clinical records into a quiz. A failure here
/// means no quiz is persisted; the operation is never retried internally.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The provider call itself failed
    #[error("Provider request failed: {0}")]
    Provider(#[from] ProviderError),

    /// The provider returned content that is not a JSON object
    #[error("Provider response is not valid JSON: {0}")]
    MalformedResponse(String),

    /// The generated quiz has no questions
    #[error("Generated quiz has no questions")]
    EmptyQuiz,

    /// A generated question violates the quiz shape
    #[error("Generated question {index} is invalid: {reason}")]
    InvalidQuestion { index: usize, reason: String },
}

/// Generative-text provider errors
///
/// Errors that occur when calling the external provider. These errors don't
/// expose the underlying HTTP client types.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Failed to connect to the provider
    #[error("Failed to connect to provider: {0}")]
    ConnectionFailed(String),

    /// Request timed out
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// The provider returned a response with no content
    #[error("Provider returned no content")]
    EmptyResponse,

    /// Invalid response from the provider
    #[error("Invalid response from provider: {0}")]
    InvalidResponse(String),
}

// A provider failure surfaces as a generation failure at the crate boundary.
impl From<ProviderError> for MedRecallError {
    fn from(err: ProviderError) -> Self {
        MedRecallError::Generation(GenerationError::Provider(err))
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for MedRecallError {
    fn from(err: std::io::Error) -> Self {
        MedRecallError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for MedRecallError {
    fn from(err: serde_json::Error) -> Self {
        MedRecallError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for MedRecallError {
    fn from(err: toml::de::Error) -> Self {
        MedRecallError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MedRecallError::Validation("chief complaint is required".to_string());
        assert_eq!(
            err.to_string(),
            "Validation error: chief complaint is required"
        );
    }

    #[test]
    fn test_provider_error_conversion() {
        let provider_err = ProviderError::Timeout("30s elapsed".to_string());
        let err: MedRecallError = provider_err.into();
        assert!(matches!(
            err,
            MedRecallError::Generation(GenerationError::Provider(_))
        ));
    }

    #[test]
    fn test_generation_error_conversion() {
        let gen_err = GenerationError::EmptyQuiz;
        let err: MedRecallError = gen_err.into();
        assert!(matches!(err, MedRecallError::Generation(_)));
    }

    #[test]
    fn test_submission_mismatch_display() {
        let err = MedRecallError::SubmissionMismatch {
            submitted: 7,
            expected: 5,
        };
        assert!(err.to_string().contains("submitted 7"));
        assert!(err.to_string().contains("5 questions"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: MedRecallError = io_err.into();
        assert!(matches!(err, MedRecallError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: MedRecallError = json_err.into();
        assert!(matches!(err, MedRecallError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: MedRecallError = toml_err.into();
        assert!(matches!(err, MedRecallError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_errors_implement_std_error() {
        let err = MedRecallError::Decrypt("bad tag".to_string());
        let _: &dyn std::error::Error = &err;

        let err = ProviderError::EmptyResponse;
        let _: &dyn std::error::Error = &err;
    }
}
