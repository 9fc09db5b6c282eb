//! Result type alias for medrecall
//!
//! This module provides a convenient Result type alias that uses
//! MedRecallError as the error type.

use super::errors::MedRecallError;

/// Result type alias for medrecall operations
///
/// This is a convenience type alias that uses `MedRecallError` as the error
/// type. Use this throughout the codebase for fallible operations.
///
/// # Examples
///
/// ```
/// use medrecall::domain::result::Result;
/// use medrecall::domain::errors::MedRecallError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(MedRecallError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, MedRecallError>;
