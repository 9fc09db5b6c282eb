//! Generative-text provider boundary
//!
//! The core talks to the provider through [`TextCompletionProvider`]: a
//! role-tagged message sequence goes in, a JSON-formatted payload comes
//! back, or a typed [`ProviderError`]. The trait carries no retry,
//! backpressure, or cancellation; each call completes or fails exactly
//! once.

pub mod models;
pub mod openai;

pub use models::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ChatRole};
pub use openai::OpenAiProvider;

use crate::domain::ProviderError;
use async_trait::async_trait;
use std::time::Duration;

/// Contract for the external generative-text provider
///
/// Implementations must return the raw content string of a JSON-formatted
/// completion. Schema validation of that content belongs to the caller.
#[async_trait]
pub trait TextCompletionProvider: Send + Sync {
    /// Requests a JSON-formatted completion for the given messages
    ///
    /// # Arguments
    ///
    /// * `messages` - Role-tagged conversation to send
    /// * `timeout` - Upper bound on the round trip; exceeding it fails the
    ///   call with [`ProviderError::Timeout`]
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] if the call fails, times out, or yields
    /// no content. Never retried internally.
    async fn complete_json(
        &self,
        messages: &[ChatMessage],
        timeout: Duration,
    ) -> Result<String, ProviderError>;
}
