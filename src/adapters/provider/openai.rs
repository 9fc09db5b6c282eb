//! OpenAI-compatible provider implementation
//!
//! Calls a chat-completions endpoint over HTTPS and returns the raw JSON
//! content of the first choice. The call completes or fails exactly once
//! per invocation; timeout and concurrency control belong to the caller.

use super::models::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ResponseFormat};
use super::TextCompletionProvider;
use crate::config::ProviderConfig;
use crate::domain::ProviderError;
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, StatusCode};
use secrecy::ExposeSecret;
use std::time::Duration;

/// Provider backed by an OpenAI-compatible chat-completions API
///
/// # Example
///
/// ```no_run
/// use medrecall::adapters::provider::{OpenAiProvider, TextCompletionProvider, ChatMessage};
/// use medrecall::config::ProviderConfig;
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = OpenAiProvider::new(&ProviderConfig::default());
/// let messages = vec![ChatMessage::user("Respond with a JSON object.")];
/// let content = provider
///     .complete_json(&messages, Duration::from_secs(30))
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct OpenAiProvider {
    /// Base URL of the provider API
    base_url: String,

    /// HTTP client for making requests
    client: Client,

    /// Provider configuration
    config: ProviderConfig,
}

impl OpenAiProvider {
    /// Creates a new provider from configuration
    pub fn new(config: &ProviderConfig) -> Self {
        let base_url = config.base_url.trim_end_matches('/').to_string();

        let client = ClientBuilder::new()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            base_url,
            client,
            config: config.clone(),
        }
    }

    /// Returns the base URL the provider was configured with
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl TextCompletionProvider for OpenAiProvider {
    async fn complete_json(
        &self,
        messages: &[ChatMessage],
        timeout: Duration,
    ) -> Result<String, ProviderError> {
        let url = format!("{}/v1/chat/completions", self.base_url);

        let body = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: messages.to_vec(),
            temperature: self.config.temperature,
            response_format: ResponseFormat::json_object(),
        };

        tracing::debug!(
            url = %url,
            model = %self.config.model,
            message_count = messages.len(),
            timeout_secs = timeout.as_secs(),
            "Requesting completion"
        );

        let mut request = self.client.post(&url).timeout(timeout).json(&body);

        if let Some(ref api_key) = self.config.api_key {
            request = request.header(
                "Authorization",
                format!("Bearer {}", api_key.expose_secret().as_ref()),
            );
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout(format!("no response within {}s", timeout.as_secs()))
            } else {
                ProviderError::ConnectionFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(match status {
                s if s.is_server_error() => ProviderError::ServerError {
                    status: s.as_u16(),
                    message,
                },
                StatusCode::TOO_MANY_REQUESTS => ProviderError::ServerError {
                    status: status.as_u16(),
                    message,
                },
                s => ProviderError::ClientError {
                    status: s.as_u16(),
                    message,
                },
            });
        }

        let completion = response
            .json::<ChatCompletionResponse>()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        completion.into_content().ok_or(ProviderError::EmptyResponse)
    }
}
