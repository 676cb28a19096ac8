//! Image captioning bridge - English image prompts from free-text descriptions

use std::time::Duration;

use crate::application::ports::outbound::{ChatMessage, LlmPort, LlmRequest};
use crate::application::services::input_sanitizer::sanitize;
use crate::application::services::llm::{build_caption_prompt, first_line};
use crate::application::services::stat_generation_service::{
    GenerationError, DEFAULT_GENERATION_TIMEOUT,
};

const CAPTION_MAX_TOKENS: u32 = 200;

/// Translates equipment descriptions into English image-generation prompts
pub struct ImageCaptionService<L: LlmPort> {
    llm: L,
    timeout: Duration,
}

impl<L: LlmPort> ImageCaptionService<L> {
    pub fn new(llm: L) -> Self {
        Self {
            llm,
            timeout: DEFAULT_GENERATION_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// English rendering of `description`, unchanged if already English.
    ///
    /// An empty reply or a timeout falls back to the sanitized description
    /// itself; only a backend error is returned.
    pub async fn to_english_prompt(&self, description: &str) -> Result<String, GenerationError> {
        let description = sanitize(description);
        let request = LlmRequest::new(vec![ChatMessage::user(build_caption_prompt(&description))])
            .with_max_tokens(CAPTION_MAX_TOKENS)
            .with_temperature(0.2);

        let reply = match tokio::time::timeout(self.timeout, self.llm.generate(request)).await {
            Ok(Ok(response)) => response.content,
            Ok(Err(e)) => {
                tracing::error!("Caption backend failed: {}", e);
                return Err(GenerationError::BackendUnavailable(e.to_string()));
            }
            Err(_) => {
                tracing::warn!("Caption backend timed out, using description as-is");
                return Ok(description);
            }
        };

        Ok(first_line(&reply).unwrap_or(description))
    }
}
