//! Stat generation service - the generate/extract/validate pipeline
//!
//! One pipeline serves every subject kind:
//!
//! - Sanitizing the request's free-text fields
//! - Compiling the generation instruction for the subject's schema
//! - Calling the LLM backend under a timeout
//! - Extracting and validating the JSON payload, or falling back to defaults
//!
//! The only error surfaced to callers is an unreachable backend; everything
//! that goes wrong with the model's output is absorbed into valid data.

use std::time::Duration;

use crate::application::ports::outbound::{ChatMessage, FinishReason, LlmPort, LlmRequest};
use crate::application::services::input_sanitizer::SanitizedInput;
use crate::application::services::llm::{compile, extract};
use crate::application::services::stat_validator::{
    default_equipment_block, default_stat_block, defaults, validate, validate_equipment_block,
    validate_stat_block,
};
use crate::domain::entities::{EquipmentBlock, StatBlock, ValidatedBlock};
use crate::domain::value_objects::{EquipmentSlot, GenerationRequest};

/// Default cap on backend output, enough for a block with a few reasons
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 600;

/// Default wait for the backend before falling back to defaults
pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(60);

/// Service for generating validated stat blocks
///
/// # Example
///
/// ```ignore
/// use statforge_engine::application::services::StatGenerationService;
/// use statforge_engine::infrastructure::ollama::OllamaClient;
///
/// let client = OllamaClient::new("http://localhost:11434", "llama3.2");
/// let service = StatGenerationService::new(client);
///
/// let stats = service
///     .generate_character("Ella", "A brave, quick rogue with a deadly aim")
///     .await?;
/// ```
pub struct StatGenerationService<L: LlmPort> {
    llm: L,
    timeout: Duration,
    max_output_tokens: u32,
}

impl<L: LlmPort> StatGenerationService<L> {
    /// Create a new service with the default timeout and token budget
    pub fn new(llm: L) -> Self {
        Self {
            llm,
            timeout: DEFAULT_GENERATION_TIMEOUT,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    /// Run the pipeline for any subject kind
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<ValidatedBlock, GenerationError> {
        let block = match self.fetch_payload(request).await? {
            Some(payload) => validate(&payload, request.kind),
            None => defaults(request.kind),
        };
        Ok(block)
    }

    /// Generate a character stat block
    pub async fn generate_character(
        &self,
        name: &str,
        description: &str,
    ) -> Result<StatBlock, GenerationError> {
        let request = GenerationRequest::character(name, description);
        let block = match self.fetch_payload(&request).await? {
            Some(payload) => validate_stat_block(&payload),
            None => default_stat_block(),
        };
        Ok(block)
    }

    /// Generate the stat block of one piece of gear
    pub async fn generate_equipment(
        &self,
        slot: EquipmentSlot,
        name: &str,
        description: &str,
    ) -> Result<EquipmentBlock, GenerationError> {
        let request = GenerationRequest::equipment(slot, name, description);
        let block = match self.fetch_payload(&request).await? {
            Some(payload) => validate_equipment_block(&payload, slot),
            None => default_equipment_block(slot),
        };
        Ok(block)
    }

    /// Call the backend and extract its JSON payload.
    ///
    /// `Ok(None)` covers every recoverable failure (timeout, no JSON found);
    /// only a backend error is returned as `Err`.
    async fn fetch_payload(
        &self,
        request: &GenerationRequest,
    ) -> Result<Option<serde_json::Value>, GenerationError> {
        let input = SanitizedInput::from_request(request);
        let instruction = compile(request.kind, &input);

        let llm_request = LlmRequest::new(vec![ChatMessage::user(instruction)])
            .with_max_tokens(self.max_output_tokens);

        tracing::info!("Generating {} stats for '{}'", request.kind, input.name);

        let response = match tokio::time::timeout(self.timeout, self.llm.generate(llm_request)).await
        {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                tracing::error!("LLM backend failed for {}: {}", request.kind, e);
                return Err(GenerationError::BackendUnavailable(e.to_string()));
            }
            Err(_) => {
                tracing::warn!(
                    "LLM backend timed out after {:?} for {}, using defaults",
                    self.timeout,
                    request.kind
                );
                return Ok(None);
            }
        };

        tracing::debug!(
            "LLM returned {} chars for {} ({:?})",
            response.content.len(),
            request.kind,
            response.finish_reason
        );
        if let Some(usage) = &response.usage {
            tracing::debug!(
                "Token usage: {} prompt + {} completion = {}",
                usage.prompt_tokens,
                usage.completion_tokens,
                usage.total_tokens
            );
        }
        if response.finish_reason == FinishReason::Length {
            tracing::warn!("{} response hit the token limit, output may be cut off", request.kind);
        }

        let payload = extract(&response.content);
        if payload.is_none() {
            tracing::warn!("No JSON payload in {} response, using defaults", request.kind);
        }
        Ok(payload)
    }
}

/// Errors that can occur in the generation pipeline
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// The LLM backend could not be reached or rejected the request
    #[error("Generation backend unavailable: {0}")]
    BackendUnavailable(String),
}
