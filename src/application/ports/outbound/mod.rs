//! Outbound ports - Interfaces that the application requires from external systems

mod image_gen_port;
mod llm_port;
mod storage_port;

pub use image_gen_port::{GeneratedImage, ImageGenError, ImageGenPort, ImageQuality, ImageRequest};
pub use llm_port::{
    ChatMessage, FinishReason, LlmError, LlmPort, LlmRequest, LlmResponse, TokenUsage,
};
pub use storage_port::{ObjectStoragePort, StorageError};
