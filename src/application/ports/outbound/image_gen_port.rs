use std::sync::Arc;

use async_trait::async_trait;

/// Rendering effort requested from the image service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageQuality {
    #[default]
    Standard,
    Premium,
}

/// Image generation request
#[derive(Debug, Clone)]
pub struct ImageRequest {
    pub prompt: String,
    pub negative_prompt: String,
    pub width: u32,
    pub height: u32,
    pub quality: ImageQuality,
    /// Number of candidates to render; the first one is returned
    pub count: u32,
}

#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub image_data: Vec<u8>,
    /// MIME type, e.g. "image/png"
    pub content_type: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ImageGenError {
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
    #[error("Service unavailable")]
    Unavailable,
}

/// Image generation backend
///
/// `Ok(None)` means the service finished the job but produced no image, which
/// callers report separately from transport failures.
#[async_trait]
pub trait ImageGenPort: Send + Sync {
    async fn generate(&self, request: ImageRequest) -> Result<Option<GeneratedImage>, ImageGenError>;
}

#[async_trait]
impl<T: ImageGenPort + ?Sized> ImageGenPort for Arc<T> {
    async fn generate(&self, request: ImageRequest) -> Result<Option<GeneratedImage>, ImageGenError> {
        (**self).generate(request).await
    }
}
