//! Equipment image service - caption, render and publish one item image

use crate::application::ports::outbound::{
    ImageGenError, ImageGenPort, ImageQuality, ImageRequest, LlmPort, ObjectStoragePort,
};
use crate::application::services::image_caption_service::ImageCaptionService;
use crate::application::services::stat_generation_service::GenerationError;

/// Appended to every caption so the render is a clean item icon
pub const STYLE_SUFFIX: &str = "single object centered, isolated on plain white background, \
     no people, no hands, no scenery, game item icon, highly detailed, no text, no watermark";

pub const NEGATIVE_PROMPT: &str = "human, person, hands, face, background scenery, multiple objects, \
     text, letters, watermark, logo, signature, blurry, low quality";

/// Render settings applied to every equipment image
#[derive(Debug, Clone, Copy)]
pub struct ImageSettings {
    pub width: u32,
    pub height: u32,
    pub quality: ImageQuality,
    pub count: u32,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            quality: ImageQuality::Standard,
            count: 1,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ImageServiceError {
    #[error(transparent)]
    Caption(#[from] GenerationError),
    #[error("Image backend unavailable: {0}")]
    Backend(#[from] ImageGenError),
    #[error("Image service produced no image")]
    NoImageProduced,
}

pub struct EquipmentImageService<L: LlmPort, I: ImageGenPort, S: ObjectStoragePort> {
    captions: ImageCaptionService<L>,
    images: I,
    storage: S,
    settings: ImageSettings,
}

impl<L: LlmPort, I: ImageGenPort, S: ObjectStoragePort> EquipmentImageService<L, I, S> {
    pub fn new(captions: ImageCaptionService<L>, images: I, storage: S) -> Self {
        Self {
            captions,
            images,
            storage,
            settings: ImageSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: ImageSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Full image prompt for a description: English caption plus the fixed style
    pub async fn build_prompt(&self, description: &str) -> Result<String, GenerationError> {
        let caption = self.captions.to_english_prompt(description).await?;
        Ok(format!("{}, {}", caption, STYLE_SUFFIX))
    }

    /// Render an image for `description` and publish it.
    ///
    /// Returns the public URL, or `Ok(None)` when the image was rendered but
    /// could not be stored.
    pub async fn generate(&self, description: &str) -> Result<Option<String>, ImageServiceError> {
        let prompt = self.build_prompt(description).await?;
        tracing::debug!("Equipment image prompt: {}", prompt);

        let request = ImageRequest {
            prompt,
            negative_prompt: NEGATIVE_PROMPT.to_string(),
            width: self.settings.width,
            height: self.settings.height,
            quality: self.settings.quality,
            count: self.settings.count,
        };

        let image = self
            .images
            .generate(request)
            .await?
            .ok_or(ImageServiceError::NoImageProduced)?;

        match self.storage.put(image.image_data, &image.content_type).await {
            Ok(url) => {
                tracing::info!("Stored equipment image at {}", url);
                Ok(Some(url))
            }
            Err(e) => {
                tracing::warn!("Failed to store equipment image: {}", e);
                Ok(None)
            }
        }
    }
}
