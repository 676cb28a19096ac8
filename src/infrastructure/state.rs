//! Shared application state

use std::sync::Arc;

use anyhow::Result;

use crate::application::ports::outbound::{ImageGenPort, LlmPort, ObjectStoragePort};
use crate::application::services::{
    EquipmentImageService, ImageCaptionService, StatGenerationService,
};
use crate::infrastructure::asset_storage::LocalAssetStorage;
use crate::infrastructure::comfyui::ComfyUIClient;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::ollama::OllamaClient;

pub type SharedLlm = Arc<dyn LlmPort>;
pub type SharedImageGen = Arc<dyn ImageGenPort>;
pub type SharedStorage = Arc<dyn ObjectStoragePort>;

/// Shared application state
pub struct AppState {
    // Application services
    pub stat_service: StatGenerationService<SharedLlm>,
    pub image_service: EquipmentImageService<SharedLlm, SharedImageGen, SharedStorage>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Result<Self> {
        // Initialize Ollama client
        let llm: SharedLlm = Arc::new(OllamaClient::new(
            &config.ollama_base_url,
            &config.ollama_model,
        ));

        // Initialize ComfyUI client
        let images: SharedImageGen = Arc::new(ComfyUIClient::new(
            &config.comfyui_base_url,
            &config.comfyui_checkpoint,
        ));

        let storage: SharedStorage = Arc::new(LocalAssetStorage::new(
            config.asset_dir.clone(),
            &config.public_asset_base_url,
        ));

        Self::with_ports(config, llm, images, storage)
    }

    /// Build the services around the given adapters
    pub fn with_ports(
        config: &AppConfig,
        llm: SharedLlm,
        images: SharedImageGen,
        storage: SharedStorage,
    ) -> Result<Self> {
        let stat_service = StatGenerationService::new(llm.clone())
            .with_timeout(config.generation_timeout())
            .with_max_output_tokens(config.max_output_tokens);

        let captions = ImageCaptionService::new(llm).with_timeout(config.generation_timeout());
        let image_service = EquipmentImageService::new(captions, images, storage)
            .with_settings(config.image_settings()?);

        Ok(Self {
            stat_service,
            image_service,
        })
    }
}
