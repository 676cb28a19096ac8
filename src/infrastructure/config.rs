//! Application configuration

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::application::ports::outbound::ImageQuality;
use crate::application::services::ImageSettings;
use crate::infrastructure::comfyui::DEFAULT_CHECKPOINT;

/// Application configuration
///
/// Layered from built-in defaults, an optional `statforge.toml` in the working
/// directory, then environment variables (`OLLAMA_BASE_URL`, `SERVER_PORT`, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Ollama API base URL (OpenAI-compatible)
    pub ollama_base_url: String,
    /// Model used for stat generation and captioning
    pub ollama_model: String,

    /// ComfyUI server URL
    pub comfyui_base_url: String,
    /// Checkpoint loaded by the image workflow
    pub comfyui_checkpoint: String,

    /// Directory generated images are written to
    pub asset_dir: PathBuf,
    /// URL prefix under which `asset_dir` is served
    pub public_asset_base_url: String,

    /// HTTP server port
    pub server_port: u16,

    /// Seconds to wait for the LLM before falling back to defaults
    pub generation_timeout_secs: u64,
    pub max_output_tokens: u32,

    pub image_width: u32,
    pub image_height: u32,
    /// "standard" or "premium"
    pub image_quality: String,
    pub image_count: u32,
}

impl AppConfig {
    /// Load configuration from defaults, `statforge.toml` and the environment
    pub fn load() -> Result<Self> {
        Self::builder()?
            .add_source(File::with_name("statforge").required(false))
            .add_source(Environment::default().try_parsing(true))
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        let builder = Config::builder()
            .set_default("ollama_base_url", "http://localhost:11434")?
            .set_default("ollama_model", "llama3.2")?
            .set_default("comfyui_base_url", "http://localhost:8188")?
            .set_default("comfyui_checkpoint", DEFAULT_CHECKPOINT)?
            .set_default("asset_dir", "./data/assets")?
            .set_default("public_asset_base_url", "http://localhost:3000/assets")?
            .set_default("server_port", 3000)?
            .set_default("generation_timeout_secs", 60)?
            .set_default("max_output_tokens", 600)?
            .set_default("image_width", 512)?
            .set_default("image_height", 512)?
            .set_default("image_quality", "standard")?
            .set_default("image_count", 1)?;
        Ok(builder)
    }

    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }

    pub fn image_settings(&self) -> Result<ImageSettings> {
        let quality = match self.image_quality.trim().to_lowercase().as_str() {
            "standard" => ImageQuality::Standard,
            "premium" => ImageQuality::Premium,
            other => anyhow::bail!("IMAGE_QUALITY must be 'standard' or 'premium', got '{}'", other),
        };

        Ok(ImageSettings {
            width: self.image_width,
            height: self.image_height,
            quality,
            count: self.image_count.max(1),
        })
    }
}
