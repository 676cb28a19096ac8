//! ComfyUI client for equipment image generation

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::ports::outbound::{
    GeneratedImage, ImageGenError, ImageGenPort, ImageQuality, ImageRequest,
};

pub const DEFAULT_CHECKPOINT: &str = "v1-5-pruned-emaonly.ckpt";

const POLL_ATTEMPTS: u32 = 120;
const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Client for ComfyUI API
#[derive(Clone)]
pub struct ComfyUIClient {
    client: Client,
    base_url: String,
    checkpoint: String,
}

impl ComfyUIClient {
    pub fn new(base_url: &str, checkpoint: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            checkpoint: checkpoint.to_string(),
        }
    }

    /// Queue a workflow for execution
    pub async fn queue_prompt(
        &self,
        workflow: serde_json::Value,
    ) -> Result<QueueResponse, ComfyUIError> {
        let request = QueuePromptRequest {
            prompt: workflow,
            client_id: Uuid::new_v4().to_string(),
        };

        let response = self
            .client
            .post(format!("{}/prompt", self.base_url))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(ComfyUIError::ApiError(error_text));
        }

        Ok(response.json().await?)
    }

    /// Get the history of a completed prompt
    pub async fn get_history(&self, prompt_id: &str) -> Result<HistoryResponse, ComfyUIError> {
        let response = self
            .client
            .get(format!("{}/history/{}", self.base_url, prompt_id))
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(ComfyUIError::ApiError(error_text));
        }

        Ok(response.json().await?)
    }

    /// Download a generated image
    pub async fn get_image(&self, image: &ImageOutput) -> Result<Vec<u8>, ComfyUIError> {
        let response = self
            .client
            .get(format!("{}/view", self.base_url))
            .query(&[
                ("filename", image.filename.as_str()),
                ("subfolder", image.subfolder.as_str()),
                ("type", image.r#type.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(ComfyUIError::ApiError(error_text));
        }

        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }

    /// Poll until the prompt completes; `None` if it finished without images
    async fn wait_for_completion(
        &self,
        prompt_id: &str,
    ) -> Result<Option<ImageOutput>, ComfyUIError> {
        for _ in 0..POLL_ATTEMPTS {
            let mut history = self.get_history(prompt_id).await?;

            if let Some(prompt) = history.prompts.remove(prompt_id) {
                if prompt.status.completed {
                    tracing::debug!("Prompt {} finished: {}", prompt_id, prompt.status.status_str);
                    return Ok(first_image(prompt));
                }
            }

            tokio::time::sleep(POLL_INTERVAL).await;
        }

        Err(ComfyUIError::TimedOut(prompt_id.to_string()))
    }

    /// Build the text-to-image workflow for a request
    fn build_workflow(&self, request: &ImageRequest) -> serde_json::Value {
        let steps = match request.quality {
            ImageQuality::Standard => 20,
            ImageQuality::Premium => 30,
        };

        serde_json::json!({
            "3": {
                "inputs": {
                    "seed": rand::random::<u32>(),
                    "steps": steps,
                    "cfg": 7.5,
                    "sampler_name": "euler",
                    "scheduler": "normal",
                    "denoise": 1.0,
                    "model": ["4", 0],
                    "positive": ["6", 0],
                    "negative": ["7", 0],
                    "latent_image": ["5", 0]
                },
                "class_type": "KSampler"
            },
            "4": {
                "inputs": {
                    "ckpt_name": self.checkpoint
                },
                "class_type": "CheckpointLoaderSimple"
            },
            "5": {
                "inputs": {
                    "width": request.width,
                    "height": request.height,
                    "batch_size": request.count.max(1)
                },
                "class_type": "EmptyLatentImage"
            },
            "6": {
                "inputs": {
                    "text": request.prompt,
                    "clip": ["4", 1]
                },
                "class_type": "CLIPTextEncode"
            },
            "7": {
                "inputs": {
                    "text": request.negative_prompt,
                    "clip": ["4", 1]
                },
                "class_type": "CLIPTextEncode"
            },
            "8": {
                "inputs": {
                    "samples": ["3", 0],
                    "vae": ["4", 2]
                },
                "class_type": "VAEDecode"
            },
            "9": {
                "inputs": {
                    "filename_prefix": "statforge",
                    "images": ["8", 0]
                },
                "class_type": "SaveImage"
            }
        })
    }
}

fn first_image(prompt: PromptHistory) -> Option<ImageOutput> {
    // Node ids are not ordered in the map; take the lowest one for stable output
    let mut outputs: Vec<(String, NodeOutput)> = prompt.outputs.into_iter().collect();
    outputs.sort_by(|a, b| a.0.cmp(&b.0));
    outputs
        .into_iter()
        .filter_map(|(_, output)| output.images)
        .flatten()
        .next()
}

pub(crate) fn content_type_for(filename: &str) -> &'static str {
    let lower = filename.to_lowercase();
    if lower.ends_with(".jpg") || lower.ends_with(".jpeg") {
        "image/jpeg"
    } else if lower.ends_with(".webp") {
        "image/webp"
    } else {
        "image/png"
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ComfyUIError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Prompt {0} did not complete in time")]
    TimedOut(String),
}

impl From<ComfyUIError> for ImageGenError {
    fn from(err: ComfyUIError) -> Self {
        match err {
            ComfyUIError::HttpError(e) if e.is_connect() => ImageGenError::Unavailable,
            other => ImageGenError::GenerationFailed(other.to_string()),
        }
    }
}

#[async_trait]
impl ImageGenPort for ComfyUIClient {
    async fn generate(&self, request: ImageRequest) -> Result<Option<GeneratedImage>, ImageGenError> {
        let workflow = self.build_workflow(&request);
        let queued = self.queue_prompt(workflow).await?;
        tracing::debug!("Queued ComfyUI prompt {}", queued.prompt_id);

        let Some(image) = self.wait_for_completion(&queued.prompt_id).await? else {
            tracing::warn!("ComfyUI prompt {} finished without images", queued.prompt_id);
            return Ok(None);
        };

        let image_data = self.get_image(&image).await?;
        Ok(Some(GeneratedImage {
            image_data,
            content_type: content_type_for(&image.filename).to_string(),
        }))
    }
}

// =============================================================================
// ComfyUI API types
// =============================================================================

#[derive(Debug, Serialize)]
struct QueuePromptRequest {
    prompt: serde_json::Value,
    client_id: String,
}

#[derive(Debug, Deserialize)]
pub struct QueueResponse {
    pub prompt_id: String,
}

#[derive(Debug, Deserialize)]
pub struct HistoryResponse {
    #[serde(flatten)]
    pub prompts: HashMap<String, PromptHistory>,
}

#[derive(Debug, Deserialize)]
pub struct PromptHistory {
    pub outputs: HashMap<String, NodeOutput>,
    pub status: PromptStatus,
}

#[derive(Debug, Deserialize)]
pub struct NodeOutput {
    pub images: Option<Vec<ImageOutput>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageOutput {
    pub filename: String,
    pub subfolder: String,
    pub r#type: String,
}

#[derive(Debug, Deserialize)]
pub struct PromptStatus {
    pub status_str: String,
    pub completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(quality: ImageQuality, count: u32) -> ImageRequest {
        ImageRequest {
            prompt: "A flaming longsword".to_string(),
            negative_prompt: "text, watermark".to_string(),
            width: 512,
            height: 768,
            quality,
            count,
        }
    }

    #[test]
    fn test_workflow_applies_request() {
        let client = ComfyUIClient::new("http://localhost:8188/", "dreamshaper_8.safetensors");
        let workflow = client.build_workflow(&request(ImageQuality::Premium, 3));

        assert_eq!(workflow["3"]["inputs"]["steps"], 30);
        assert_eq!(workflow["4"]["inputs"]["ckpt_name"], "dreamshaper_8.safetensors");
        assert_eq!(workflow["5"]["inputs"]["height"], 768);
        assert_eq!(workflow["5"]["inputs"]["batch_size"], 3);
        assert_eq!(workflow["6"]["inputs"]["text"], "A flaming longsword");
        assert_eq!(workflow["7"]["inputs"]["text"], "text, watermark");
    }

    #[test]
    fn test_workflow_standard_quality_single_image() {
        let client = ComfyUIClient::new("http://localhost:8188", DEFAULT_CHECKPOINT);
        let workflow = client.build_workflow(&request(ImageQuality::Standard, 0));

        assert_eq!(workflow["3"]["inputs"]["steps"], 20);
        assert_eq!(workflow["5"]["inputs"]["batch_size"], 1);
    }

    #[test]
    fn test_first_image_from_history() {
        let body = r#"{
            "abc": {
                "outputs": {
                    "9": {"images": [{"filename": "statforge_00001_.png", "subfolder": "", "type": "output"}]},
                    "12": {"images": null}
                },
                "status": {"status_str": "success", "completed": true}
            }
        }"#;
        let mut history: HistoryResponse = serde_json::from_str(body).unwrap();
        let image = first_image(history.prompts.remove("abc").unwrap()).unwrap();
        assert_eq!(image.filename, "statforge_00001_.png");

        let empty = r#"{"outputs": {}, "status": {"status_str": "success", "completed": true}}"#;
        assert!(first_image(serde_json::from_str(empty).unwrap()).is_none());
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("a.PNG"), "image/png");
        assert_eq!(content_type_for("a.jpeg"), "image/jpeg");
        assert_eq!(content_type_for("a.jpg"), "image/jpeg");
    }
}
