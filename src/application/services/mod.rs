//! Application services - Use case implementations
//!
//! Services accept their outbound ports as generic parameters and return
//! domain entities. The HTTP layer wires them to concrete adapters.

pub mod equipment_image_service;
pub mod image_caption_service;
pub mod input_sanitizer;
pub mod llm;
pub mod stat_generation_service;
pub mod stat_validator;

pub use equipment_image_service::{EquipmentImageService, ImageServiceError, ImageSettings};
pub use image_caption_service::ImageCaptionService;
pub use stat_generation_service::{GenerationError, StatGenerationService};
