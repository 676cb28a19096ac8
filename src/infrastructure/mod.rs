//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - HTTP: REST API routes
//! - Ollama: LLM backend for stat generation and captioning
//! - ComfyUI: Equipment image generation
//! - Asset storage: Filesystem publishing of generated images
//! - Config: Application configuration
//! - State: Shared application state

pub mod asset_storage;
pub mod comfyui;
pub mod config;
pub mod http;
pub mod ollama;
pub mod state;
