//! LLM prompt construction and response parsing

pub mod prompt_builder;
pub mod response_parser;

pub use prompt_builder::{build_caption_prompt, compile};
pub use response_parser::{extract, first_line};
