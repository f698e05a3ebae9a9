//! LLM module - chat capability backends
//!
//! Provides the `ChatCapability` abstraction with Ollama and OpenAI-compatible
//! implementations, and the factory that picks one from configuration.

pub mod history;
pub mod ollama;
pub mod openai;
pub mod traits;

pub use history::History;
pub use ollama::OllamaCapability;
pub use openai::OpenAiCapability;
pub use traits::{ChatCapability, ChatOptions};

use crate::core::{Config, ProviderType, Result};

/// Create a new, unconfigured capability based on configuration
pub fn create_capability(config: &Config) -> Result<Box<dyn ChatCapability>> {
    let capability: Box<dyn ChatCapability> = match config.effective_provider() {
        ProviderType::Ollama => Box::new(OllamaCapability::from_config(config)?),
        ProviderType::OpenAi => Box::new(OpenAiCapability::from_config(config)?),
    };
    Ok(capability)
}
