//! Chat capability trait
//!
//! The orchestration core only ever talks to this trait, so backends can be
//! swapped by configuration (Ollama, OpenAI-compatible, test doubles).

use async_trait::async_trait;

use crate::core::{ChatMessage, Result};

/// Options a capability is configured with before the first chat
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatOptions {
    /// Model identifier
    pub model: String,
    /// Reserved for backends that execute proposed code themselves
    ///
    /// The Ollama and OpenAI backends never run code; they only return the
    /// proposal, so they ignore this flag.
    pub auto_run: bool,
    /// Verbose request/response logging
    pub debug: bool,
    /// Backend runs on the local machine
    pub local: bool,
    /// Proposed actions need operator approval before they are accepted
    pub require_approval: bool,
    /// Persona and instructions sent as the system message
    pub system_prompt: String,
}

/// A conversational backend owned by exactly one agent
///
/// Implementations keep their own conversation history between calls.
#[async_trait]
pub trait ChatCapability: Send + Sync {
    /// Apply options; resets nothing else
    fn configure(&mut self, options: ChatOptions);

    /// Current options
    fn options(&self) -> &ChatOptions;

    /// Send one prompt, returning the messages produced for it in order
    async fn chat(&mut self, prompt: &str) -> Result<Vec<ChatMessage>>;

    /// Release any resources held by the backend
    async fn cleanup(&mut self) -> Result<()> {
        Ok(())
    }

    /// Get the provider name
    fn name(&self) -> &str;
}
