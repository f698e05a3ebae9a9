//! Conversation history kept by each capability
//!
//! Maintains chat history with a configurable limit. The system prompt is held
//! apart and always sent first.

use std::collections::VecDeque;

use crate::core::ChatMessage;

/// Bounded chat history
#[derive(Debug, Clone)]
pub struct History {
    messages: VecDeque<ChatMessage>,
    max_length: usize,
    system_prompt: Option<String>,
}

impl History {
    pub fn new(max_length: usize) -> Self {
        Self {
            messages: VecDeque::new(),
            max_length,
            system_prompt: None,
        }
    }

    /// Set the system prompt; an empty prompt clears it
    pub fn set_system_prompt(&mut self, prompt: impl Into<String>) {
        let prompt = prompt.into();
        self.system_prompt = if prompt.is_empty() { None } else { Some(prompt) };
    }

    pub fn add_user(&mut self, content: impl Into<String>) {
        self.push(ChatMessage::user(content));
    }

    /// Add a message and maintain size limit; the newest message is always kept
    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push_back(message);

        while self.messages.len() > self.max_length.max(1) {
            self.messages.pop_front();
        }
    }

    /// Get all messages including system prompt
    pub fn get_messages(&self) -> Vec<ChatMessage> {
        let mut result = Vec::with_capacity(self.messages.len() + 1);

        if let Some(ref prompt) = self.system_prompt {
            result.push(ChatMessage::system(prompt.clone()));
        }

        result.extend(self.messages.iter().cloned());
        result
    }

    /// Clear history (keeps system prompt)
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
