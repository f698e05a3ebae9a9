//! Ollama capability
//!
//! Async HTTP client for the Ollama `/api/chat` endpoint with tool calling.
//! The `execute` tool is advertised so models can propose code; a tool call
//! comes back as the message's proposed action.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::core::{
    ChatMessage, Config, ProposedAction, Result, RoundtableError, ToolDefinition, EXECUTE_TOOL,
};
use crate::llm::history::History;
use crate::llm::traits::{ChatCapability, ChatOptions};

/// Ollama-backed chat capability
pub struct OllamaCapability {
    client: Client,
    base_url: String,
    options: ChatOptions,
    history: History,
    tools: Vec<ToolDefinition>,
}

/// Ollama chat request
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<OllamaMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<&'a [ToolDefinition]>,
    stream: bool,
}

/// Ollama message format
#[derive(Debug, Serialize, Deserialize)]
struct OllamaMessage {
    role: String,
    #[serde(default)]
    content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<OllamaToolCall>>,
}

/// Ollama tool call format
#[derive(Debug, Clone, Serialize, Deserialize)]
struct OllamaToolCall {
    function: OllamaFunction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct OllamaFunction {
    name: String,
    arguments: serde_json::Value,
}

/// Ollama chat response (non-streaming)
#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: OllamaMessage,
}

impl OllamaCapability {
    /// Create a capability from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.ollama.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.ollama_url(),
            options: ChatOptions::default(),
            history: History::new(config.history_limit),
            tools: vec![ToolDefinition::execute()],
        })
    }

    /// Convert internal message to Ollama format
    fn to_ollama_message(msg: &ChatMessage) -> OllamaMessage {
        OllamaMessage {
            role: msg.role.clone(),
            content: msg.content.clone(),
            tool_calls: msg.action.as_ref().map(|action| {
                vec![OllamaToolCall {
                    function: OllamaFunction {
                        name: EXECUTE_TOOL.to_string(),
                        arguments: serde_json::json!({
                            "language": action.language,
                            "code": action.code,
                        }),
                    },
                }]
            }),
        }
    }

    /// Convert an Ollama reply to an internal message
    fn to_chat_message(message: OllamaMessage) -> ChatMessage {
        let action = message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .filter(|tc| tc.function.name == EXECUTE_TOOL)
            .find_map(|tc| ProposedAction::from_arguments(&tc.function.arguments));

        ChatMessage {
            role: "assistant".to_string(),
            content: message.content,
            action,
        }
    }

    /// Debug log if enabled
    fn debug_log(&self, label: &str, content: &str) {
        if self.options.debug {
            if content.chars().count() > 500 {
                let head: String = content.chars().take(500).collect();
                log::debug!("{} {}: {}...", self.options.model, label, head);
            } else {
                log::debug!("{} {}: {}", self.options.model, label, content);
            }
        }
    }
}

#[async_trait]
impl ChatCapability for OllamaCapability {
    fn configure(&mut self, options: ChatOptions) {
        self.history.set_system_prompt(options.system_prompt.clone());
        self.options = options;
    }

    fn options(&self) -> &ChatOptions {
        &self.options
    }

    async fn chat(&mut self, prompt: &str) -> Result<Vec<ChatMessage>> {
        let user = ChatMessage::user(prompt);

        let messages: Vec<OllamaMessage> = self
            .history
            .get_messages()
            .iter()
            .chain(std::iter::once(&user))
            .map(Self::to_ollama_message)
            .collect();

        let request = ChatRequest {
            model: &self.options.model,
            messages,
            tools: Some(self.tools.as_slice()),
            stream: false,
        };

        let request_json = serde_json::to_string(&request)?;
        self.debug_log("Request", &request_json);

        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    RoundtableError::provider(format!(
                        "Cannot connect to Ollama at {}. Is it running?",
                        self.base_url
                    ))
                } else {
                    RoundtableError::from(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            if status.as_u16() == 404 && error_text.contains("not found") {
                return Err(RoundtableError::ModelNotFound(self.options.model.clone()));
            }

            return Err(RoundtableError::provider(format!(
                "Ollama API error ({}): {}",
                status, error_text
            )));
        }

        let response_text = response.text().await?;
        self.debug_log("Response", &response_text);

        let chat_response: ChatResponse = serde_json::from_str(&response_text).map_err(|e| {
            RoundtableError::provider(format!("Failed to parse response: {}", e))
        })?;

        let reply = Self::to_chat_message(chat_response.message);
        self.history.push(user);
        self.history.push(reply.clone());

        Ok(vec![reply])
    }

    async fn cleanup(&mut self) -> Result<()> {
        self.history.clear();
        Ok(())
    }

    fn name(&self) -> &str {
        "ollama"
    }
}
