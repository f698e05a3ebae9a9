//! OpenAI-compatible capability
//!
//! Talks to `{base_url}/chat/completions`. The API key is read from
//! `OPENAI_API_KEY` (a `.env` file is loaded with the config).

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use crate::core::{
    ChatMessage, Config, ProposedAction, Result, RoundtableError, ToolDefinition, EXECUTE_TOOL,
};
use crate::llm::history::History;
use crate::llm::traits::{ChatCapability, ChatOptions};

/// OpenAI-backed chat capability
pub struct OpenAiCapability {
    client: Client,
    base_url: String,
    api_key: String,
    options: ChatOptions,
    history: History,
    tools: Vec<ToolDefinition>,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<&'a [ToolDefinition]>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
    #[serde(default, skip_serializing)]
    tool_calls: Option<Vec<WireToolCall>>,
}

#[derive(Debug, Deserialize)]
struct WireToolCall {
    function: WireFunction,
}

/// `arguments` is a JSON document encoded as a string
#[derive(Debug, Deserialize)]
struct WireFunction {
    name: String,
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: WireMessage,
}

impl OpenAiCapability {
    /// Create a capability from configuration and the environment
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = env::var("OPENAI_API_KEY")
            .map_err(|_| RoundtableError::config("OPENAI_API_KEY is not set"))?;
        Self::with_api_key(config, api_key)
    }

    pub fn with_api_key(config: &Config, api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.openai.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.openai.base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            options: ChatOptions::default(),
            history: History::new(config.history_limit),
            tools: vec![ToolDefinition::execute()],
        })
    }

    /// Convert internal message to wire format
    ///
    /// Past actions are folded into the content as a fenced block, since the
    /// API rejects replayed tool calls without matching tool results.
    fn to_wire_message(msg: &ChatMessage) -> WireMessage {
        let content = match &msg.action {
            Some(action) => format!(
                "{}\n```{}\n{}\n```",
                msg.content, action.language, action.code
            ),
            None => msg.content.clone(),
        };

        WireMessage {
            role: msg.role.clone(),
            content: Some(content),
            tool_calls: None,
        }
    }

    fn to_chat_message(message: WireMessage) -> ChatMessage {
        let action = message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .filter(|tc| tc.function.name == EXECUTE_TOOL)
            .filter_map(|tc| serde_json::from_str::<serde_json::Value>(&tc.function.arguments).ok())
            .find_map(|args| ProposedAction::from_arguments(&args));

        ChatMessage {
            role: "assistant".to_string(),
            content: message.content.unwrap_or_default(),
            action,
        }
    }
}

#[async_trait]
impl ChatCapability for OpenAiCapability {
    fn configure(&mut self, options: ChatOptions) {
        self.history.set_system_prompt(options.system_prompt.clone());
        self.options = options;
    }

    fn options(&self) -> &ChatOptions {
        &self.options
    }

    async fn chat(&mut self, prompt: &str) -> Result<Vec<ChatMessage>> {
        let user = ChatMessage::user(prompt);

        let request = CompletionRequest {
            model: &self.options.model,
            messages: self
                .history
                .get_messages()
                .iter()
                .chain(std::iter::once(&user))
                .map(Self::to_wire_message)
                .collect(),
            tools: Some(self.tools.as_slice()),
        };

        if self.options.debug {
            log::debug!(
                "{} request with {} messages",
                self.options.model,
                request.messages.len()
            );
        }

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(RoundtableError::provider(format!(
                "OpenAI API error ({}): {}",
                status, error_text
            )));
        }

        let response_text = response.text().await?;
        if self.options.debug {
            log::debug!("{} response: {}", self.options.model, response_text);
        }

        let completion: CompletionResponse = serde_json::from_str(&response_text).map_err(|e| {
            RoundtableError::provider(format!("Failed to parse response: {}", e))
        })?;

        let messages: Vec<ChatMessage> = completion
            .choices
            .into_iter()
            .take(1)
            .map(|choice| Self::to_chat_message(choice.message))
            .collect();

        self.history.push(user);
        for message in &messages {
            self.history.push(message.clone());
        }

        Ok(messages)
    }

    async fn cleanup(&mut self) -> Result<()> {
        self.history.clear();
        Ok(())
    }

    fn name(&self) -> &str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let mut config = Config::default();
        config.openai.base_url = "http://localhost:8080/v1/".to_string();
        let capability = OpenAiCapability::with_api_key(&config, "sk-test").unwrap();
        assert_eq!(capability.base_url, "http://localhost:8080/v1");
        assert_eq!(capability.name(), "openai");
    }

    #[tokio::test]
    async fn test_failed_chat_leaves_history_untouched() {
        let mut config = Config::default();
        config.openai.base_url = "http://127.0.0.1:1/v1".to_string();
        let mut capability = OpenAiCapability::with_api_key(&config, "sk-test").unwrap();
        capability.configure(ChatOptions {
            model: "gpt-4o-mini".into(),
            system_prompt: "p".into(),
            ..Default::default()
        });

        assert!(capability.chat("first").await.is_err());
        assert!(capability.chat("second").await.is_err());

        assert!(capability.history.is_empty());
        assert_eq!(capability.history.get_messages().len(), 1);
    }

    #[test]
    fn test_tool_call_arguments_are_decoded() {
        let raw = r#"{
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {"name": "execute", "arguments": "{\"language\":\"python\",\"code\":\"print(1)\"}"}
                    }]
                }
            }]
        }"#;
        let completion: CompletionResponse = serde_json::from_str(raw).unwrap();
        let message =
            OpenAiCapability::to_chat_message(completion.choices.into_iter().next().unwrap().message);
        assert_eq!(message.content, "");
        assert_eq!(message.action, Some(ProposedAction::new("python", "print(1)")));
    }

    #[test]
    fn test_action_folded_into_content() {
        let msg = ChatMessage::assistant("run this").with_action(ProposedAction::new("shell", "ls"));
        let wire = OpenAiCapability::to_wire_message(&msg);
        assert_eq!(wire.content.unwrap(), "run this\n```shell\nls\n```");
    }
}
