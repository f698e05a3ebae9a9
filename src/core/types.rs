//! Shared types used across Roundtable modules
//!
//! Contains chat message structures, proposed actions and tool definitions.

use serde::{Deserialize, Serialize};

/// A message produced by (or sent to) a chat capability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender (user, assistant, system)
    pub role: String,
    /// Text content of the message
    pub content: String,
    /// Code the model wants to run, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<ProposedAction>,
}

impl ChatMessage {
    /// Create a new user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
            action: None,
        }
    }

    /// Create a new assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
            action: None,
        }
    }

    /// Create a new system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
            action: None,
        }
    }

    /// Attach a proposed action
    pub fn with_action(mut self, action: ProposedAction) -> Self {
        self.action = Some(action);
        self
    }
}

/// An action (code snippet) proposed by the model for execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposedAction {
    /// Language of the snippet (python, shell, ...)
    pub language: String,
    /// Source to run
    pub code: String,
}

impl ProposedAction {
    pub fn new(language: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            code: code.into(),
        }
    }

    /// Build an action from `execute` tool-call arguments
    pub fn from_arguments(arguments: &serde_json::Value) -> Option<Self> {
        let code = arguments.get("code")?.as_str()?;
        let language = arguments
            .get("language")
            .and_then(|v| v.as_str())
            .unwrap_or("python");
        Some(Self::new(language, code))
    }
}

/// Definition of a tool that can be called by the LLM
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Type of tool (always "function" for now)
    #[serde(rename = "type")]
    pub tool_type: String,
    /// Function details
    pub function: FunctionDefinition,
}

/// Function definition within a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub name: String,
    pub description: String,
    /// JSON Schema for the parameters
    pub parameters: serde_json::Value,
}

/// Name of the code-execution tool advertised to the models
pub const EXECUTE_TOOL: &str = "execute";

impl ToolDefinition {
    /// Create a new function tool definition
    pub fn function(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: serde_json::Value,
    ) -> Self {
        Self {
            tool_type: "function".to_string(),
            function: FunctionDefinition {
                name: name.into(),
                description: description.into(),
                parameters,
            },
        }
    }

    /// The `execute` tool through which models propose code to run
    pub fn execute() -> Self {
        Self::function(
            EXECUTE_TOOL,
            "Propose code to run on the user's machine. The user may be asked to approve it.",
            serde_json::json!({
                "type": "object",
                "properties": {
                    "language": {
                        "type": "string",
                        "description": "Programming language of the code, e.g. python or shell"
                    },
                    "code": {
                        "type": "string",
                        "description": "The code to execute"
                    }
                },
                "required": ["language", "code"]
            }),
        )
    }
}
