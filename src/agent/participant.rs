//! A single discussion participant
//!
//! Wraps one chat capability with a persona and tracks whether the agent has
//! reported its task as complete for the current query session.

use std::sync::Arc;

use crate::agent::confirm::Confirm;
use crate::agent::prompts::{self, COORDINATOR_ROLE, ERROR_PREFIX};
use crate::core::{AgentDefinition, Config, Result};
use crate::llm::{self, ChatCapability, ChatOptions};

/// One persona backed by its own chat capability
pub struct Agent {
    definition: AgentDefinition,
    capability: Box<dyn ChatCapability>,
    confirm: Arc<dyn Confirm>,
    task_completed: bool,
    last_topic: String,
}

impl Agent {
    /// Wrap an already configured capability
    pub fn new(
        definition: AgentDefinition,
        capability: Box<dyn ChatCapability>,
        confirm: Arc<dyn Confirm>,
    ) -> Self {
        Self {
            definition,
            capability,
            confirm,
            task_completed: false,
            last_topic: String::new(),
        }
    }

    /// Build an agent from its roster entry, creating and configuring the
    /// backend the config selects
    pub fn from_config(
        definition: AgentDefinition,
        config: &Config,
        confirm: Arc<dyn Confirm>,
    ) -> Result<Self> {
        let mut capability = llm::create_capability(config)?;
        capability.configure(Self::chat_options(&definition, config));

        log::debug!(
            "agent {} uses {} ({})",
            definition.name,
            capability.options().model,
            capability.name()
        );

        Ok(Self::new(definition, capability, confirm))
    }

    /// Capability options for a roster entry
    pub fn chat_options(definition: &AgentDefinition, config: &Config) -> ChatOptions {
        ChatOptions {
            model: config.model_for(definition).to_string(),
            auto_run: config.auto_run,
            debug: config.debug_mode,
            local: config.local,
            require_approval: config.require_user_approval,
            system_prompt: prompts::system_prompt(
                &definition.name,
                &definition.personality,
                &definition.expertise,
                &definition.role,
                definition.is_coordinator,
            ),
        }
    }

    /// Answer `query` given the transcript so far and the current topic
    ///
    /// Never fails: backend errors come back as text starting with
    /// `エラーが発生しました: `.
    pub async fn respond(&mut self, query: &str, context: &str, topic: &str) -> String {
        self.last_topic = topic.to_string();
        let prompt = prompts::agent_prompt(query, context, topic);

        let messages = match self.capability.chat(&prompt).await {
            Ok(messages) => messages,
            Err(e) => {
                log::error!("エージェント {} の応答中にエラー: {}", self.name(), e);
                return format!("{}{}", ERROR_PREFIX, e);
            }
        };

        if self.capability.options().require_approval {
            if let Some(action) = messages.last().and_then(|m| m.action.as_ref()) {
                let approved = match self
                    .confirm
                    .confirm(&prompts::action_approval(&action.code))
                    .await
                {
                    Ok(approved) => approved,
                    Err(e) => {
                        log::error!("エージェント {} の承認確認に失敗: {}", self.name(), e);
                        false
                    }
                };

                if !approved {
                    log::info!("{}: action declined by operator", self.name());
                    return prompts::ACTION_CANCELLED.to_string();
                }
            }
        }

        let content = messages
            .last()
            .map(|m| m.content.clone())
            .unwrap_or_else(|| prompts::NO_RESPONSE.to_string());

        self.task_completed = prompts::signals_completion(&content);
        if self.task_completed {
            log::info!("{} reported task completion", self.name());
        }

        content
    }

    /// Release the capability's resources, logging any failure
    pub async fn cleanup(&mut self) {
        if let Err(e) = self.capability.cleanup().await {
            log::error!("エージェント {} のクリーンアップ中にエラー: {}", self.name(), e);
        }
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn personality(&self) -> &str {
        &self.definition.personality
    }

    pub fn expertise(&self) -> &str {
        &self.definition.expertise
    }

    pub fn role(&self) -> &str {
        &self.definition.role
    }

    pub fn priority(&self) -> i32 {
        self.definition.priority
    }

    /// Holds the reserved coordinator role
    pub fn is_coordinator(&self) -> bool {
        self.definition.role == COORDINATOR_ROLE
    }

    pub fn task_completed(&self) -> bool {
        self.task_completed
    }

    pub fn reset_completion(&mut self) {
        self.task_completed = false;
    }

    pub fn last_topic(&self) -> &str {
        &self.last_topic
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("definition", &self.definition)
            .field("capability", &self.capability.name())
            .field("task_completed", &self.task_completed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::confirm::FixedConfirm;
    use crate::core::ProviderType;

    #[test]
    fn test_chat_options_pick_model_by_flag() {
        let config = Config {
            coordinator_model: "big".into(),
            agent_model: "small".into(),
            require_user_approval: true,
            ..Config::default()
        };
        let coord = AgentDefinition::coordinator("Alice", "calm", "planning", 9);
        let member = AgentDefinition::new("Bob", "curious", "pricing", "analyst", 1);

        let coord_opts = Agent::chat_options(&coord, &config);
        let member_opts = Agent::chat_options(&member, &config);
        assert_eq!(coord_opts.model, "big");
        assert_eq!(member_opts.model, "small");
        assert!(coord_opts.require_approval);
        assert!(coord_opts.system_prompt.contains("次の発言者"));
        assert!(!member_opts.system_prompt.contains("次の発言者"));
    }

    #[test]
    fn test_from_config_builds_ollama_agent() {
        let config = Config {
            provider: ProviderType::Ollama,
            ..Config::default()
        };
        let definition = AgentDefinition::coordinator("Alice", "calm", "planning", 9);
        let agent = Agent::from_config(definition, &config, Arc::new(FixedConfirm(true))).unwrap();
        assert!(agent.is_coordinator());
        assert!(!agent.task_completed());
        assert_eq!(agent.priority(), 9);
    }
}
