//! Configuration management for Roundtable
//!
//! Supports environment variables, config files and CLI overrides. The loaded
//! value is immutable once the team is built; it is passed explicitly to the
//! capability factory and the agent constructors.
//!
//! Config file lookup: `--config`, `$ROUNDTABLE_CONFIG`, `./roundtable.toml`,
//! `./config.json`, then `~/.config/roundtable/config.toml`.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::agent::prompts::COORDINATOR_ROLE;
use crate::core::error::{Result, RoundtableError};

/// Main configuration for Roundtable
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level name (DEBUG, INFO, WARNING, ERROR, CRITICAL)
    pub log_level: String,
    /// Log destination; stderr when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    /// Upper bound on discussion rounds per query
    pub max_iterations: usize,
    /// Model used by the coordinator
    pub coordinator_model: String,
    /// Model used by every other agent
    pub agent_model: String,
    /// Passed to backends that execute code; the built-in ones do not
    pub auto_run: bool,
    /// Verbose request/response logging in the backends
    pub debug_mode: bool,
    /// Force the local (Ollama) backend
    pub local: bool,
    /// Ask the operator before a proposed action is accepted
    pub require_user_approval: bool,
    /// Which backend serves the agents when `local` is off
    pub provider: ProviderType,
    /// Messages each capability keeps in its own history (system prompt excluded)
    pub history_limit: usize,
    /// Ollama server configuration
    pub ollama: OllamaConfig,
    /// OpenAI-compatible API configuration
    pub openai: OpenAiConfig,
    /// The roster
    pub agents: Vec<AgentDefinition>,
}

/// Backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    Ollama,
    #[serde(alias = "open_ai")]
    OpenAi,
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderType::Ollama => write!(f, "ollama"),
            ProviderType::OpenAi => write!(f, "openai"),
        }
    }
}

/// Ollama server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Host address (default: localhost)
    pub host: String,
    /// Port number (default: 11434)
    pub port: u16,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// OpenAI-compatible API configuration
///
/// The API key is never stored in the file; it comes from `OPENAI_API_KEY`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

/// One roster entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentDefinition {
    /// Unique name within the team
    pub name: String,
    pub personality: String,
    pub expertise: String,
    /// Free-form role; `コーディネーター` marks the coordinator
    pub role: String,
    /// Higher speaks and sorts first
    #[serde(default)]
    pub priority: i32,
    /// Selects the coordinator model and coordination instructions
    #[serde(default)]
    pub is_coordinator: bool,
}

impl AgentDefinition {
    pub fn new(
        name: impl Into<String>,
        personality: impl Into<String>,
        expertise: impl Into<String>,
        role: impl Into<String>,
        priority: i32,
    ) -> Self {
        Self {
            name: name.into(),
            personality: personality.into(),
            expertise: expertise.into(),
            role: role.into(),
            priority,
            is_coordinator: false,
        }
    }

    /// A definition carrying the coordinator role and flag
    pub fn coordinator(
        name: impl Into<String>,
        personality: impl Into<String>,
        expertise: impl Into<String>,
        priority: i32,
    ) -> Self {
        Self {
            is_coordinator: true,
            ..Self::new(name, personality, expertise, COORDINATOR_ROLE, priority)
        }
    }
}

fn env_flag(key: &str, default: bool) -> bool {
    env::var(key)
        .map(|v| v == "true" || v == "1")
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: env::var("ROUNDTABLE_LOG_LEVEL").unwrap_or_else(|_| "INFO".to_string()),
            log_file: env::var("ROUNDTABLE_LOG_FILE").ok().map(PathBuf::from),
            max_iterations: 5,
            coordinator_model: env::var("ROUNDTABLE_COORDINATOR_MODEL")
                .unwrap_or_else(|_| "qwen3:8b".to_string()),
            agent_model: env::var("ROUNDTABLE_AGENT_MODEL")
                .unwrap_or_else(|_| "qwen3:8b".to_string()),
            auto_run: false,
            debug_mode: env_flag("ROUNDTABLE_DEBUG", false),
            local: false,
            require_user_approval: true,
            provider: ProviderType::Ollama,
            history_limit: 100,
            ollama: OllamaConfig::default(),
            openai: OpenAiConfig::default(),
            agents: default_roster(),
        }
    }
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: env::var("OLLAMA_HOST").unwrap_or_else(|_| "localhost".to_string()),
            port: env::var("OLLAMA_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(11434),
            timeout_secs: 300,
        }
    }
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            timeout_secs: 300,
        }
    }
}

/// Roster used when no config file provides one
fn default_roster() -> Vec<AgentDefinition> {
    vec![
        AgentDefinition::coordinator("議長", "冷静で公平", "プロジェクト管理", 10),
        AgentDefinition::new("エンジニア", "論理的で慎重", "ソフトウェア開発", "技術担当", 5),
        AgentDefinition::new("アナリスト", "好奇心旺盛", "データ分析", "分析担当", 5),
    ]
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("roundtable")
    }

    /// Get the default config file path in the config directory
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Find the config file to load
    ///
    /// `--config` and `$ROUNDTABLE_CONFIG` are returned whether or not they
    /// exist, so a missing file named there is reported by the loader.
    pub fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
        let env_path = env::var_os("ROUNDTABLE_CONFIG")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);
        Self::locate_in(explicit, env_path, Path::new("."), &Self::config_file())
    }

    fn locate_in(
        explicit: Option<&Path>,
        env_path: Option<PathBuf>,
        cwd: &Path,
        user_file: &Path,
    ) -> Option<PathBuf> {
        if let Some(path) = explicit.map(Path::to_path_buf).or(env_path) {
            return Some(path);
        }

        [
            cwd.join("roundtable.toml"),
            cwd.join("config.json"),
            user_file.to_path_buf(),
        ]
        .into_iter()
        .find(|p| p.exists())
    }

    /// Load configuration from `.env`, the located config file, and defaults
    ///
    /// A path named by `--config` or `$ROUNDTABLE_CONFIG` that does not exist
    /// is an error; otherwise a missing file falls back to defaults (which
    /// respect env vars).
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let _ = dotenvy::dotenv();

        let config = match Self::locate(explicit) {
            Some(path) => Self::load_from_file(&path)?,
            None => {
                log::debug!("No config file found, using defaults");
                Self::default()
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file; `.json` files are parsed as JSON, all
    /// others as TOML
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(RoundtableError::config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| RoundtableError::config(format!("Failed to read config: {}", e)))?;

        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| RoundtableError::config(format!("Failed to parse config: {}", e)))
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| RoundtableError::config(format!("Failed to parse config: {}", e)))
    }

    /// Check roster sanity that does not depend on team construction
    pub fn validate(&self) -> Result<()> {
        if self.agents.is_empty() {
            return Err(RoundtableError::config("No agents configured"));
        }

        if self.history_limit == 0 {
            return Err(RoundtableError::config("history_limit must be at least 1"));
        }

        let mut seen = HashSet::new();
        for agent in &self.agents {
            if agent.name.trim().is_empty() {
                return Err(RoundtableError::config("Agent name must not be empty"));
            }
            if !seen.insert(agent.name.as_str()) {
                return Err(RoundtableError::DuplicateAgent(agent.name.clone()));
            }
        }

        Ok(())
    }

    /// Model for an agent, by coordinator flag
    pub fn model_for(&self, definition: &AgentDefinition) -> &str {
        if definition.is_coordinator {
            &self.coordinator_model
        } else {
            &self.agent_model
        }
    }

    /// Backend actually used: `local` always means Ollama
    pub fn effective_provider(&self) -> ProviderType {
        if self.local {
            ProviderType::Ollama
        } else {
            self.provider
        }
    }

    /// Get the full Ollama API URL
    pub fn ollama_url(&self) -> String {
        format!("http://{}:{}", self.ollama.host, self.ollama.port)
    }
}
