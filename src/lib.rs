//! Roundtable - coordinator-led multi-agent discussions
//!
//! Several LLM-backed personas take turns on a user query. One coordinator
//! picks the topic, may name the next speaker, summarizes each round and
//! proposes the next question; the operator confirms whether to go on.
//!
//! # Architecture
//!
//! - **Core**: Shared types, configuration, logging and error handling
//! - **LLM**: `ChatCapability` abstraction with Ollama and OpenAI backends
//! - **Agent**: Personas, guidance parsing, transcript and the round loop
//! - **CLI**: Console, commands and REPL
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use roundtable::{AgentTeam, Config, FixedConfirm};
//!
//! #[tokio::main]
//! async fn main() -> roundtable::Result<()> {
//!     let config = Config::load(None)?;
//!     let mut team = AgentTeam::from_config(&config, Arc::new(FixedConfirm(true)))?;
//!
//!     let discussion = team.process_query("新サービスの価格設定を考えて", 3).await?;
//!     println!("{}", discussion.final_summary);
//!     team.shutdown().await;
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod cli;
pub mod core;
pub mod llm;

// Re-export commonly used items
pub use agent::{Agent, AgentTeam, Confirm, Discussion, EndReason, FixedConfirm};
pub use cli::Repl;
pub use core::{Config, Result, RoundtableError};
pub use llm::{ChatCapability, ChatOptions};
