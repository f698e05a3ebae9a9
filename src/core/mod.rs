//! Core module - shared infrastructure for Roundtable
//!
//! This module contains foundational types, configuration, logging and error
//! handling used throughout the application.

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use config::{AgentDefinition, Config, ProviderType};
pub use error::{Result, RoundtableError};
pub use types::*;
