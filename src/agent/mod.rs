//! Agent module - participants and the team orchestrator
//!
//! Contains the persona wrapper, the coordinator guidance parser, the session
//! transcript, confirmation gates and the round loop.

pub mod confirm;
pub mod context;
pub mod guidance;
pub mod participant;
pub mod prompts;
pub mod team;

pub use confirm::{Confirm, FixedConfirm};
pub use context::Context;
pub use guidance::{parse_guidance, Guidance};
pub use participant::Agent;
pub use team::{AgentTeam, Discussion, EndReason};
