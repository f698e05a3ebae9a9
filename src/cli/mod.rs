//! CLI module - command-line interface
//!
//! Contains the REPL, the stdin console and command parsing.

pub mod commands;
pub mod console;
pub mod repl;

pub use console::Console;
pub use repl::{Repl, SessionEnd};
