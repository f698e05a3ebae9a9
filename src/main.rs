//! Roundtable - coordinator-led multi-agent discussions
//!
//! Main entry point for the CLI application.

use std::path::PathBuf;

use clap::Parser;
use roundtable::cli::SessionEnd;
use roundtable::core::logging;
use roundtable::{Config, Repl};

/// Roundtable - coordinator-led multi-agent discussions
#[derive(Parser, Debug)]
#[command(name = "roundtable")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file (TOML, or JSON when it ends in .json)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Maximum discussion rounds per query
    #[arg(long, short = 'n')]
    max_iterations: Option<usize>,

    /// Enable debug logging and backend request dumps
    #[arg(long, short = 'd')]
    debug: bool,

    /// Single prompt mode (non-interactive)
    #[arg(long, short = 'p')]
    prompt: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Build configuration
    let mut config = Config::load(args.config.as_deref())?;

    // Apply CLI overrides
    if let Some(max_iterations) = args.max_iterations {
        config.max_iterations = max_iterations;
    }

    if args.debug {
        config.log_level = "DEBUG".to_string();
        config.debug_mode = true;
    }

    logging::init(&config.log_level, config.log_file.as_deref())?;
    log::debug!(
        "provider {}, {} agents, max {} rounds",
        config.effective_provider(),
        config.agents.len(),
        config.max_iterations
    );

    let mut repl = Repl::with_config(&config)?;

    let end = match args.prompt {
        Some(prompt) => repl.run_once(&prompt).await,
        None => repl.run().await,
    };

    // A pending stdin read would otherwise hold the runtime open
    if end == SessionEnd::Interrupted {
        std::process::exit(0);
    }

    Ok(())
}
