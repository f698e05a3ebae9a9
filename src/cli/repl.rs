//! Interactive REPL for Roundtable
//!
//! Reads queries until `exit` or end of input, runs a discussion for each,
//! and releases every agent on the way out. Ctrl-C abandons the current round
//! and goes straight to cleanup.

use std::sync::Arc;

use crate::agent::AgentTeam;
use crate::cli::commands::{handle_command, roster_text, CommandResult};
use crate::cli::console::Console;
use crate::core::{Config, Result};

/// How a REPL (or one-shot) session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// `exit`, end of input, or a finished one-shot query
    Finished,
    /// An error escaped the query loop; it was logged and reported
    Failed,
    /// Ctrl-C
    Interrupted,
}

/// Interactive REPL (Read-Eval-Print Loop)
pub struct Repl {
    team: AgentTeam,
    console: Arc<Console>,
    max_iterations: usize,
}

impl Repl {
    /// Create a REPL over an existing team; `console` supplies the queries
    pub fn new(team: AgentTeam, console: Arc<Console>, max_iterations: usize) -> Self {
        Self {
            team,
            console,
            max_iterations,
        }
    }

    /// Create a REPL on stdin, building the team from configuration
    ///
    /// The same console answers the team's confirmation prompts.
    pub fn with_config(config: &Config) -> Result<Self> {
        let console = Arc::new(Console::new());
        let team = AgentTeam::from_config(config, console.clone())?;
        Ok(Self::new(team, console, config.max_iterations))
    }

    /// Run the read loop, then clean up
    pub async fn run(&mut self) -> SessionEnd {
        self.print_banner();
        log::info!("AIエージェントチャット開始");
        println!("AIエージェントチームとのチャットを開始します。終了するには'exit'とだけ入力してください。");

        let outcome = tokio::select! {
            result = self.read_loop() => Some(result),
            _ = tokio::signal::ctrl_c() => None,
        };

        self.finish(outcome).await
    }

    /// Run a single query, then clean up
    pub async fn run_once(&mut self, query: &str) -> SessionEnd {
        let max_iterations = self.max_iterations;
        let outcome = tokio::select! {
            result = self.team.process_query(query, max_iterations) => Some(result.map(|_| ())),
            _ = tokio::signal::ctrl_c() => None,
        };

        self.finish(outcome).await
    }

    async fn read_loop(&mut self) -> Result<()> {
        loop {
            let input = match self.console.read_line("\nあなたの質問: ").await? {
                Some(input) => input,
                None => {
                    log::info!("end of input");
                    break;
                }
            };

            match handle_command(&input, &self.team) {
                CommandResult::Exit => {
                    log::info!("ユーザーがプログラム終了");
                    break;
                }
                CommandResult::Handled(output) => println!("{}", output),
                CommandResult::None => continue,
                CommandResult::Continue(query) => {
                    let discussion = self.team.process_query(&query, self.max_iterations).await?;
                    log::info!(
                        "discussion finished after {} rounds ({:?})",
                        discussion.rounds,
                        discussion.ended_by
                    );
                }
            }
        }

        Ok(())
    }

    /// Report how the session ended and release every agent
    async fn finish(&mut self, outcome: Option<Result<()>>) -> SessionEnd {
        let end = match outcome {
            Some(Ok(())) => SessionEnd::Finished,
            Some(Err(e)) => {
                log::error!("予期せぬエラー: {}", e);
                println!("予期せぬエラーが発生しました: {}", e);
                SessionEnd::Failed
            }
            None => {
                log::info!("プログラム中断");
                println!("\nプログラムを中断します。");
                SessionEnd::Interrupted
            }
        };

        log::info!("プログラム終了");
        println!("プログラムを終了します。");
        self.team.shutdown().await;
        end
    }

    /// Print the startup banner
    fn print_banner(&self) {
        println!("\n=== Roundtable ===");
        println!(
            "コーディネーター: {}  最大ラウンド数: {}",
            self.team.coordinator().name(),
            self.max_iterations
        );
        println!("{}", roster_text(&self.team));
        println!("コマンド: help, agents, exit");
        println!("──────────────────────────────");
    }
}
